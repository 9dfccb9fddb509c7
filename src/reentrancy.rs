//! Debug-only reentrancy detection.
//!
//! `ValueSet` runs caller-supplied strategy code (`Semantics::equivalent`,
//! `Semantics::hash_one`) while its index and storage may be transiently
//! inconsistent. A strategy that calls back into the same set during a probe
//! would observe that inconsistency. In debug builds, nested entry panics;
//! in release builds the tracker compiles to a zero-cost no-op.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-instance nesting tracker. Guard public entry points with
/// `let _g = self.reentrancy.enter();`.
#[derive(Debug)]
pub(crate) struct Reentrancy {
    #[cfg(debug_assertions)]
    entered: Cell<bool>,
    // Single-threaded structure: stay !Send + !Sync.
    _nosend: PhantomData<*mut ()>,
}

impl Reentrancy {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            entered: Cell::new(false),
            _nosend: PhantomData,
        }
    }

    /// Mark the structure as entered until the returned guard drops.
    /// Panics in debug builds if it is already entered.
    #[inline]
    pub(crate) fn enter(&self) -> EnterGuard<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.entered.get(),
                "reentrant call into ValueSet from strategy code during a probe"
            );
            self.entered.set(true);
            return EnterGuard { owner: self };
        }

        #[cfg(not(debug_assertions))]
        {
            return EnterGuard { _z: PhantomData };
        }
    }
}

impl Default for Reentrancy {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard returned by [`Reentrancy::enter`].
pub(crate) struct EnterGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a Reentrancy,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl<'a> Drop for EnterGuard<'a> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.entered.set(false);
    }
}

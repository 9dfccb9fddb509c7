//! Pluggable equality/hash strategies.
//!
//! A type participates in hash-based containers by supplying a [`Semantics`]
//! strategy that carries *both* halves of the contract: an equivalence
//! relation and a hash function consistent with it. Because a strategy is a
//! single object, a container can never end up with value equality silently
//! paired with identity hashing — the classic half-overridden bug is only
//! reproducible by constructing an [`FnSemantics`] that pairs them on
//! purpose.

use core::hash::{BuildHasher, Hash};
use core::marker::PhantomData;
use std::collections::hash_map::RandomState;

/// Equality/hash strategy for values of type `T`.
///
/// Implementations are expected to uphold the equality contract: `equivalent`
/// is reflexive, symmetric, and transitive; `hash_one` agrees with it
/// (`equivalent(a, b)` implies `hash_one(a) == hash_one(b)`); both are stable
/// across repeated calls while the values are unchanged. Nothing enforces
/// this at the type level — [`contract::check`] exists to verify it over
/// samples, and [`ValueSet`] misbehaves in the documented ways when the
/// contract is broken.
///
/// [`contract::check`]: crate::contract::check
/// [`ValueSet`]: crate::ValueSet
pub trait Semantics<T: ?Sized> {
    /// Whether `a` and `b` are the same value under this strategy.
    fn equivalent(&self, a: &T, b: &T) -> bool;

    /// Hash of `v` under this strategy.
    fn hash_one(&self, v: &T) -> u64;
}

/// Value semantics: equality by logical content via `T: Eq + Hash`, hashed
/// through a `BuildHasher`. This is the coherent default for value types.
#[derive(Clone, Debug, Default)]
pub struct ValueSemantics<S = RandomState> {
    hasher: S,
}

impl ValueSemantics {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> ValueSemantics<S>
where
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self { hasher }
    }
}

impl<T, S> Semantics<T> for ValueSemantics<S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn equivalent(&self, a: &T, b: &T) -> bool {
        a == b
    }

    fn hash_one(&self, v: &T) -> u64 {
        self.hasher.hash_one(v)
    }
}

/// Identity semantics: equality by storage location (address comparison),
/// hashes derived from the address.
///
/// This is the explicit stand-in for a language's default reference
/// equality. A container that owns its elements moves them into its own
/// storage, so a probe held by the caller is never the stored object:
/// membership queries through this strategy return false for any outside
/// instance, found only via handles. That is the documented behavior, the
/// same observable effect as querying a hash set with equals/hashCode left
/// unimplemented.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentitySemantics;

impl IdentitySemantics {
    pub fn new() -> Self {
        IdentitySemantics
    }
}

impl<T> Semantics<T> for IdentitySemantics {
    fn equivalent(&self, a: &T, b: &T) -> bool {
        core::ptr::eq(a, b)
    }

    fn hash_one(&self, v: &T) -> u64 {
        v as *const T as usize as u64
    }
}

/// Strategy built from a closure pair.
///
/// The escape hatch for ad-hoc strategies, including deliberately broken
/// ones: pairing a content-based `eq` with an address-based `hash` (or a
/// constant hash) reproduces the half-overridden contract bugs the checker
/// and the container tests exercise.
pub struct FnSemantics<T, F, G>
where
    F: Fn(&T, &T) -> bool,
    G: Fn(&T) -> u64,
{
    eq: F,
    hash: G,
    _marker: PhantomData<fn(&T)>,
}

impl<T, F, G> FnSemantics<T, F, G>
where
    F: Fn(&T, &T) -> bool,
    G: Fn(&T) -> u64,
{
    pub fn new(eq: F, hash: G) -> Self {
        Self {
            eq,
            hash,
            _marker: PhantomData,
        }
    }
}

impl<T, F, G> Semantics<T> for FnSemantics<T, F, G>
where
    F: Fn(&T, &T) -> bool,
    G: Fn(&T) -> u64,
{
    fn equivalent(&self, a: &T, b: &T) -> bool {
        (self.eq)(a, b)
    }

    fn hash_one(&self, v: &T) -> u64 {
        (self.hash)(v)
    }
}

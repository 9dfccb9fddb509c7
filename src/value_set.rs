//! ValueSet: a hash set whose membership is decided by a pluggable
//! equality/hash strategy, with stable generational handles to entries.

use crate::error::Error;
use crate::reentrancy::Reentrancy;
use crate::semantics::{Semantics, ValueSemantics};
use hashbrown::HashTable;
use slotmap::{DefaultKey, SlotMap};

/// Stable reference to a stored element. Handles survive unrelated inserts
/// and removals; a handle whose entry was removed never resolves again, even
/// if the physical slot is reused (generational keys).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(DefaultKey);

impl Handle {
    pub(crate) fn new(k: DefaultKey) -> Self {
        Handle(k)
    }
    pub(crate) fn raw(&self) -> DefaultKey {
        self.0
    }

    pub fn value<'a, T, E>(&self, set: &'a ValueSet<T, E>) -> Option<&'a T>
    where
        E: Semantics<T>,
    {
        set.get(*self)
    }
}

#[derive(Debug)]
struct Slot<T> {
    value: T,
    hash: u64,
}

/// Hash-based container over strategy `E`.
///
/// Bucket lookup uses the strategy's hash; within a bucket, candidates are
/// resolved by a linear probe with `equivalent`. Each slot stores the hash
/// computed at insert, and the index always rehashes from stored hashes, so
/// strategy code never runs during a resize. Elements are immutable
/// post-insert; mutating an element in place could desynchronize it from its
/// stored hash.
pub struct ValueSet<T, E = ValueSemantics> {
    semantics: E,
    index: HashTable<DefaultKey>,
    slots: SlotMap<DefaultKey, Slot<T>>, // storage using generational keys
    reentrancy: Reentrancy,
}

impl<T, E> ValueSet<T, E>
where
    E: Semantics<T> + Default,
{
    pub fn new() -> Self {
        Self::with_semantics(Default::default())
    }
}

impl<T, E> Default for ValueSet<T, E>
where
    E: Semantics<T> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over elements of a `ValueSet`.
pub struct Iter<'a, T> {
    it: slotmap::basic::Iter<'a, DefaultKey, Slot<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Handle, &'a T);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(k, s)| (Handle::new(k), &s.value))
    }
}

impl<T, E> ValueSet<T, E>
where
    E: Semantics<T>,
{
    pub fn with_semantics(semantics: E) -> Self {
        Self {
            semantics,
            index: HashTable::new(),
            slots: SlotMap::with_key(),
            reentrancy: Reentrancy::new(),
        }
    }

    /// The strategy this set resolves membership with.
    pub fn semantics(&self) -> &E {
        &self.semantics
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Locate an element equivalent to `probe` under the set's strategy.
    pub fn find(&self, probe: &T) -> Option<Handle> {
        let _g = self.reentrancy.enter();
        let hash = self.semantics.hash_one(probe);
        self.index
            .find(hash, |&k| {
                self.slots
                    .get(k)
                    .map(|s| self.semantics.equivalent(&s.value, probe))
                    .unwrap_or(false)
            })
            .map(|&k| Handle::new(k))
    }

    /// True iff some stored element is equivalent to `probe`, regardless of
    /// instance identity.
    pub fn contains(&self, probe: &T) -> bool {
        self.find(probe).is_some()
    }

    /// Insert `value`. Rejects the insert and leaves the set unchanged when
    /// an equivalent element is already stored.
    pub fn insert(&mut self, value: T) -> Result<Handle, Error> {
        let _g = self.reentrancy.enter();
        let hash = self.semantics.hash_one(&value);
        // HashTable::entry deduplicates or inserts in one probe.
        match self.index.entry(
            hash,
            |&k| {
                self.slots
                    .get(k)
                    .map(|s| self.semantics.equivalent(&s.value, &value))
                    .unwrap_or(false)
            },
            |&k| self.slots.get(k).map(|s| s.hash).unwrap_or(0),
        ) {
            hashbrown::hash_table::Entry::Occupied(_) => Err(Error::Duplicate),
            hashbrown::hash_table::Entry::Vacant(v) => {
                let k = self.slots.insert(Slot { value, hash });
                let _ = v.insert(k);
                Ok(Handle::new(k))
            }
        }
    }

    /// Remove the entry behind `handle`, returning the owned value. Stale
    /// handles return `None`.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let _g = self.reentrancy.enter();
        let k = handle.raw();

        let slot = self.slots.remove(k)?;

        // Unlink from the index; the entry must exist while the slot did.
        self.index
            .find_entry(slot.hash, |&kk| kk == k)
            .unwrap()
            .remove();

        Some(slot.value)
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slots.get(handle.raw()).map(|s| &s.value)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            it: self.slots.iter(),
        }
    }
}

//! Opaque handle tables.
//!
//! C callers never see Rust pointers. Every object crossing the boundary is
//! stored in a [`HandleTable`] and referred to by a non-zero `u64` id; zero
//! is reserved as the null handle.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The handle value meaning "no object".
pub const NULL_HANDLE: u64 = 0;

struct Slots<T> {
    entries: BTreeMap<u64, T>,
    next: u64,
}

/// A thread-safe table mapping handle ids to owned objects.
pub struct HandleTable<T> {
    slots: Mutex<Slots<T>>,
}

impl<T> HandleTable<T> {
    pub const fn new() -> Self {
        Self {
            slots: Mutex::new(Slots {
                entries: BTreeMap::new(),
                next: 1,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slots<T>> {
        // A panic while holding the lock cannot leave an entry half-written.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store an object and return its new handle.
    pub fn insert(&self, value: T) -> u64 {
        let mut slots = self.lock();
        let handle = slots.next;
        slots.next = slots.next.checked_add(1).unwrap_or(1);
        slots.entries.insert(handle, value);
        handle
    }

    /// Run `f` against the object behind `handle`, if it exists.
    pub fn with<R>(&self, handle: u64, f: impl FnOnce(&T) -> R) -> Option<R> {
        if handle == NULL_HANDLE {
            return None;
        }
        self.lock().entries.get(&handle).map(f)
    }

    /// Remove and return the object behind `handle`.
    pub fn remove(&self, handle: u64) -> Option<T> {
        self.lock().entries.remove(&handle)
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for HandleTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup() {
        let table = HandleTable::new();
        let a = table.insert("first");
        let b = table.insert("second");
        assert_ne!(a, NULL_HANDLE);
        assert_ne!(a, b);
        assert_eq!(table.with(a, |v| *v), Some("first"));
        assert_eq!(table.with(b, |v| v.len()), Some(6));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn null_and_stale_handles_miss() {
        let table = HandleTable::new();
        let a = table.insert(42);
        assert_eq!(table.with(NULL_HANDLE, |v| *v), None);
        assert_eq!(table.remove(a), Some(42));
        assert_eq!(table.with(a, |v| *v), None);
        assert_eq!(table.remove(a), None);
        assert!(table.is_empty());
    }

    #[test]
    fn handles_are_not_reused_after_release() {
        let table = HandleTable::new();
        let a = table.insert(1);
        table.remove(a);
        let b = table.insert(2);
        assert_ne!(a, b);
    }
}

#![allow(dead_code)]
//! Keyed list kept sorted by descending priority.
//!
//! Among equal priorities the most recently inserted entry comes first.
//! Operations are linear scans; the list is expected to hold a handful of
//! entries.

use std::borrow::Borrow;
use std::fmt;

#[derive(Clone, Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    priority: i32,
}

#[derive(Clone)]
pub struct PriorityOrderedList<K, V> {
    entries: Vec<Entry<K, V>>,
}

impl<K, V> Default for PriorityOrderedList<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Eq, V> PriorityOrderedList<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `key`. An existing entry with the same key is
    /// removed and its value returned; the new entry is placed ahead of every
    /// entry with the same priority.
    pub fn insert_or_replace(&mut self, key: K, value: V, priority: i32) -> Option<V> {
        let old = self.remove(&key);
        let idx = self
            .entries
            .iter()
            .position(|e| e.priority <= priority)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            idx,
            Entry {
                key,
                value,
                priority,
            },
        );
        old
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let idx = self.position(key)?;
        Some(self.entries.remove(idx).value)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.position(key).map(|idx| &self.entries[idx].value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let idx = self.position(key)?;
        Some(&mut self.entries[idx].value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.position(key).is_some()
    }

    pub fn priority_of<Q>(&self, key: &Q) -> Option<i32>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.position(key).map(|idx| self.entries[idx].priority)
    }

    fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.entries.iter().position(|e| e.key.borrow() == key)
    }

    /// Keep only entries for which `f` returns true; order is preserved.
    pub fn retain(&mut self, mut f: impl FnMut(&K, &mut V) -> bool) {
        self.entries.retain_mut(|e| f(&e.key, &mut e.value));
    }

    /// Highest priority first: `(key, value, priority)`.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V, i32)> {
        self.entries.iter().map(|e| (&e.key, &e.value, e.priority))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V, i32)> {
        self.entries
            .iter_mut()
            .map(|e| (&e.key, &mut e.value, e.priority))
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|e| &e.value)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.iter_mut().map(|e| &mut e.value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|e| &e.key)
    }

    /// Remove everything, yielding `(key, value)` highest priority first.
    pub fn drain(&mut self) -> impl Iterator<Item = (K, V)> + '_ {
        self.entries.drain(..).map(|e| (e.key, e.value))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for PriorityOrderedList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (&e.key, e.priority, &e.value)))
            .finish()
    }
}

//! Insertion-ordered map keyed by [`HashKey`].

use indexmap::IndexMap;
use indexmap::map::Entry;

use super::HashKey;

/// A map whose keys are compared by their derived hash key.
///
/// The original key values are retained so `keys()` can iterate them, in
/// insertion order.
#[derive(Clone)]
pub struct KeyedMap<K, V> {
    inner: IndexMap<String, (K, V)>,
}

impl<K: HashKey, V> KeyedMap<K, V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            inner: IndexMap::new(),
        }
    }

    /// Insert a key/value pair, returning the previous value for the key.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.inner.entry(key.hash_key()) {
            Entry::Occupied(mut slot) => {
                let (_, previous) = slot.insert((key, value));
                Some(previous)
            }
            Entry::Vacant(slot) => {
                slot.insert((key, value));
                None
            }
        }
    }

    /// Get the value stored under the given key, if any.
    pub fn get<Q: HashKey + ?Sized>(&self, key: &Q) -> Option<&V> {
        self.inner.get(key.hash_key().as_str()).map(|(_, v)| v)
    }

    /// Get a mutable reference to the value stored under the given key.
    pub fn get_mut<Q: HashKey + ?Sized>(&mut self, key: &Q) -> Option<&mut V> {
        self.inner.get_mut(key.hash_key().as_str()).map(|(_, v)| v)
    }

    /// Whether any entry shares the given key.
    pub fn contains_key<Q: HashKey + ?Sized>(&self, key: &Q) -> bool {
        self.inner.contains_key(key.hash_key().as_str())
    }

    /// Remove the entry sharing the given key, returning its value.
    ///
    /// Preserves the insertion order of the remaining entries.
    pub fn remove<Q: HashKey + ?Sized>(&mut self, key: &Q) -> Option<V> {
        self.inner
            .shift_remove(key.hash_key().as_str())
            .map(|(_, v)| v)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.inner.values().map(|(k, _)| k)
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.inner.values().map(|(_, v)| v)
    }

    /// Key/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.inner.values().map(|(k, v)| (k, v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<K: HashKey, V> Default for KeyedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> std::fmt::Debug for KeyedMap<K, V>
where
    K: HashKey + std::fmt::Debug,
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

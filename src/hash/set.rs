//! Insertion-ordered set keyed by [`HashKey`].

use indexmap::IndexMap;
use indexmap::map::Entry;

use super::HashKey;

/// A set whose membership is defined by the element's derived hash key.
///
/// Backed by an insertion-ordered map from key to stored value, so
/// `iter()` yields members in the order they were first inserted.
#[derive(Clone)]
pub struct KeyedSet<T> {
    inner: IndexMap<String, T>,
}

impl<T: HashKey> KeyedSet<T> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            inner: IndexMap::new(),
        }
    }

    /// Create a set with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert a value. Returns `true` iff no member shared its key.
    pub fn insert(&mut self, value: T) -> bool {
        match self.inner.entry(value.hash_key()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    /// Whether a member shares the given value's key.
    pub fn contains<Q: HashKey + ?Sized>(&self, value: &Q) -> bool {
        self.inner.contains_key(value.hash_key().as_str())
    }

    /// Remove the member sharing the given value's key, returning it.
    ///
    /// Preserves the insertion order of the remaining members.
    pub fn remove<Q: HashKey + ?Sized>(&mut self, value: &Q) -> Option<T> {
        self.inner.shift_remove(value.hash_key().as_str())
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.inner.values()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Remove all members.
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<T: HashKey> Default for KeyedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Two sets are equal iff they contain exactly the same keys. The stored
/// values may differ structurally as long as their keys agree.
impl<T: HashKey> PartialEq for KeyedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.len() == other.inner.len()
            && self.inner.keys().all(|key| other.inner.contains_key(key))
    }
}

impl<T: HashKey> Eq for KeyedSet<T> {}

impl<T: HashKey> FromIterator<T> for KeyedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<T: HashKey> Extend<T> for KeyedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: HashKey> IntoIterator for &'a KeyedSet<T> {
    type Item = &'a T;
    type IntoIter = indexmap::map::Values<'a, String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.values()
    }
}

impl<T: HashKey> IntoIterator for KeyedSet<T> {
    type Item = T;
    type IntoIter = indexmap::map::IntoValues<String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_values()
    }
}

impl<T: HashKey + std::fmt::Debug> std::fmt::Debug for KeyedSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

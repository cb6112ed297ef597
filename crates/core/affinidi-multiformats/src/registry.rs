//! Immutable tag-keyed registries
//!
//! Both multibase encodings (keyed by a prefix character) and multihash
//! algorithms (keyed by a one-byte code) are looked up through a [`Registry`].
//! A registry is built once from a fixed list and never mutated afterwards, so
//! it can be shared freely between threads.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use tracing::trace;

use crate::EncodingError;

/// An entry that can be stored in a [`Registry`]
pub trait Tagged: Copy + 'static {
    /// Key identifying the entry, unique within a registry
    type Tag: Copy + Eq + Hash + fmt::Debug;

    fn tag(&self) -> Self::Tag;
}

/// Read-only lookup table from tag to entry
#[derive(Debug, Clone)]
pub struct Registry<T: Tagged> {
    entries: Vec<T>,
    index: HashMap<T::Tag, T>,
}

impl<T: Tagged> Registry<T> {
    /// Builds a registry, rejecting any two entries that share a tag
    pub fn new(entries: impl IntoIterator<Item = T>) -> Result<Self, EncodingError> {
        let entries: Vec<T> = entries.into_iter().collect();
        let mut index = HashMap::with_capacity(entries.len());

        for entry in &entries {
            let tag = entry.tag();
            if index.insert(tag, *entry).is_some() {
                return Err(EncodingError::DuplicateTag(format!("{tag:?}")));
            }
        }

        trace!(entries = entries.len(), "registry built");
        Ok(Self { entries, index })
    }

    /// Finds the entry registered under `tag`
    pub fn lookup(&self, tag: T::Tag) -> Option<T> {
        self.index.get(&tag).copied()
    }

    /// All entries in registration order
    pub fn all(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Entry(u8, &'static str);

    impl Tagged for Entry {
        type Tag = u8;

        fn tag(&self) -> u8 {
            self.0
        }
    }

    #[test]
    fn test_lookup() {
        let registry = Registry::new([Entry(1, "one"), Entry(2, "two")]).unwrap();
        assert_eq!(registry.lookup(2), Some(Entry(2, "two")));
        assert_eq!(registry.lookup(3), None);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_preserves_order() {
        let registry = Registry::new([Entry(9, "nine"), Entry(1, "one")]).unwrap();
        assert_eq!(registry.all(), &[Entry(9, "nine"), Entry(1, "one")]);
    }

    #[test]
    fn test_duplicate_tag() {
        let result = Registry::new([Entry(7, "first"), Entry(7, "second")]);
        assert!(matches!(
            result.unwrap_err(),
            EncodingError::DuplicateTag(tag) if tag == "7"
        ));
    }

    #[test]
    fn test_empty() {
        let registry = Registry::<Entry>::new([]).unwrap();
        assert!(registry.is_empty());
        assert!(registry.all().is_empty());
    }
}

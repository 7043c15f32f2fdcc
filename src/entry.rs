//! Resident cache entries.
//!
//! Every key/value pair held by a [`RecencyCache`](crate::RecencyCache) lives in
//! a [`CacheEntry`] inside the recency list. The key is stored with the entry so
//! an evicted entry can be unlinked from the lookup map and handed back whole.

extern crate alloc;

use crate::value::ByteSize;
use alloc::string::String;
use core::fmt;

/// A key/value pair resident in the cache.
pub(crate) struct CacheEntry<V> {
    /// The cached key
    pub key: String,

    /// The cached value
    pub value: V,
}

impl<V> CacheEntry<V> {
    #[inline]
    pub fn new(key: String, value: V) -> Self {
        Self { key, value }
    }

    /// Consumes the entry, yielding its parts.
    #[inline]
    pub fn into_parts(self) -> (String, V) {
        (self.key, self.value)
    }
}

impl<V: ByteSize> CacheEntry<V> {
    /// Bytes this entry counts against the budget: key length plus value size.
    ///
    /// Measures the value, so call it once per accounting event.
    #[inline]
    pub fn charge(&self) -> u64 {
        charge_of(&self.key, &self.value)
    }
}

/// Budget charge for a key/value pair that may not be stored yet.
#[inline]
pub(crate) fn charge_of<V: ByteSize + ?Sized>(key: &str, value: &V) -> u64 {
    (key.len() as u64).saturating_add(value.byte_size() as u64)
}

impl<V: fmt::Debug> fmt::Debug for CacheEntry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn test_charge_counts_key_and_value() {
        let entry = CacheEntry::new(String::from("key"), vec![0u8; 10]);
        assert_eq!(entry.charge(), 13);
    }

    #[test]
    fn test_charge_of_empty_pair() {
        assert_eq!(charge_of("", &Vec::<u8>::new()), 0);
        assert_eq!(charge_of("a", ""), 1);
    }

    #[test]
    fn test_into_parts() {
        let entry = CacheEntry::new(String::from("k"), String::from("v"));
        let (key, value) = entry.into_parts();
        assert_eq!(key, "k");
        assert_eq!(value, "v");
    }
}

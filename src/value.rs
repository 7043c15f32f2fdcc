//! Byte-size reporting for cached values.
//!
//! A [`RecencyCache`](crate::RecencyCache) charges every entry against its byte
//! budget. The charge is the key length plus whatever the value reports through
//! [`ByteSize`]. The cache never looks inside a value for anything else.
//!
//! # Contract
//!
//! `byte_size` must be pure: the same value must report the same size every
//! time it is asked. The cache measures a value once when it is added and once
//! more when it is replaced, evicted or removed, and relies on both answers
//! matching. A value mutated in place through
//! [`get_mut`](crate::RecencyCache::get_mut) is measured before and after the
//! mutation, and the difference is applied to the byte total.
//!
//! # Examples
//!
//! ```
//! use recency_cache::{ByteSize, RecencyCache};
//!
//! struct Page {
//!     body: Vec<u8>,
//!     etag: String,
//! }
//!
//! impl ByteSize for Page {
//!     fn byte_size(&self) -> usize {
//!         self.body.len() + self.etag.len()
//!     }
//! }
//!
//! let mut cache = RecencyCache::new(1024);
//! cache.add("/index.html", Page { body: vec![0; 100], etag: "abc".into() });
//! assert_eq!(cache.used_bytes(), 11 + 103);
//! ```

extern crate alloc;

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// A value that can report its logical size in bytes.
pub trait ByteSize {
    /// Returns the number of bytes this value occupies for budget accounting.
    fn byte_size(&self) -> usize;
}

impl ByteSize for str {
    #[inline]
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl ByteSize for String {
    #[inline]
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl ByteSize for [u8] {
    #[inline]
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl ByteSize for Vec<u8> {
    #[inline]
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl<const N: usize> ByteSize for [u8; N] {
    #[inline]
    fn byte_size(&self) -> usize {
        N
    }
}

impl ByteSize for Cow<'_, str> {
    #[inline]
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl ByteSize for Cow<'_, [u8]> {
    #[inline]
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl<T: ByteSize + ?Sized> ByteSize for &T {
    #[inline]
    fn byte_size(&self) -> usize {
        (**self).byte_size()
    }
}

impl<T: ByteSize + ?Sized> ByteSize for Box<T> {
    #[inline]
    fn byte_size(&self) -> usize {
        (**self).byte_size()
    }
}

// Shared payloads are charged in full to every cache entry that holds them.
impl<T: ByteSize + ?Sized> ByteSize for Rc<T> {
    #[inline]
    fn byte_size(&self) -> usize {
        (**self).byte_size()
    }
}

impl<T: ByteSize + ?Sized> ByteSize for Arc<T> {
    #[inline]
    fn byte_size(&self) -> usize {
        (**self).byte_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_string_like_sizes() {
        assert_eq!("abc".byte_size(), 3);
        assert_eq!(String::from("hello").byte_size(), 5);
        // utf-8 length, not char count
        assert_eq!("é".byte_size(), 2);
        assert_eq!(Cow::Borrowed("xy").byte_size(), 2);
    }

    #[test]
    fn test_byte_sizes() {
        assert_eq!(vec![0u8; 16].byte_size(), 16);
        assert_eq!([0u8; 4].byte_size(), 4);
        assert_eq!((&[1u8, 2, 3][..]).byte_size(), 3);
        let owned: Cow<'_, [u8]> = Cow::Owned(vec![1, 2]);
        assert_eq!(owned.byte_size(), 2);
    }

    #[test]
    fn test_smart_pointers_delegate() {
        let boxed: Box<str> = "four".into();
        assert_eq!(boxed.byte_size(), 4);
        let shared: Arc<[u8]> = Arc::from(vec![0u8; 8]);
        assert_eq!(shared.byte_size(), 8);
        assert_eq!(Rc::new(String::from("rc")).byte_size(), 2);
    }
}

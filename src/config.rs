//! Cache Configuration
//!
//! Configuration for [`RecencyCache`](crate::RecencyCache) and, with the
//! `concurrent` feature, `ConcurrentRecencyCache`. The struct has public fields
//! so it can be written out in full at the call site:
//!
//! ```
//! use recency_cache::config::RecencyCacheConfig;
//! use recency_cache::RecencyCache;
//!
//! let config = RecencyCacheConfig {
//!     max_bytes: 64 * 1024 * 1024, // 64MB
//! };
//! let cache: RecencyCache<Vec<u8>> = RecencyCache::init(config, None);
//! assert_eq!(cache.max_bytes(), 64 * 1024 * 1024);
//! ```
//!
//! # Sizing Guidelines
//!
//! `max_bytes` bounds the *logical* size of the cache: the sum over resident
//! entries of the key length plus the size each value reports through
//! [`ByteSize`](crate::ByteSize). It does not include bookkeeping overhead,
//! which is roughly one hash map slot plus one list node per entry:
//!
//! ```text
//! Total Memory ≈ max_bytes + (entries × overhead_per_entry)
//! overhead_per_entry ≈ 48-80 bytes (list links, map slot, key header)
//! ```
//!
//! For many tiny entries the overhead can dominate, so budget accordingly.
//!
//! # Unbounded Mode
//!
//! `max_bytes: 0` disables eviction entirely. The cache then grows without
//! limit and entries leave it only through `remove`, `remove_oldest` or
//! `clear`.

use core::fmt;

/// Configuration for a [`RecencyCache`](crate::RecencyCache).
///
/// # Fields
///
/// - `max_bytes`: byte budget for resident entries. `0` means unbounded.
///
/// # Examples
///
/// ```
/// use recency_cache::config::RecencyCacheConfig;
///
/// let bounded = RecencyCacheConfig { max_bytes: 10 * 1024 };
/// assert!(bounded.is_bounded());
///
/// let unbounded = RecencyCacheConfig::default();
/// assert!(!unbounded.is_bounded());
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct RecencyCacheConfig {
    /// Maximum total charge (key bytes + value bytes) of resident entries.
    /// Zero disables eviction.
    pub max_bytes: u64,
}

impl RecencyCacheConfig {
    /// Returns true if this configuration enforces a byte budget.
    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.max_bytes != 0
    }

    /// Returns true if `used_bytes` is over this configuration's budget.
    #[inline]
    pub(crate) fn is_exceeded_by(&self, used_bytes: u64) -> bool {
        self.is_bounded() && used_bytes > self.max_bytes
    }
}

impl fmt::Debug for RecencyCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecencyCacheConfig")
            .field("max_bytes", &self.max_bytes)
            .finish()
    }
}

//! Byte-fold hashing for bucket placement.
//!
//! [`BucketMap`](crate::BucketMap) never hashes keys itself: callers compute
//! a bucket index with [`fold_hash`] (or a [`FoldHasher`] when the key
//! arrives one byte at a time) and pass it to every map call. The fold is
//! position-sensitive, so reordering the characters of a key changes its
//! bucket.

/// Multiplier applied after every byte of the fold.
pub const FOLD_MULTIPLIER: usize = 17;

/// Maps `key` to a bucket index in `[0, buckets)`.
///
/// Folds the key left to right: `acc = (acc + byte) * 17 % buckets`,
/// starting from 0. Deterministic, order-sensitive, not commutative.
///
/// # Examples
/// ```rust
/// use ordered_buckets::fold_hash;
///
/// assert_eq!(fold_hash("rn", 256), 0);
/// assert_eq!(fold_hash("qp", 256), 1);
/// assert_ne!(fold_hash("ab", 256), fold_hash("ba", 256));
/// ```
pub fn fold_hash(key: &str, buckets: usize) -> usize {
    let mut hasher = FoldHasher::new(buckets);
    for byte in key.bytes() {
        hasher.write(byte);
    }
    hasher.finish()
}

/// The running state of the fold.
///
/// [`fold_hash`] drives one of these over a whole key; callers that see a
/// key byte by byte (e.g. a tokenizer that hashes while it scans) can feed
/// [`write`] directly and read the bucket with [`finish`].
///
/// [`write`]: FoldHasher::write
/// [`finish`]: FoldHasher::finish
#[derive(Debug, Clone, Copy)]
pub struct FoldHasher {
    acc: usize,
    buckets: usize,
}

impl FoldHasher {
    /// Creates a hasher producing indices in `[0, buckets)`.
    pub fn new(buckets: usize) -> Self {
        debug_assert!(buckets > 0);
        Self { acc: 0, buckets }
    }

    /// Folds one byte into the running index.
    pub fn write(&mut self, byte: u8) {
        self.acc = (self.acc + byte as usize) * FOLD_MULTIPLIER % self.buckets;
    }

    /// Returns the bucket index for the bytes written so far.
    pub fn finish(&self) -> usize {
        self.acc
    }

    /// Resets the hasher for the next key.
    pub fn reset(&mut self) {
        self.acc = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_hash_known_buckets() {
        // Reference values for the 256-bucket fold.
        assert_eq!(fold_hash("rn", 256), 0);
        assert_eq!(fold_hash("cm", 256), 0);
        assert_eq!(fold_hash("qp", 256), 1);
        assert_eq!(fold_hash("pc", 256), 3);
        assert_eq!(fold_hash("ot", 256), 3);
        assert_eq!(fold_hash("ab", 256), 3);
    }

    #[test]
    fn test_fold_hash_order_sensitive() {
        assert_ne!(fold_hash("ab", 256), fold_hash("ba", 256));
        assert_ne!(fold_hash("abc", 256), fold_hash("cab", 256));
    }

    #[test]
    fn test_fold_hash_empty_key() {
        assert_eq!(fold_hash("", 256), 0);
    }

    #[test]
    fn test_fold_hash_respects_bucket_count() {
        for buckets in [1, 2, 7, 64, 256] {
            for key in ["rn", "cm", "zyxwvuts"] {
                assert!(fold_hash(key, buckets) < buckets);
            }
        }
    }

    #[test]
    fn test_fold_hasher_matches_one_shot() {
        let keys = ["rn", "cm", "qp", "pc", "ot", "ab", "x", "abcdefgh"];
        for key in keys {
            let mut hasher = FoldHasher::new(256);
            for byte in key.bytes() {
                hasher.write(byte);
            }
            assert_eq!(hasher.finish(), fold_hash(key, 256), "key {key:?}");
        }
    }

    #[test]
    fn test_fold_hasher_reset() {
        let mut hasher = FoldHasher::new(256);
        for byte in b"rn" {
            hasher.write(*byte);
        }
        hasher.reset();
        for byte in b"qp" {
            hasher.write(*byte);
        }
        assert_eq!(hasher.finish(), fold_hash("qp", 256));
    }
}

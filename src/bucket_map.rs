//! Fixed-capacity, bucket-chained map that preserves bucket activation
//! order.
//!
//! Provides [`BucketMap`] — `N` buckets over a fixed pool of `P` entries.
//! Entries that hash to the same bucket form a singly linked chain in
//! insertion order; the set of non-empty ("active") buckets is threaded
//! into a doubly linked list in the order the buckets first became
//! non-empty, so a full traversal needs no separate ordered index.
//!
//! The map never hashes: every call takes a bucket index the caller
//! computed with [`fold_hash`](crate::fold_hash) (or any other function
//! yielding indices in `[0, N)`).

use core::iter::FusedIterator;

use crate::arena::{Arena, SlotIndex};

/// Maximum key length in bytes.
pub const KEY_CAPACITY: usize = 8;

/// Bounded map key. Lives inline, no heap allocation.
pub type Key = heapless::String<KEY_CAPACITY>;

/// A live key/value pair, owned by the chain of the bucket it hashed to.
#[derive(Debug, Clone)]
pub struct Entry {
    key: Key,
    value: u32,
    /// Next entry in the same bucket's chain.
    next: Option<SlotIndex>,
}

impl Entry {
    /// The entry's key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The entry's current value.
    pub fn value(&self) -> u32 {
        self.value
    }
}

/// One slot of the fixed bucket array.
///
/// `prev`/`next` thread the active-bucket list through the array itself;
/// they are structural links only and never own entries.
#[derive(Debug, Clone, Copy)]
struct Bucket {
    /// First entry of the chain, or `None` while the bucket is inactive.
    head: Option<SlotIndex>,
    /// Toward the next-older active bucket.
    next: Option<u16>,
    /// Toward the next-newer active bucket.
    prev: Option<u16>,
}

impl Bucket {
    const EMPTY: Bucket = Bucket {
        head: None,
        next: None,
        prev: None,
    };
}

/// A **fixed-capacity**, bucket-chained map over bounded string keys that
/// preserves the order in which buckets first became non-empty.
///
/// # Architecture & Pseudocode
/// Three pieces, all of fixed size for the lifetime of the map:
///
/// - `buckets`: `[Bucket; N]` — chain heads plus the intrusive
///   `prev`/`next` links of the active-bucket list.
/// - `entries`: an arena of at most `P` entries addressed by stable `u16`
///   indices; chains link through `Entry::next`.
/// - `first`/`last`: head and tail of the active-bucket list. The head is
///   the **most recently** activated bucket; the tail is the oldest.
///
/// ## Insert Algorithm
/// ```text
/// 1. Walk the chain of `bucket` comparing full keys.
///    a. Match: overwrite the value in place, return `Ok(Some(old))`.
///       No links change; the entry keeps its chain position and the
///       bucket keeps its activation position.
/// 2. No match: allocate an entry from the pool.
///    a. Pool saturated: return `Err((key, value))`; the map is unchanged.
/// 3. Append the entry at the chain tail.
/// 4. If the chain was empty, link `bucket` at the head of the active
///    list (it just became the most recently activated bucket).
/// 5. Return `Ok(None)`.
/// ```
///
/// ## Remove Algorithm
/// ```text
/// 1. Walk the chain of `bucket` comparing full keys; absent key is a
///    no-op returning `None`.
/// 2. Splice the matching entry out of the chain; siblings keep their
///    relative order.
/// 3. If the chain is now empty, unlink `bucket` from the active list
///    (O(1): fix both neighbors, advance head/tail as needed).
/// 4. Release the entry's pool slot and return its value.
/// ```
///
/// # Generic parameters
/// | Parameter | Meaning |
/// |-----------|---------|
/// | `N` | Bucket count; callers must pass bucket indices `< N` |
/// | `P` | Entry pool size — max live entries before inserts fail |
///
/// # Calling convention
/// Every operation takes a precomputed bucket index. Compute it per call
/// with [`fold_hash`](crate::fold_hash); the map does not cache hashes on
/// entries.
///
/// # Examples
/// ```rust
/// use ordered_buckets::{fold_hash, BucketMap, Key};
///
/// let mut map: BucketMap<64, 16> = BucketMap::new();
/// let key = Key::try_from("ab").unwrap();
/// let bucket = fold_hash(&key, 64);
///
/// map.insert(key, bucket, 5).unwrap();
/// assert_eq!(map.get("ab", bucket), Some(&5));
///
/// map.remove("ab", bucket);
/// assert!(map.is_empty());
/// ```
#[derive(Debug)]
pub struct BucketMap<const N: usize, const P: usize> {
    buckets: [Bucket; N],
    /// Most recently activated bucket (list head).
    first: Option<u16>,
    /// Oldest activated bucket (list tail); traversal starts here.
    last: Option<u16>,
    entries: Arena<Entry, P>,
}

impl<const N: usize, const P: usize> BucketMap<N, P> {
    /// The maximum allowed inline size in bytes (64 KB).
    ///
    /// The bucket array and the entry pool are stored inline, so a large
    /// `N` or `P` can blow the thread stack. This limit fails the build
    /// instead.
    pub const MAX_STACK_SIZE: usize = 64 * 1024;

    /// Creates an empty map. No allocation occurs.
    ///
    /// # Compile-Time Safety Check
    /// The build fails if `N` or `P` exceeds `u16::MAX` (indices are
    /// `u16`) or if the whole struct exceeds
    /// [`MAX_STACK_SIZE`](Self::MAX_STACK_SIZE).
    ///
    /// # How to fix the build error
    /// 1. **Reduce `N` or `P`** if the bounds are larger than the workload
    ///    needs.
    /// 2. **Box the map** (`Box::new(BucketMap::new())`) when a large pool
    ///    is genuinely required; the limit guards the inline footprint,
    ///    and a boxed map still never reallocates.
    pub fn new() -> Self {
        const {
            assert!(N > 0, "BucketMap needs at least one bucket");
            assert!(
                N <= u16::MAX as usize && P <= u16::MAX as usize,
                "BucketMap indices are u16; N and P must fit"
            );
            assert!(
                core::mem::size_of::<Self>() <= BucketMap::<N, P>::MAX_STACK_SIZE,
                "BucketMap is too large! The inline size exceeds the 64KB safety limit. \
                 Solution: reduce N or P, or allocate the map with Box::new."
            );
        }

        Self {
            buckets: [Bucket::EMPTY; N],
            first: None,
            last: None,
            entries: Arena::new(),
        }
    }

    /// Number of live entries across all buckets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if no bucket holds an entry.
    pub fn is_empty(&self) -> bool {
        self.entries.len() == 0
    }

    /// `true` once the entry pool is saturated.
    ///
    /// When `is_full()` returns `true`, inserting a *new* key will return
    /// `Err`; updating an existing key still succeeds.
    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    /// Inserts or updates a key/value pair in `bucket`.
    ///
    /// # Returns
    /// | Variant | Meaning |
    /// |---------|---------|
    /// | `Ok(Some(old))` | Key existed; value overwritten in place, old value returned. No order changes. |
    /// | `Ok(None)` | Key was new; entry appended at the chain tail. A first entry activates the bucket. |
    /// | `Err((key, value))` | Entry pool saturated; the map is unchanged and the pair is handed back. |
    ///
    /// # Complexity
    /// O(chain length) — one full-key scan of the bucket's chain.
    pub fn insert(&mut self, key: Key, bucket: usize, value: u32) -> Result<Option<u32>, (Key, u32)> {
        debug_assert!(bucket < N, "bucket index {bucket} out of range");

        let mut tail = None;
        let mut cursor = self.buckets[bucket].head;
        while let Some(index) = cursor {
            let entry = self.entries.get_mut(index);
            if entry.key == key {
                let old = entry.value;
                entry.value = value;
                return Ok(Some(old));
            }
            tail = Some(index);
            cursor = entry.next;
        }

        let index = self
            .entries
            .alloc(Entry {
                key,
                value,
                next: None,
            })
            .map_err(|entry| (entry.key, entry.value))?;

        match tail {
            Some(tail) => self.entries.get_mut(tail).next = Some(index),
            None => {
                self.buckets[bucket].head = Some(index);
                self.activate(bucket as u16);
            }
        }
        Ok(None)
    }

    /// Removes `key` from `bucket`, returning its value.
    ///
    /// Absent keys are a silent no-op (`None`); the traversal output is
    /// observably unchanged. Removing the last entry of a bucket unlinks
    /// the bucket from the active list; removing any other entry keeps the
    /// remaining chain in its relative order.
    pub fn remove(&mut self, key: &str, bucket: usize) -> Option<u32> {
        debug_assert!(bucket < N, "bucket index {bucket} out of range");

        let mut prev: Option<SlotIndex> = None;
        let mut cursor = self.buckets[bucket].head;
        while let Some(index) = cursor {
            let entry = self.entries.get(index);
            if entry.key.as_str() == key {
                let next = entry.next;
                match prev {
                    Some(prev) => self.entries.get_mut(prev).next = next,
                    None => {
                        self.buckets[bucket].head = next;
                        if next.is_none() {
                            self.deactivate(bucket as u16);
                        }
                    }
                }
                return Some(self.entries.free(index).value);
            }
            prev = cursor;
            cursor = entry.next;
        }
        None
    }

    /// Shared reference to the value stored for `key` in `bucket`.
    pub fn get(&self, key: &str, bucket: usize) -> Option<&u32> {
        debug_assert!(bucket < N, "bucket index {bucket} out of range");

        let mut cursor = self.buckets[bucket].head;
        while let Some(index) = cursor {
            let entry = self.entries.get(index);
            if entry.key.as_str() == key {
                return Some(&entry.value);
            }
            cursor = entry.next;
        }
        None
    }

    /// Exclusive reference to the value stored for `key` in `bucket`.
    pub fn get_mut(&mut self, key: &str, bucket: usize) -> Option<&mut u32> {
        debug_assert!(bucket < N, "bucket index {bucket} out of range");

        let mut cursor = self.buckets[bucket].head;
        while let Some(index) = cursor {
            // Re-borrow per step keeps the chain walk simple.
            if self.entries.get(index).key.as_str() == key {
                return Some(&mut self.entries.get_mut(index).value);
            }
            cursor = self.entries.get(index).next;
        }
        None
    }

    /// `true` if `bucket`'s chain holds an entry for `key`.
    pub fn contains_key(&self, key: &str, bucket: usize) -> bool {
        self.get(key, bucket).is_some()
    }

    /// Releases every entry, resets every bucket and the active list.
    pub fn clear(&mut self) {
        // Dropping the pool releases all chains at once; buckets only need
        // their links reset.
        for bucket in self.buckets.iter_mut() {
            *bucket = Bucket::EMPTY;
        }
        self.first = None;
        self.last = None;
        self.entries.clear();
    }

    /// Iterates all live entries as `(bucket_index, slot, entry)`.
    ///
    /// Active buckets are visited oldest-activated first; within a bucket
    /// the chain is visited in insertion order with a 1-based `slot`
    /// counter. Single pass, read-only.
    pub fn iter(&self) -> Iter<'_, N, P> {
        Iter {
            map: self,
            bucket: self.last,
            entry: self.last.and_then(|b| self.buckets[b as usize].head),
            slot: 0,
        }
    }

    /// Links a just-activated bucket at the head of the active list.
    ///
    /// The most recently activated bucket is the new list head; the
    /// positions of the other active buckets are untouched.
    fn activate(&mut self, bucket: u16) {
        self.buckets[bucket as usize].next = self.first;
        self.buckets[bucket as usize].prev = None;
        match self.first {
            Some(head) => self.buckets[head as usize].prev = Some(bucket),
            None => self.last = Some(bucket),
        }
        self.first = Some(bucket);
    }

    /// Unlinks a just-emptied bucket from the active list in O(1).
    fn deactivate(&mut self, bucket: u16) {
        let Bucket { prev, next, .. } = self.buckets[bucket as usize];
        match prev {
            Some(newer) => self.buckets[newer as usize].next = next,
            None => self.first = next,
        }
        match next {
            Some(older) => self.buckets[older as usize].prev = prev,
            None => self.last = prev,
        }
        self.buckets[bucket as usize] = Bucket::EMPTY;
    }
}

impl<const N: usize, const P: usize> Default for BucketMap<N, P> {
    /// Creates an empty map. Equivalent to [`BucketMap::new`].
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over `(bucket_index, slot, entry)` in activation order.
///
/// Produced by [`BucketMap::iter`]. Walks the active-bucket list from its
/// tail (the oldest-activated bucket) toward its head over the `prev`
/// links, then each chain front to back.
#[derive(Debug)]
pub struct Iter<'a, const N: usize, const P: usize> {
    map: &'a BucketMap<N, P>,
    bucket: Option<u16>,
    entry: Option<SlotIndex>,
    slot: usize,
}

impl<'a, const N: usize, const P: usize> Iterator for Iter<'a, N, P> {
    type Item = (usize, usize, &'a Entry);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let bucket = self.bucket?;
            if let Some(index) = self.entry {
                let entry = self.map.entries.get(index);
                self.slot += 1;
                self.entry = entry.next;
                return Some((bucket as usize, self.slot, entry));
            }
            // Chain exhausted: step toward the next-newer active bucket.
            self.bucket = self.map.buckets[bucket as usize].prev;
            self.entry = self
                .bucket
                .and_then(|b| self.map.buckets[b as usize].head);
            self.slot = 0;
        }
    }
}

impl<const N: usize, const P: usize> FusedIterator for Iter<'_, N, P> {}

impl<'a, const N: usize, const P: usize> IntoIterator for &'a BucketMap<N, P> {
    type Item = (usize, usize, &'a Entry);
    type IntoIter = Iter<'a, N, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

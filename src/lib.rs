//! # Ordered Buckets
//!
//! A fixed-capacity, bucket-chained hash map that preserves **bucket
//! activation order**, plus the fold hasher and instruction-stream driver
//! of the box/slot inventory simulation built on it.
//!
//! This crate provides [`BucketMap`], [`fold_hash`]/[`FoldHasher`], and the
//! [`inventory`] module. Unlike an insertion-order map, `BucketMap` orders
//! its traversal by *bucket*: all entries of the bucket that first became
//! non-empty earliest come first, in chain insertion order, then the next
//! bucket, and so on. Updating a key never moves it; emptying a bucket and
//! refilling it gives the bucket a fresh activation position.
//!
//! ## Key Features
//!
//! * **Fixed capacity:** `N` buckets and a pool of `P` entries, both
//!   compile-time bounds. The map never reallocates; a saturated pool is a
//!   reported, testable failure, not a silent resize.
//! * **Caller-side hashing:** every operation takes a precomputed bucket
//!   index, recomputed per call with [`fold_hash`]. The map stores no hash.
//! * **O(1) bookkeeping:** the active-bucket list is threaded through the
//!   bucket array itself; activation and deactivation are constant time.
//! * **Inline storage:** keys are bounded [`Key`] strings (`heapless`), so
//!   no per-entry heap allocation occurs.
//!
//! ## Examples
//!
//! ### Driving the map directly
//!
//! ```rust
//! use ordered_buckets::{fold_hash, BucketMap, Key};
//!
//! let mut map: BucketMap<64, 16> = BucketMap::new();
//!
//! for (name, value) in [("rn", 1), ("qp", 3), ("ab", 5)] {
//!     let key = Key::try_from(name).unwrap();
//!     let bucket = fold_hash(&key, 64);
//!     map.insert(key, bucket, value).unwrap();
//! }
//!
//! map.remove("qp", fold_hash("qp", 64));
//! assert_eq!(map.len(), 2);
//!
//! for (bucket, slot, entry) in map.iter() {
//!     println!("box {bucket}, slot {slot}: {} = {}", entry.key(), entry.value());
//! }
//! ```
//!
//! ### Running an instruction stream
//!
//! ```rust
//! use ordered_buckets::inventory::{self, InventoryMap};
//!
//! let mut map = Box::new(InventoryMap::new());
//! inventory::run("rn=1,cm-,qp=3,cm=2,qp-,pc=4,ot=9,ab=5,pc-,pc=6,ot=7", &mut map).unwrap();
//! assert_eq!(inventory::checksum(&map), 145);
//! ```

// --- Module Declarations ---

mod arena;
pub mod bucket_map;
pub mod hash;
pub mod inventory;

// --- Re-exports ---

pub use bucket_map::{BucketMap, Entry, Iter, Key, KEY_CAPACITY};
pub use hash::{fold_hash, FoldHasher, FOLD_MULTIPLIER};
pub use inventory::{checksum, run, Instruction, InventoryMap, ParseError, RunError};

//! Box/slot inventory simulation over [`BucketMap`].
//!
//! The instruction stream is a comma-separated line of `<key>=<value>`
//! (insert or update) and `<key>-` (remove) tokens. [`run`] applies a
//! stream in arrival order, hashing each key with
//! [`fold_hash`](crate::fold_hash) immediately before the map call, and
//! [`checksum`] folds the final traversal into the weighted sum
//! `(bucket + 1) * slot * value`.

use core::fmt;
use std::error::Error;

use crate::bucket_map::{BucketMap, Key, KEY_CAPACITY};
use crate::hash::fold_hash;

/// Map dimensions used by the `inventory` binary: 256 buckets, room for
/// 1024 live entries. Large enough that it should be boxed, not kept on
/// the stack of a deep call frame.
pub type InventoryMap = BucketMap<256, 1024>;

/// One step of the instruction stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `<key>=<value>` — insert the key or overwrite its value.
    Assign { key: Key, value: u32 },
    /// `<key>-` — remove the key if present.
    Remove { key: Key },
}

impl Instruction {
    /// Parses one comma-free token, e.g. `ab=5` or `cm-`.
    pub fn parse(token: &str) -> Result<Self, ParseError> {
        if let Some((key, value)) = token.split_once('=') {
            let key = bounded_key(key)?;
            if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseError::BadValue);
            }
            let value = value.parse().map_err(|_| ParseError::BadValue)?;
            return Ok(Instruction::Assign { key, value });
        }
        if let Some(key) = token.strip_suffix('-') {
            return Ok(Instruction::Remove {
                key: bounded_key(key)?,
            });
        }
        Err(ParseError::MissingOp)
    }
}

fn bounded_key(raw: &str) -> Result<Key, ParseError> {
    if raw.is_empty() {
        return Err(ParseError::EmptyKey);
    }
    Key::try_from(raw).map_err(|_| ParseError::KeyTooLong)
}

/// Why a single instruction token failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Token has no key characters before the operator.
    EmptyKey,
    /// Key exceeds [`KEY_CAPACITY`] bytes.
    KeyTooLong,
    /// Token carries neither `=` nor a trailing `-`.
    MissingOp,
    /// `=` is not followed by a plain decimal integer that fits `u32`.
    BadValue,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyKey => f.write_str("instruction has no key"),
            ParseError::KeyTooLong => write!(f, "key exceeds {KEY_CAPACITY} bytes"),
            ParseError::MissingOp => f.write_str("instruction has no '=' or trailing '-'"),
            ParseError::BadValue => f.write_str("value is not a decimal integer"),
        }
    }
}

impl Error for ParseError {}

/// Splits a comma-separated stream into instructions.
///
/// Line breaks around tokens are tolerated (the stream may end in a
/// newline). Empty tokens are skipped, so a trailing comma or an entirely
/// empty stream yields no instructions — a comma only flushes whatever is
/// pending.
pub fn parse(stream: &str) -> impl Iterator<Item = Result<Instruction, ParseError>> + '_ {
    stream.split(',').filter_map(|token| {
        let token = token.trim_matches(['\n', '\r']);
        if token.is_empty() {
            None
        } else {
            Some(Instruction::parse(token))
        }
    })
}

/// Why an instruction stream was abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// A token failed to parse.
    Parse(ParseError),
    /// The map's entry pool is saturated. Fatal: the rejected instruction
    /// and everything after it are not applied, and the checksum of a
    /// partially-applied stream would be meaningless.
    MapFull { key: Key },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Parse(err) => write!(f, "malformed instruction: {err}"),
            RunError::MapFull { key } => write!(f, "out of entry slots while inserting {key:?}"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RunError::Parse(err) => Some(err),
            RunError::MapFull { .. } => None,
        }
    }
}

impl From<ParseError> for RunError {
    fn from(err: ParseError) -> Self {
        RunError::Parse(err)
    }
}

/// Applies an instruction stream to `map` in arrival order.
///
/// Each key is hashed over `N` buckets right before the call, matching the
/// map's precomputed-bucket contract. Stops at the first parse failure or
/// pool exhaustion; instructions applied before the failure remain in the
/// map.
pub fn run<const N: usize, const P: usize>(
    stream: &str,
    map: &mut BucketMap<N, P>,
) -> Result<(), RunError> {
    for instruction in parse(stream) {
        match instruction? {
            Instruction::Assign { key, value } => {
                let bucket = fold_hash(&key, N);
                map.insert(key, bucket, value)
                    .map_err(|(key, _)| RunError::MapFull { key })?;
            }
            Instruction::Remove { key } => {
                let bucket = fold_hash(&key, N);
                map.remove(&key, bucket);
            }
        }
    }
    Ok(())
}

/// Weighted sum over the live entries: `(bucket + 1) * slot * value`, with
/// buckets in activation order and 1-based slots in chain order.
pub fn checksum<const N: usize, const P: usize>(map: &BucketMap<N, P>) -> u64 {
    map.iter()
        .map(|(bucket, slot, entry)| (bucket as u64 + 1) * slot as u64 * u64::from(entry.value()))
        .sum()
}

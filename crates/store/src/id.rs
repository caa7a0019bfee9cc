//! ObjectId-shaped document identifiers.
//!
//! An id is 12 bytes: a 4-byte big-endian unix timestamp, 5 random bytes and
//! a 3-byte counter. Rendered as 24 lowercase hex characters, ids sort by
//! creation time both as bytes and as strings. Within one process the order
//! is exact for the first 2^24 ids; ids from different processes created in
//! the same second are ordered by their random part.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

use once_cell::sync::Lazy;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Length of an id rendered as hex.
pub const ID_HEX_LEN: usize = 24;

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// The process-wide random part, fixed for the lifetime of the process.
static PROCESS_UNIQUE: Lazy<[u8; 5]> = Lazy::new(|| {
    let seed = uuid::Uuid::new_v4();
    let bytes = seed.as_bytes();
    [bytes[0], bytes[1], bytes[2], bytes[3], bytes[4]]
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid document id '{0}': expected {ID_HEX_LEN} hex characters")]
pub struct InvalidId(pub String);

/// Identifier of a stored document.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId([u8; 12]);

impl DocumentId {
    /// Generate a fresh id for the current instant.
    pub fn new() -> Self {
        let secs = chrono::Utc::now().timestamp().clamp(0, i64::from(u32::MAX)) as u32;
        let count = COUNTER.fetch_add(1, Ordering::Relaxed) & 0x00ff_ffff;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Parse a 24-character hex id. Upper- and lowercase digits are accepted.
    pub fn parse(value: &str) -> Result<Self, InvalidId> {
        if value.len() != ID_HEX_LEN || !value.is_ascii() {
            return Err(InvalidId(value.to_string()));
        }

        let mut bytes = [0u8; 12];
        for (slot, pair) in bytes.iter_mut().zip(value.as_bytes().chunks_exact(2)) {
            let high = hex_value(pair[0]).ok_or_else(|| InvalidId(value.to_string()))?;
            let low = hex_value(pair[1]).ok_or_else(|| InvalidId(value.to_string()))?;
            *slot = (high << 4) | low;
        }
        Ok(Self(bytes))
    }

    /// Whether `value` has the shape of a document id.
    pub fn is_valid(value: &str) -> bool {
        Self::parse(value).is_ok()
    }

    /// Seconds since the unix epoch at which the id was generated.
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentId({self})")
    }
}

impl FromStr for DocumentId {
    type Err = InvalidId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DocumentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(DeError::custom)
    }
}

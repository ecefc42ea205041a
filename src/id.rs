//! Entity identifiers for Corkboard.
//!
//! Every stored record is keyed by a 24-character hex string built from 12
//! bytes: a 4-byte big-endian UNIX timestamp, 5 process-wide random bytes and
//! a 3-byte counter. Ids created elsewhere in the same shape (for example a
//! board creator that lives in another system) are accepted unchanged.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CorkboardError;

/// Length of an id in hex characters.
pub const ID_LENGTH: usize = 24;

const COUNTER_MASK: u32 = 0x00ff_ffff;

static COUNTER: AtomicU32 = AtomicU32::new(0);
static PROCESS_BYTES: OnceLock<[u8; 5]> = OnceLock::new();

/// Check whether `s` is a well-formed id (exactly 24 hex digits, any case).
pub fn is_valid_id(s: &str) -> bool {
    s.len() == ID_LENGTH && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Identifier of a user, board, membership, list or card.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(try_from = "String", into = "String")]
#[sqlx(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generate a fresh id.
    pub fn new() -> Self {
        let seconds = Utc::now().timestamp().clamp(0, i64::from(u32::MAX)) as u32;
        let process = PROCESS_BYTES.get_or_init(rand::random::<[u8; 5]>);
        let count = COUNTER.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(process);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);

        let hex = bytes.iter().map(|b| format!("{b:02x}")).collect::<String>();
        Self(hex)
    }

    /// Parse an id, normalizing it to lowercase.
    pub fn parse(s: &str) -> Result<Self, CorkboardError> {
        if is_valid_id(s) {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(CorkboardError::Validation(format!("invalid id: {s:?}")))
        }
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creation time encoded in the first four bytes.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let seconds = u32::from_str_radix(self.0.get(..8)?, 16).ok()?;
        DateTime::from_timestamp(i64::from(seconds), 0)
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = CorkboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EntityId {
    type Error = CorkboardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

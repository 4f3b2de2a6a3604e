//! Canonical pair key for undirected user relationships
//!
//! Every accumulation step in the system routes observations of `(A, B)`
//! and `(B, A)` through this type so they merge into a single record.
//! Ordering is lexicographic on the raw id strings, matching the TEXT
//! comparison the database performs on `user_id_lo`/`user_id_hi`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Snowflake;

/// Canonical unordered pair of distinct user ids
///
/// Invariant: `lo < hi` lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey {
    lo: Snowflake,
    hi: Snowflake,
}

impl PairKey {
    /// Canonicalize two user ids into a pair key
    ///
    /// Returns `None` when both ids are equal; a user never pairs with
    /// themselves.
    pub fn new(a: Snowflake, b: Snowflake) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { lo: a, hi: b }),
            std::cmp::Ordering::Greater => Some(Self { lo: b, hi: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Reconstruct a pair key from already-canonical parts
    ///
    /// Returns `None` unless `lo < hi`. Used when loading stored rows whose
    /// canonical order the database already enforces.
    pub fn from_canonical(lo: Snowflake, hi: Snowflake) -> Option<Self> {
        if lo < hi {
            Some(Self { lo, hi })
        } else {
            None
        }
    }

    /// Lexicographically smaller user id
    #[inline]
    pub fn lo(&self) -> &Snowflake {
        &self.lo
    }

    /// Lexicographically larger user id
    #[inline]
    pub fn hi(&self) -> &Snowflake {
        &self.hi
    }

    /// Render the composite string key `"lo:hi"`
    pub fn key(&self) -> String {
        format!("{}:{}", self.lo, self.hi)
    }

    /// Check whether `user_id` participates in this pair
    pub fn contains(&self, user_id: &Snowflake) -> bool {
        &self.lo == user_id || &self.hi == user_id
    }

    /// Given one participant, return the other
    ///
    /// Returns `None` when `user_id` is not part of the pair.
    pub fn other(&self, user_id: &Snowflake) -> Option<&Snowflake> {
        if &self.lo == user_id {
            Some(&self.hi)
        } else if &self.hi == user_id {
            Some(&self.lo)
        } else {
            None
        }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lo, self.hi)
    }
}

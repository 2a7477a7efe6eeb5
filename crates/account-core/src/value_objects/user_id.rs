//! User ID - unsigned identifier assigned by storage
//!
//! A freshly constructed account carries [`UserId::UNASSIGNED`] until the store
//! inserts it and hands back the real key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage-assigned primary key of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Placeholder carried by records that have never been inserted
    pub const UNASSIGNED: UserId = UserId(0);

    /// Create a new UserId from a raw value
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner u64 value
    #[inline]
    pub const fn into_inner(self) -> u64 {
        self.0
    }

    /// Check if the ID has not been assigned by storage yet
    #[inline]
    pub const fn is_unassigned(&self) -> bool {
        self.0 == 0
    }

    /// Value as stored in a signed BIGINT column
    ///
    /// `None` when the ID is above `i64::MAX` and so cannot name any row.
    #[inline]
    pub fn as_i64(self) -> Option<i64> {
        i64::try_from(self.0).ok()
    }

    /// Build from a signed BIGINT column value
    ///
    /// Negative values cannot come out of the sequence and map to `UNASSIGNED`.
    #[inline]
    pub fn from_i64(id: i64) -> Self {
        Self(u64::try_from(id).unwrap_or(0))
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, UserIdParseError> {
        s.parse::<u64>()
            .map(UserId)
            .map_err(|_| UserIdParseError::InvalidFormat)
    }
}

/// Error when parsing a UserId from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserIdParseError {
    #[error("invalid user id format")]
    InvalidFormat,
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<UserId> for u64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::str::FromStr for UserId {
    type Err = UserIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserId::parse(s)
    }
}

//! Opaque identifiers for sessions and participants.
//!
//! Both are UUID v4 strings when minted here. Client-supplied values are
//! accepted as opaque tokens: only blank or oversized input is rejected.

use std::fmt;

use uuid::Uuid;

use crate::errors::domain::{DomainError, ValidationKind};

/// Longest client-supplied id we accept.
pub const MAX_ID_LEN: usize = 128;

fn parse_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_ID_LEN {
        return None;
    }
    Some(trimmed.to_string())
}

/// Identifier of a session row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    /// Mint a fresh id. Needs no coordination with the store.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        parse_token(raw).map(Self).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidSessionId,
                "session_id must be a non-empty token",
            )
        })
    }

    /// Wrap a value read back from the store.
    pub(crate) fn from_stored(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity issued per join call. Not tied to a visitor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        parse_token(raw).map(Self).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidPlayerId,
                "player_id must be a non-empty token",
            )
        })
    }

    pub(crate) fn from_stored(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! Adventure log messages.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::character::CharacterId;

/// Message identity, unique for the lifetime of a session store.
///
/// Issued from a monotonically increasing counter; never derived from
/// timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human Dungeon Master.
    Dm,
    /// A party member; the message references its character.
    Player,
    /// Out-of-band notices.
    System,
}

/// A message before the session store has assigned it an identity.
///
/// History fetched from the remote service and turns built by the
/// coordinator both arrive in this shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    /// Author role.
    pub role: Role,
    /// Message text.
    pub content: String,
    /// Originating character; only present for `Role::Player`.
    pub character_id: Option<CharacterId>,
    /// Creation time, for display.
    pub timestamp: DateTime<Utc>,
}

impl MessageRecord {
    /// A DM narration message.
    #[must_use]
    pub fn dm(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: Role::Dm,
            content: content.into(),
            character_id: None,
            timestamp,
        }
    }

    /// A party member's response.
    #[must_use]
    pub fn player(
        character_id: CharacterId,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            role: Role::Player,
            content: content.into(),
            character_id: Some(character_id),
            timestamp,
        }
    }

    /// A system notice.
    #[must_use]
    pub fn system(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            character_id: None,
            timestamp,
        }
    }

    /// Attaches an identity, producing a log entry.
    #[must_use]
    pub fn into_message(self, id: MessageId) -> Message {
        Message {
            id,
            role: self.role,
            content: self.content,
            character_id: self.character_id,
            timestamp: self.timestamp,
        }
    }
}

/// One entry in the append-only adventure log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Identity within the session store.
    pub id: MessageId,
    /// Author role.
    pub role: Role,
    /// Message text.
    pub content: String,
    /// Originating character; only present for `Role::Player`.
    pub character_id: Option<CharacterId>,
    /// Creation time, for display.
    pub timestamp: DateTime<Utc>,
}

//! The session aggregate.

use std::fmt;

use dmscreen_core::campaign::Campaign;
use dmscreen_core::character::{Character, CharacterId};
use dmscreen_core::error::SessionError;
use dmscreen_core::message::{Message, Role};
use dmscreen_rules::domain::dice::DiceRollResult;
use indexmap::IndexMap;
use uuid::Uuid;

/// Identity of one session aggregate.
///
/// Every install and every reset produces a new instance. In-flight
/// operations carry the instance they were issued against so that late
/// results can be recognised and discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionInstance(Uuid);

impl SessionInstance {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Who a log entry is attributed to when displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Author {
    /// The human operator.
    DungeonMaster,
    /// A party member, by display name.
    Character(String),
    /// A player message whose character is not in the roster.
    Unknown,
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DungeonMaster => f.write_str("Dungeon Master"),
            Self::Character(name) => f.write_str(name),
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Snapshot of one session: campaign, party, adventure log and the
/// transient flags the rendering layer shows.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Identity of this aggregate.
    pub instance: SessionInstance,
    /// The loaded campaign; `None` until a campaign is started or resumed.
    pub campaign: Option<Campaign>,
    /// Party members keyed by identity, in roster order.
    pub party: IndexMap<CharacterId, Character>,
    /// The adventure log, in append order.
    pub messages: Vec<Message>,
    /// The most recent dice result. Replaced by every successful roll.
    pub dice_result: Option<DiceRollResult>,
    /// A narration round trip is pending.
    pub submission_in_flight: bool,
    /// A suggestion fetch is pending.
    pub suggestions_in_flight: bool,
    /// The most recent remote failure, cleared by the next success.
    pub last_error: Option<SessionError>,
}

impl SessionState {
    pub(crate) fn empty(instance: SessionInstance) -> Self {
        Self {
            instance,
            campaign: None,
            party: IndexMap::new(),
            messages: Vec::new(),
            dice_result: None,
            submission_in_flight: false,
            suggestions_in_flight: false,
            last_error: None,
        }
    }

    /// Returns `true` once a campaign has been installed.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.campaign.is_some()
    }

    /// Resolves the display author of a log entry. System notices have none.
    #[must_use]
    pub fn author_of(&self, message: &Message) -> Option<Author> {
        match message.role {
            Role::Dm => Some(Author::DungeonMaster),
            Role::System => None,
            Role::Player => Some(
                message
                    .character_id
                    .and_then(|id| self.party.get(&id))
                    .map_or(Author::Unknown, |character| {
                        Author::Character(character.name.clone())
                    }),
            ),
        }
    }
}

//! JSON shapes of the remote API and their conversion into domain records.
//!
//! The service omits or nulls optional fields and reports timestamps either
//! with an offset or as naive UTC, so payloads are decoded leniently here
//! and only then turned into domain types.

use chrono::{DateTime, NaiveDateTime, Utc};
use dmscreen_core::campaign::{Campaign, CampaignId};
use dmscreen_core::character::{AbilityScores, Character, CharacterId};
use dmscreen_core::error::SessionError;
use dmscreen_core::message::{MessageRecord, Role};
use dmscreen_core::service::PartyResponse;
use serde::{Deserialize, Serialize};

/// Parses RFC 3339, falling back to a naive datetime read as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .or_else(|_| parse_naive(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| parse_naive(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

fn parse_naive(raw: &str, format: &str) -> chrono::ParseResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, format).map(|at| at.and_utc())
}

#[derive(Debug, Deserialize)]
pub(crate) struct CampaignDto {
    id: CampaignId,
    name: String,
    #[serde(default)]
    description: Option<String>,
    party_size: u32,
    #[serde(default)]
    created_at: Option<String>,
}

impl CampaignDto {
    pub(crate) fn into_campaign(self) -> Campaign {
        Campaign {
            id: self.id,
            name: self.name,
            description: self.description.unwrap_or_default(),
            party_size: self.party_size,
            created_at: self.created_at.as_deref().and_then(parse_timestamp),
        }
    }
}

fn default_score() -> i32 {
    10
}

fn default_level() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub(crate) struct CharacterDto {
    id: CharacterId,
    name: String,
    race: String,
    char_class: String,
    #[serde(default = "default_level")]
    level: u32,
    #[serde(default = "default_score")]
    strength: i32,
    #[serde(default = "default_score")]
    dexterity: i32,
    #[serde(default = "default_score")]
    constitution: i32,
    #[serde(default = "default_score")]
    intelligence: i32,
    #[serde(default = "default_score")]
    wisdom: i32,
    #[serde(default = "default_score")]
    charisma: i32,
    max_hp: i32,
    current_hp: i32,
    #[serde(default = "default_score")]
    armor_class: i32,
    #[serde(default)]
    personality_traits: Option<Vec<String>>,
    #[serde(default)]
    background: Option<String>,
    #[serde(default)]
    inventory: Option<Vec<String>>,
}

impl CharacterDto {
    pub(crate) fn into_character(self) -> Character {
        Character {
            id: self.id,
            name: self.name,
            race: self.race,
            class: self.char_class,
            level: self.level,
            abilities: AbilityScores {
                strength: self.strength,
                dexterity: self.dexterity,
                constitution: self.constitution,
                intelligence: self.intelligence,
                wisdom: self.wisdom,
                charisma: self.charisma,
            },
            current_hp: self.current_hp,
            max_hp: self.max_hp,
            armor_class: self.armor_class,
            personality_traits: self.personality_traits.unwrap_or_default(),
            background: self.background.unwrap_or_default(),
            inventory: self.inventory.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageDto {
    role: Role,
    content: String,
    #[serde(default)]
    character_id: Option<CharacterId>,
    timestamp: String,
}

impl MessageDto {
    pub(crate) fn into_record(self) -> Result<MessageRecord, SessionError> {
        let timestamp = parse_timestamp(&self.timestamp).ok_or_else(|| {
            SessionError::MalformedResult(format!("unreadable timestamp {:?}", self.timestamp))
        })?;
        Ok(MessageRecord {
            role: self.role,
            content: self.content,
            character_id: self.character_id,
            timestamp,
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NarrationRequest<'a> {
    pub(crate) message: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NarrationResponse {
    pub(crate) party_responses: Vec<PartyResponse>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScenarioRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) context: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScenarioResponse {
    pub(crate) suggestions: Vec<String>,
}

/// Error body of a rejected request, e.g. `{"detail": "Campaign not found"}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) detail: serde_json::Value,
}

impl ErrorBody {
    pub(crate) fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

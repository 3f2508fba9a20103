//! Canned campaign and party records.

use chrono::{DateTime, TimeZone, Utc};
use dmscreen_core::campaign::{Campaign, CampaignId};
use dmscreen_core::character::{AbilityScores, Character, CharacterId};

/// Fixed timestamp used across tests.
///
/// # Panics
///
/// Never; the date is valid.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

/// A campaign with identity 1 and a party size of 2.
#[must_use]
pub fn sample_campaign() -> Campaign {
    Campaign {
        id: CampaignId(1),
        name: "The Lost Mines".to_owned(),
        description: "A tale of heroes seeking fortune and glory".to_owned(),
        party_size: 2,
        created_at: Some(fixed_now()),
    }
}

/// A level 1 character with average scores.
#[must_use]
pub fn character(id: i64, name: &str) -> Character {
    Character {
        id: CharacterId(id),
        name: name.to_owned(),
        race: "Human".to_owned(),
        class: "Fighter".to_owned(),
        level: 1,
        abilities: AbilityScores::default(),
        current_hp: 10,
        max_hp: 10,
        armor_class: 14,
        personality_traits: vec!["Brave".to_owned()],
        background: "Folk hero".to_owned(),
        inventory: vec!["Longsword".to_owned()],
    }
}

/// Two characters, Thorin (1) and Lyra (2), in that roster order.
#[must_use]
pub fn sample_party() -> Vec<Character> {
    vec![character(1, "Thorin"), character(2, "Lyra")]
}

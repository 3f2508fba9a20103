//! Party member records.
//!
//! Characters are read-only on the client. The remote service owns every
//! change to them; a changed character is picked up on the next fetch.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Character identity, assigned by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub i64);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The six abilities, in sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// All abilities in sheet order.
    pub const ALL: [Self; 6] = [
        Self::Strength,
        Self::Dexterity,
        Self::Constitution,
        Self::Intelligence,
        Self::Wisdom,
        Self::Charisma,
    ];

    /// Three-letter label used on character cards.
    #[must_use]
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Dexterity => "DEX",
            Self::Constitution => "CON",
            Self::Intelligence => "INT",
            Self::Wisdom => "WIS",
            Self::Charisma => "CHA",
        }
    }
}

/// Raw ability scores. Conventionally 1-30; other values are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilityScores {
    /// Returns the raw score for one ability.
    #[must_use]
    pub fn score(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            strength: 10,
            dexterity: 10,
            constitution: 10,
            intelligence: 10,
            wisdom: 10,
            charisma: 10,
        }
    }
}

/// A party member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Character identifier.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    /// Race label.
    pub race: String,
    /// Class label.
    #[serde(rename = "char_class")]
    pub class: String,
    /// Character level.
    pub level: u32,
    /// Raw ability scores.
    #[serde(flatten)]
    pub abilities: AbilityScores,
    /// Current hit points. Not checked against `max_hp`.
    pub current_hp: i32,
    /// Maximum hit points.
    pub max_hp: i32,
    /// Armor class.
    pub armor_class: i32,
    /// Personality traits, in display order.
    #[serde(default)]
    pub personality_traits: Vec<String>,
    /// Background text.
    #[serde(default)]
    pub background: String,
    /// Inventory items, in display order.
    #[serde(default)]
    pub inventory: Vec<String>,
}

impl Character {
    /// Returns the `"{race} {class}"` line shown under the name.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} {}", self.race, self.class)
    }

    /// Fraction of the health bar to fill, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        (f64::from(self.current_hp) / f64::from(self.max_hp)).clamp(0.0, 1.0)
    }
}

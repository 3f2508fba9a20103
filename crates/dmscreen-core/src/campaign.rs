//! Campaign records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::error::SessionError;

/// Name used when the operator leaves the campaign name blank.
pub const DEFAULT_CAMPAIGN_NAME: &str = "Untitled Campaign";

/// Description used when the operator leaves the description blank.
pub const DEFAULT_CAMPAIGN_DESCRIPTION: &str = "A new adventure begins...";

/// Smallest party the remote service will generate.
pub const MIN_PARTY_SIZE: u32 = 1;

/// Largest party the remote service will generate.
pub const MAX_PARTY_SIZE: u32 = 6;

/// Campaign identity, assigned by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(pub i64);

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A campaign. Immutable for the life of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    /// Campaign identifier.
    pub id: CampaignId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Target number of party members.
    pub party_size: u32,
    /// When the service created the campaign, if reported.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Operator input for creating a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignDraft {
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Requested party size.
    pub party_size: u32,
}

impl CampaignDraft {
    /// Creates a draft, substituting defaults for a blank name or description.
    #[must_use]
    pub fn new(name: &str, description: &str, party_size: u32) -> Self {
        let name = match name.trim() {
            "" => DEFAULT_CAMPAIGN_NAME,
            trimmed => trimmed,
        };
        let description = match description.trim() {
            "" => DEFAULT_CAMPAIGN_DESCRIPTION,
            trimmed => trimmed,
        };
        Self {
            name: name.to_owned(),
            description: description.to_owned(),
            party_size,
        }
    }

    /// Checks the draft before it is sent anywhere.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidSpec` if the party size is outside
    /// `MIN_PARTY_SIZE..=MAX_PARTY_SIZE`.
    pub fn validate(&self) -> Result<(), SessionError> {
        if !(MIN_PARTY_SIZE..=MAX_PARTY_SIZE).contains(&self.party_size) {
            return Err(SessionError::InvalidSpec(format!(
                "party size must be between {MIN_PARTY_SIZE} and {MAX_PARTY_SIZE}, got {}",
                self.party_size
            )));
        }
        Ok(())
    }
}

/// A freshly created campaign together with the party generated for it.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedCampaign {
    /// The campaign record.
    pub campaign: Campaign,
    /// The generated party, in roster order.
    pub party: Vec<Character>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_keeps_operator_values() {
        let draft = CampaignDraft::new("Lost Mines", "Heroes seek fortune", 4);

        assert_eq!(draft.name, "Lost Mines");
        assert_eq!(draft.description, "Heroes seek fortune");
        assert_eq!(draft.party_size, 4);
    }

    #[test]
    fn test_draft_substitutes_defaults_for_blank_fields() {
        let draft = CampaignDraft::new("   ", "", 3);

        assert_eq!(draft.name, DEFAULT_CAMPAIGN_NAME);
        assert_eq!(draft.description, DEFAULT_CAMPAIGN_DESCRIPTION);
    }

    #[test]
    fn test_validate_accepts_supported_party_sizes() {
        for size in MIN_PARTY_SIZE..=MAX_PARTY_SIZE {
            assert!(CampaignDraft::new("a", "b", size).validate().is_ok());
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range_party_size() {
        for size in [0, 7, 100] {
            match CampaignDraft::new("a", "b", size).validate() {
                Err(SessionError::InvalidSpec(msg)) => assert!(msg.contains("party size")),
                other => panic!("expected InvalidSpec, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_campaign_deserializes_without_optional_fields() {
        let json = serde_json::json!({ "id": 7, "name": "Shadows", "party_size": 3 });

        let campaign: Campaign = serde_json::from_value(json).unwrap();

        assert_eq!(campaign.id, CampaignId(7));
        assert!(campaign.description.is_empty());
        assert!(campaign.created_at.is_none());
    }
}

//! Remote campaign service abstraction.
//!
//! The remote service is the network boundary: it creates campaigns and
//! their parties, owns persistence, produces party responses and
//! suggestions, and is the single authority for dice outcomes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::campaign::{Campaign, CampaignDraft, CampaignId, CreatedCampaign};
use crate::character::{Character, CharacterId};
use crate::dice::{DiceRollSpec, RemoteRoll};
use crate::error::SessionError;
use crate::message::MessageRecord;

/// One party member's answer to a narration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyResponse {
    /// The character that responded.
    pub character_id: CharacterId,
    /// What the character said or did.
    pub response: String,
}

/// Port trait for everything the session engine asks of the remote service.
///
/// Implementations report transport problems as
/// `SessionError::NetworkFailure` and undecodable payloads as
/// `SessionError::MalformedResult`.
#[async_trait]
pub trait RemoteCampaignService: Send + Sync {
    /// Creates a campaign and generates its party.
    async fn create_campaign(&self, draft: &CampaignDraft)
    -> Result<CreatedCampaign, SessionError>;

    /// Fetches a campaign record by identity.
    async fn fetch_campaign(&self, campaign_id: CampaignId) -> Result<Campaign, SessionError>;

    /// Fetches the party roster, in roster order.
    async fn fetch_characters(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<Character>, SessionError>;

    /// Fetches message history, oldest first.
    async fn fetch_history(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<MessageRecord>, SessionError>;

    /// Submits DM narration. Responses come back in the order the party
    /// spoke; members with nothing to say may be absent.
    async fn submit_narration(
        &self,
        campaign_id: CampaignId,
        narration: &str,
    ) -> Result<Vec<PartyResponse>, SessionError>;

    /// Fetches scenario suggestions, optionally steered by free-text context.
    async fn fetch_suggestions(
        &self,
        campaign_id: CampaignId,
        context: Option<&str>,
    ) -> Result<Vec<String>, SessionError>;

    /// Asks the dice authority to roll.
    async fn roll_dice(
        &self,
        campaign_id: CampaignId,
        spec: &DiceRollSpec,
    ) -> Result<RemoteRoll, SessionError>;
}

//! Dice engine.
//!
//! The client never fabricates outcomes: the remote service is the dice
//! authority. The engine rejects bad requests before the round trip and
//! checks every outcome against the contract in `domain::dice`.

use std::sync::Arc;

use dmscreen_core::campaign::CampaignId;
use dmscreen_core::dice::DiceRollSpec;
use dmscreen_core::error::SessionError;
use dmscreen_core::service::RemoteCampaignService;
use tracing::{debug, instrument, warn};

use crate::domain::dice::{DiceRollResult, validate_spec};

/// Evaluates roll requests through the remote dice authority.
#[derive(Clone)]
pub struct DiceEngine {
    service: Arc<dyn RemoteCampaignService>,
}

impl std::fmt::Debug for DiceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiceEngine").finish_non_exhaustive()
    }
}

impl DiceEngine {
    /// Creates an engine backed by the given service.
    #[must_use]
    pub fn new(service: Arc<dyn RemoteCampaignService>) -> Self {
        Self { service }
    }

    /// Evaluates a roll request.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidSpec` if the count is below 1 (no network
    /// call is made), the service's error if the roll fails remotely, and
    /// `SessionError::MalformedResult` if the outcome breaks the contract.
    #[instrument(skip(self), fields(roll = %spec))]
    pub async fn evaluate(
        &self,
        campaign_id: CampaignId,
        spec: DiceRollSpec,
    ) -> Result<DiceRollResult, SessionError> {
        validate_spec(&spec)?;

        let remote = self.service.roll_dice(campaign_id, &spec).await?;
        let result = DiceRollResult::from_remote(spec, remote).inspect_err(|err| {
            warn!(error = %err, "dice authority returned an unusable outcome");
        })?;

        debug!(final_total = result.final_total, "roll evaluated");
        Ok(result)
    }
}

//! Turn coordinator.
//!
//! Runs the operator's actions against the session: narration round trips,
//! suggestion fetches and dice rolls. It is the only writer of the
//! adventure log and of the in-flight flags.
//!
//! Submission state machine: `Idle -> Submitting -> Idle`. While
//! `Submitting`, another submission is rejected with `Busy`; suggestion
//! fetches hold their own slot and never block a submission.

use std::iter;
use std::sync::Arc;

use dmscreen_core::clock::Clock;
use dmscreen_core::error::{Operation, SessionError};
use dmscreen_core::message::{Message, MessageRecord};
use dmscreen_core::service::RemoteCampaignService;
use dmscreen_rules::application::dice_engine::DiceEngine;
use dmscreen_rules::domain::dice::{DiceRollResult, validate_spec};
use thiserror::Error;
use tracing::{info, instrument, warn};

use super::suggestions::{normalize_context, strip_enumeration};
use crate::domain::commands::{RequestSuggestions, RollDice, SubmitNarration};
use crate::domain::state::SessionInstance;
use crate::domain::store::{InFlight, SessionStore};

/// A narration that was not turned into log entries.
///
/// Carries the operator's original text back so the draft is never lost.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct NarrationRejected {
    /// The narration exactly as submitted.
    pub draft: String,
    /// Why it was rejected.
    #[source]
    pub error: SessionError,
}

/// Coordinates turns against one session store.
pub struct TurnCoordinator {
    store: Arc<SessionStore>,
    service: Arc<dyn RemoteCampaignService>,
    dice: DiceEngine,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TurnCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnCoordinator")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl TurnCoordinator {
    /// Creates a coordinator over `store`, talking to `service`.
    #[must_use]
    pub fn new(
        store: Arc<SessionStore>,
        service: Arc<dyn RemoteCampaignService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            dice: DiceEngine::new(Arc::clone(&service)),
            store,
            service,
            clock,
        }
    }

    /// The store this coordinator writes to.
    #[must_use]
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Sends narration and appends the resulting turn to the log.
    ///
    /// On success the DM message and the party responses are appended as
    /// one batch, DM message first, responses in the order the service
    /// returned them. The appended messages are returned.
    ///
    /// # Errors
    ///
    /// Every failure hands the draft back in `NarrationRejected`:
    /// `InvalidSpec` for blank text or no loaded campaign, `Busy` while
    /// another submission is pending, `NetworkFailure` or `MalformedResult`
    /// from the round trip (recorded as the last error), and
    /// `SessionReplaced` if the session was torn down meanwhile. The log is
    /// unchanged in every failure case.
    #[instrument(skip(self, command), fields(correlation_id = %command.correlation_id))]
    pub async fn submit_narration(
        &self,
        command: SubmitNarration,
    ) -> Result<Vec<Message>, NarrationRejected> {
        let draft = command.narration;
        let reject = |error: SessionError| NarrationRejected {
            draft: draft.clone(),
            error,
        };

        if draft.trim().is_empty() {
            return Err(reject(SessionError::InvalidSpec(
                "narration text is empty".to_owned(),
            )));
        }
        let slot = self.store.begin(Operation::Submission).map_err(reject)?;

        match self.exchange(slot, &draft).await {
            Ok(appended) => {
                info!(
                    correlation_id = %command.correlation_id,
                    messages = appended.len(),
                    "turn appended"
                );
                Ok(appended)
            }
            Err(error) => {
                warn!(
                    correlation_id = %command.correlation_id,
                    error = %error,
                    "narration rejected"
                );
                Err(reject(error))
            }
        }
    }

    async fn exchange(
        &self,
        slot: InFlight<'_>,
        narration: &str,
    ) -> Result<Vec<Message>, SessionError> {
        let sent = self
            .service
            .submit_narration(slot.campaign_id(), narration)
            .await;
        let responses = match sent {
            Ok(responses) => responses,
            Err(error) => return Err(slot.fail(error)),
        };

        let now = self.clock.now();
        let records: Vec<MessageRecord> = iter::once(MessageRecord::dm(narration, now))
            .chain(
                responses
                    .into_iter()
                    .map(|r| MessageRecord::player(r.character_id, r.response, now)),
            )
            .collect();

        slot.commit(records)
    }

    /// Fetches scenario suggestions with enumeration markers stripped.
    ///
    /// An empty list means the service had nothing to suggest; it is not
    /// an error. Blank context is sent as no context.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSpec` if no campaign is loaded, `Busy` while another
    /// suggestion fetch is pending, the remote failure (recorded as the
    /// last error) if the fetch fails, and `SessionReplaced` if the session
    /// was torn down meanwhile.
    #[instrument(skip(self, command), fields(correlation_id = %command.correlation_id))]
    pub async fn request_suggestions(
        &self,
        command: RequestSuggestions,
    ) -> Result<Vec<String>, SessionError> {
        let context = normalize_context(command.context);
        let slot = self.store.begin(Operation::Suggestions)?;

        let fetched = self
            .service
            .fetch_suggestions(slot.campaign_id(), context.as_deref())
            .await;

        let suggestions = match fetched {
            Ok(suggestions) => suggestions,
            Err(error) => return Err(slot.fail(error)),
        };
        slot.succeed()?;

        info!(
            correlation_id = %command.correlation_id,
            count = suggestions.len(),
            "suggestions fetched"
        );
        Ok(suggestions
            .iter()
            .map(|s| strip_enumeration(s).to_owned())
            .collect())
    }

    /// Rolls dice and makes the result the session's displayed roll.
    ///
    /// A roll never touches the adventure log.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSpec` for a count below 1 (before anything else is
    /// checked) or when no campaign is loaded, the remote or contract
    /// failure from the dice engine (recorded as the last error), and
    /// `SessionReplaced` if the session was torn down meanwhile.
    #[instrument(
        skip(self, command),
        fields(correlation_id = %command.correlation_id, roll = %command.spec)
    )]
    pub async fn roll_dice(&self, command: RollDice) -> Result<DiceRollResult, SessionError> {
        validate_spec(&command.spec)?;
        let (instance, campaign_id) = self.store.target()?;

        let result = match self.dice.evaluate(campaign_id, command.spec).await {
            Ok(result) => result,
            Err(error) => return Err(self.store.fail(instance, error)),
        };
        self.store.replace_dice_result(instance, result.clone())?;

        info!(
            correlation_id = %command.correlation_id,
            final_total = result.final_total,
            "dice rolled"
        );
        Ok(result)
    }

    /// Tears the session down. Operations still in flight are discarded
    /// when they resolve.
    pub fn abandon_campaign(&self) -> SessionInstance {
        let instance = self.store.reset();
        info!(%instance, "campaign abandoned");
        instance
    }
}

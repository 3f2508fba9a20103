//! Session loader.
//!
//! Assembles a complete session before anything becomes visible: the
//! store only ever sees a campaign together with its party and history.
//! A load targets the session that was current when it started and is
//! discarded if that session is gone by the time it resolves. Loading never
//! retries; calling it again is safe.

use std::sync::Arc;

use dmscreen_core::campaign::Campaign;
use dmscreen_core::error::SessionError;
use dmscreen_core::service::RemoteCampaignService;
use tracing::{info, instrument, warn};

use crate::domain::commands::{ResumeCampaign, StartCampaign};
use crate::domain::state::{SessionInstance, SessionState};
use crate::domain::store::SessionStore;

/// Loads campaigns into a session store.
pub struct SessionLoader {
    store: Arc<SessionStore>,
    service: Arc<dyn RemoteCampaignService>,
}

impl std::fmt::Debug for SessionLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionLoader").finish_non_exhaustive()
    }
}

impl SessionLoader {
    /// Creates a loader that installs into `store`.
    #[must_use]
    pub fn new(store: Arc<SessionStore>, service: Arc<dyn RemoteCampaignService>) -> Self {
        Self { store, service }
    }

    /// Fetches the party and the history of `campaign` concurrently and
    /// installs the result as the current session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Load` carrying the first failure. The store is
    /// left untouched, so no half-loaded session is ever observable.
    /// Returns `SessionError::SessionReplaced` if the session was reset or
    /// replaced while the fetches were pending; the newer session stays.
    #[instrument(skip(self, campaign), fields(campaign_id = %campaign.id))]
    pub async fn bootstrap(&self, campaign: Campaign) -> Result<SessionState, SessionError> {
        let replacing = self.store.instance();
        self.load(replacing, campaign).await
    }

    async fn load(
        &self,
        replacing: SessionInstance,
        campaign: Campaign,
    ) -> Result<SessionState, SessionError> {
        let (party, history) = tokio::try_join!(
            self.service.fetch_characters(campaign.id),
            self.service.fetch_history(campaign.id),
        )
        .map_err(|cause| {
            warn!(error = %cause, "bootstrap failed");
            SessionError::load(cause)
        })?;

        let state = self
            .store
            .install(replacing, campaign, party, history)
            .inspect_err(|_| warn!("session replaced while loading; result discarded"))?;
        info!(
            instance = %state.instance,
            party = state.party.len(),
            messages = state.messages.len(),
            "session loaded"
        );
        Ok(state)
    }

    /// Loads an existing campaign by identity.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Load` if the campaign record, the party or
    /// the history cannot be fetched. The store is left untouched.
    /// Returns `SessionError::SessionReplaced` if another load or a reset
    /// won the race.
    #[instrument(
        skip(self, command),
        fields(correlation_id = %command.correlation_id, campaign_id = %command.campaign_id)
    )]
    pub async fn resume(&self, command: ResumeCampaign) -> Result<SessionState, SessionError> {
        let replacing = self.store.instance();
        let campaign = self
            .service
            .fetch_campaign(command.campaign_id)
            .await
            .map_err(SessionError::load)?;
        self.load(replacing, campaign).await
    }

    /// Creates a campaign and installs it with its generated party and an
    /// empty log.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidSpec` for a party size outside the
    /// supported range (no network call is made), `SessionError::Load` if
    /// creation fails and `SessionError::SessionReplaced` if the session
    /// changed while the campaign was being created.
    #[instrument(skip(self, command), fields(correlation_id = %command.correlation_id))]
    pub async fn start_campaign(
        &self,
        command: StartCampaign,
    ) -> Result<SessionState, SessionError> {
        command.draft.validate()?;

        let replacing = self.store.instance();
        let created = self
            .service
            .create_campaign(&command.draft)
            .await
            .map_err(SessionError::load)?;

        let state = self.store.install(
            replacing,
            created.campaign,
            created.party,
            Vec::new(),
        )?;
        info!(
            correlation_id = %command.correlation_id,
            instance = %state.instance,
            party = state.party.len(),
            "campaign started"
        );
        Ok(state)
    }
}

//! Test services — mock `RemoteCampaignService` implementations for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dmscreen_core::campaign::{Campaign, CampaignDraft, CampaignId, CreatedCampaign};
use dmscreen_core::character::Character;
use dmscreen_core::dice::{DiceRollSpec, RemoteRoll};
use dmscreen_core::error::SessionError;
use dmscreen_core::message::MessageRecord;
use dmscreen_core::service::{PartyResponse, RemoteCampaignService};
use tokio::sync::Notify;

use crate::fixtures::{sample_campaign, sample_party};

/// The remote operations, used to script failures and gates per call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    CreateCampaign,
    FetchCampaign,
    FetchCharacters,
    FetchHistory,
    SubmitNarration,
    FetchSuggestions,
    RollDice,
}

/// Holds a remote call pending until the test opens it.
///
/// A gated call signals `entered` as soon as it starts, then waits for
/// `open`. Each `open` releases exactly one waiting (or future) call.
#[derive(Debug, Default)]
pub struct Gate {
    entered: Notify,
    opened: Notify,
}

impl Gate {
    /// Creates a closed gate.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Waits until a gated call has started.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Lets one gated call proceed.
    pub fn open(&self) {
        self.opened.notify_one();
    }

    async fn pass(&self) {
        self.entered.notify_one();
        self.opened.notified().await;
    }
}

/// Record of the calls a `ScriptedCampaignService` has received.
#[derive(Debug, Clone, Default)]
pub struct ServiceCalls {
    pub create_campaign: usize,
    pub fetch_campaign: usize,
    pub fetch_characters: usize,
    pub fetch_history: usize,
    pub submit_narration: usize,
    pub fetch_suggestions: usize,
    pub roll_dice: usize,
    /// Narration texts, in call order.
    pub narrations: Vec<String>,
    /// Suggestion contexts, in call order.
    pub suggestion_contexts: Vec<Option<String>>,
}

/// A campaign service that answers from canned data and records every call.
///
/// Defaults to `sample_campaign()` and `sample_party()`, an empty history,
/// no party responses and no suggestions. Rolling dice fails unless a roll
/// is scripted.
#[derive(Debug)]
pub struct ScriptedCampaignService {
    campaign: Campaign,
    party: Vec<Character>,
    history: Vec<MessageRecord>,
    responses: Vec<PartyResponse>,
    suggestions: Vec<String>,
    roll: Option<RemoteRoll>,
    errors: HashMap<Endpoint, SessionError>,
    gates: HashMap<Endpoint, Arc<Gate>>,
    calls: Mutex<ServiceCalls>,
}

impl Default for ScriptedCampaignService {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedCampaignService {
    /// Create a service with the default script.
    #[must_use]
    pub fn new() -> Self {
        Self {
            campaign: sample_campaign(),
            party: sample_party(),
            history: Vec::new(),
            responses: Vec::new(),
            suggestions: Vec::new(),
            roll: None,
            errors: HashMap::new(),
            gates: HashMap::new(),
            calls: Mutex::new(ServiceCalls::default()),
        }
    }

    /// Campaign returned by create and fetch.
    #[must_use]
    pub fn with_campaign(mut self, campaign: Campaign) -> Self {
        self.campaign = campaign;
        self
    }

    /// Party returned by create and fetch.
    #[must_use]
    pub fn with_party(mut self, party: Vec<Character>) -> Self {
        self.party = party;
        self
    }

    /// History returned by fetch.
    #[must_use]
    pub fn with_history(mut self, history: Vec<MessageRecord>) -> Self {
        self.history = history;
        self
    }

    /// Party responses returned by every narration submission.
    #[must_use]
    pub fn with_responses(mut self, responses: Vec<PartyResponse>) -> Self {
        self.responses = responses;
        self
    }

    /// Suggestions returned by every suggestion fetch.
    #[must_use]
    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Outcome returned by every dice roll.
    #[must_use]
    pub fn with_roll(mut self, roll: RemoteRoll) -> Self {
        self.roll = Some(roll);
        self
    }

    /// Makes an endpoint fail with the given error.
    #[must_use]
    pub fn with_error(mut self, endpoint: Endpoint, error: SessionError) -> Self {
        self.errors.insert(endpoint, error);
        self
    }

    /// Makes an endpoint fail with a network failure.
    #[must_use]
    pub fn failing(self, endpoint: Endpoint) -> Self {
        self.with_error(
            endpoint,
            SessionError::NetworkFailure("connection refused".into()),
        )
    }

    /// Holds calls to an endpoint pending on the given gate.
    #[must_use]
    pub fn gated(mut self, endpoint: Endpoint, gate: Arc<Gate>) -> Self {
        self.gates.insert(endpoint, gate);
        self
    }

    /// Returns a snapshot of the calls received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> ServiceCalls {
        self.calls.lock().unwrap().clone()
    }

    async fn respond<T>(
        &self,
        endpoint: Endpoint,
        answer: impl FnOnce() -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        if let Some(gate) = self.gates.get(&endpoint) {
            gate.pass().await;
        }
        match self.errors.get(&endpoint) {
            Some(error) => Err(error.clone()),
            None => answer(),
        }
    }
}

#[async_trait]
impl RemoteCampaignService for ScriptedCampaignService {
    async fn create_campaign(
        &self,
        draft: &CampaignDraft,
    ) -> Result<CreatedCampaign, SessionError> {
        self.calls.lock().unwrap().create_campaign += 1;
        self.respond(Endpoint::CreateCampaign, || {
            Ok(CreatedCampaign {
                campaign: Campaign {
                    name: draft.name.clone(),
                    description: draft.description.clone(),
                    party_size: draft.party_size,
                    ..self.campaign.clone()
                },
                party: self.party.clone(),
            })
        })
        .await
    }

    async fn fetch_campaign(&self, _campaign_id: CampaignId) -> Result<Campaign, SessionError> {
        self.calls.lock().unwrap().fetch_campaign += 1;
        self.respond(Endpoint::FetchCampaign, || Ok(self.campaign.clone()))
            .await
    }

    async fn fetch_characters(
        &self,
        _campaign_id: CampaignId,
    ) -> Result<Vec<Character>, SessionError> {
        self.calls.lock().unwrap().fetch_characters += 1;
        self.respond(Endpoint::FetchCharacters, || Ok(self.party.clone()))
            .await
    }

    async fn fetch_history(
        &self,
        _campaign_id: CampaignId,
    ) -> Result<Vec<MessageRecord>, SessionError> {
        self.calls.lock().unwrap().fetch_history += 1;
        self.respond(Endpoint::FetchHistory, || Ok(self.history.clone()))
            .await
    }

    async fn submit_narration(
        &self,
        _campaign_id: CampaignId,
        narration: &str,
    ) -> Result<Vec<PartyResponse>, SessionError> {
        {
            let mut calls = self.calls.lock().unwrap();
            calls.submit_narration += 1;
            calls.narrations.push(narration.to_owned());
        }
        self.respond(Endpoint::SubmitNarration, || Ok(self.responses.clone()))
            .await
    }

    async fn fetch_suggestions(
        &self,
        _campaign_id: CampaignId,
        context: Option<&str>,
    ) -> Result<Vec<String>, SessionError> {
        {
            let mut calls = self.calls.lock().unwrap();
            calls.fetch_suggestions += 1;
            calls.suggestion_contexts.push(context.map(str::to_owned));
        }
        self.respond(Endpoint::FetchSuggestions, || Ok(self.suggestions.clone()))
            .await
    }

    async fn roll_dice(
        &self,
        _campaign_id: CampaignId,
        _spec: &DiceRollSpec,
    ) -> Result<RemoteRoll, SessionError> {
        self.calls.lock().unwrap().roll_dice += 1;
        self.respond(Endpoint::RollDice, || {
            self.roll
                .clone()
                .ok_or_else(|| SessionError::NetworkFailure("no roll scripted".into()))
        })
        .await
    }
}

/// A campaign service whose every call fails with a network failure. Useful
/// for testing error-handling paths.
#[derive(Debug)]
pub struct FailingCampaignService;

fn refused<T>() -> Result<T, SessionError> {
    Err(SessionError::NetworkFailure("connection refused".into()))
}

#[async_trait]
impl RemoteCampaignService for FailingCampaignService {
    async fn create_campaign(
        &self,
        _draft: &CampaignDraft,
    ) -> Result<CreatedCampaign, SessionError> {
        refused()
    }

    async fn fetch_campaign(&self, _campaign_id: CampaignId) -> Result<Campaign, SessionError> {
        refused()
    }

    async fn fetch_characters(
        &self,
        _campaign_id: CampaignId,
    ) -> Result<Vec<Character>, SessionError> {
        refused()
    }

    async fn fetch_history(
        &self,
        _campaign_id: CampaignId,
    ) -> Result<Vec<MessageRecord>, SessionError> {
        refused()
    }

    async fn submit_narration(
        &self,
        _campaign_id: CampaignId,
        _narration: &str,
    ) -> Result<Vec<PartyResponse>, SessionError> {
        refused()
    }

    async fn fetch_suggestions(
        &self,
        _campaign_id: CampaignId,
        _context: Option<&str>,
    ) -> Result<Vec<String>, SessionError> {
        refused()
    }

    async fn roll_dice(
        &self,
        _campaign_id: CampaignId,
        _spec: &DiceRollSpec,
    ) -> Result<RemoteRoll, SessionError> {
        refused()
    }
}

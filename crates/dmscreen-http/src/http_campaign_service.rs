//! `RemoteCampaignService` over the campaign service's HTTP/JSON API.

use async_trait::async_trait;
use dmscreen_core::campaign::{Campaign, CampaignDraft, CampaignId, CreatedCampaign};
use dmscreen_core::character::Character;
use dmscreen_core::dice::{DiceRollSpec, RemoteRoll};
use dmscreen_core::error::SessionError;
use dmscreen_core::message::MessageRecord;
use dmscreen_core::service::{PartyResponse, RemoteCampaignService};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::{ConfigError, ServiceConfig};
use crate::wire::{
    CampaignDto, CharacterDto, ErrorBody, MessageDto, NarrationRequest, NarrationResponse,
    ScenarioRequest, ScenarioResponse,
};

/// HTTP client for the remote campaign service.
#[derive(Debug, Clone)]
pub struct HttpCampaignService {
    client: Client,
    base_url: String,
    history_limit: u32,
}

impl HttpCampaignService {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Client` if the HTTP client cannot be built.
    pub fn new(config: &ServiceConfig) -> Result<Self, ConfigError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.as_str().trim_end_matches('/').to_owned(),
            history_limit: config.history_limit,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends a request and decodes a successful JSON body.
    ///
    /// Transport failures and non-2xx statuses are `NetworkFailure`; a body
    /// that does not decode is `MalformedResult`.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SessionError> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "request failed");
            SessionError::NetworkFailure(e.to_string())
        })?;

        let status = response.status();
        let url = response.url().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| SessionError::NetworkFailure(e.to_string()))?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<ErrorBody>(&body)
                .map(|error| error.message())
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            warn!(%status, %url, %detail, "request rejected");
            return Err(SessionError::NetworkFailure(format!("{status}: {detail}")));
        }

        debug!(%status, %url, bytes = body.len(), "response received");
        serde_json::from_slice(&body).map_err(|e| {
            SessionError::MalformedResult(format!("unexpected response from {url}: {e}"))
        })
    }
}

#[async_trait]
impl RemoteCampaignService for HttpCampaignService {
    #[instrument(skip(self, draft), fields(party_size = draft.party_size))]
    async fn create_campaign(
        &self,
        draft: &CampaignDraft,
    ) -> Result<CreatedCampaign, SessionError> {
        let campaign: CampaignDto = self
            .send(self.client.post(self.url("/campaigns")).json(draft))
            .await?;
        let campaign = campaign.into_campaign();
        let party = self.fetch_characters(campaign.id).await?;
        Ok(CreatedCampaign { campaign, party })
    }

    #[instrument(skip(self))]
    async fn fetch_campaign(&self, campaign_id: CampaignId) -> Result<Campaign, SessionError> {
        let campaign: CampaignDto = self
            .send(
                self.client
                    .get(self.url(&format!("/campaigns/{campaign_id}"))),
            )
            .await?;
        Ok(campaign.into_campaign())
    }

    #[instrument(skip(self))]
    async fn fetch_characters(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<Character>, SessionError> {
        let characters: Vec<CharacterDto> = self
            .send(
                self.client
                    .get(self.url(&format!("/campaigns/{campaign_id}/characters"))),
            )
            .await?;
        Ok(characters
            .into_iter()
            .map(CharacterDto::into_character)
            .collect())
    }

    #[instrument(skip(self))]
    async fn fetch_history(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<MessageRecord>, SessionError> {
        let messages: Vec<MessageDto> = self
            .send(
                self.client
                    .get(self.url(&format!("/campaigns/{campaign_id}/messages")))
                    .query(&[("limit", self.history_limit)]),
            )
            .await?;
        messages.into_iter().map(MessageDto::into_record).collect()
    }

    #[instrument(skip(self, narration))]
    async fn submit_narration(
        &self,
        campaign_id: CampaignId,
        narration: &str,
    ) -> Result<Vec<PartyResponse>, SessionError> {
        let response: NarrationResponse = self
            .send(
                self.client
                    .post(self.url(&format!("/campaigns/{campaign_id}/dm-input")))
                    .json(&NarrationRequest { message: narration }),
            )
            .await?;
        Ok(response.party_responses)
    }

    #[instrument(skip(self, context))]
    async fn fetch_suggestions(
        &self,
        campaign_id: CampaignId,
        context: Option<&str>,
    ) -> Result<Vec<String>, SessionError> {
        let response: ScenarioResponse = self
            .send(
                self.client
                    .post(self.url("/dm-assistant/scenarios"))
                    .query(&[("campaign_id", campaign_id.0)])
                    .json(&ScenarioRequest { context }),
            )
            .await?;
        Ok(response.suggestions)
    }

    #[instrument(skip(self), fields(roll = %spec))]
    async fn roll_dice(
        &self,
        campaign_id: CampaignId,
        spec: &DiceRollSpec,
    ) -> Result<RemoteRoll, SessionError> {
        self.send(
            self.client
                .post(self.url(&format!("/campaigns/{campaign_id}/roll-dice")))
                .json(spec),
        )
        .await
    }
}

//! Commands for the session context.

use dmscreen_core::campaign::{CampaignDraft, CampaignId};
use dmscreen_core::command::Command;
use dmscreen_core::dice::DiceRollSpec;
use uuid::Uuid;

/// Command to send DM narration and collect the party's responses.
#[derive(Debug, Clone)]
pub struct SubmitNarration {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The operator's narration, exactly as typed.
    pub narration: String,
}

impl SubmitNarration {
    /// Creates the command with a fresh correlation ID.
    #[must_use]
    pub fn new(narration: impl Into<String>) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            narration: narration.into(),
        }
    }
}

impl Command for SubmitNarration {
    fn command_type(&self) -> &'static str {
        "session.submit_narration"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to fetch scenario suggestions.
#[derive(Debug, Clone)]
pub struct RequestSuggestions {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Optional free-text steering for the suggestions.
    pub context: Option<String>,
}

impl RequestSuggestions {
    /// Creates the command with a fresh correlation ID.
    #[must_use]
    pub fn new(context: Option<String>) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            context,
        }
    }
}

impl Command for RequestSuggestions {
    fn command_type(&self) -> &'static str {
        "session.request_suggestions"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to roll dice through the remote dice authority.
#[derive(Debug, Clone)]
pub struct RollDice {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// What to roll.
    pub spec: DiceRollSpec,
}

impl RollDice {
    /// Creates the command with a fresh correlation ID.
    #[must_use]
    pub fn new(spec: DiceRollSpec) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            spec,
        }
    }
}

impl Command for RollDice {
    fn command_type(&self) -> &'static str {
        "session.roll_dice"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to create a campaign and load it as the current session.
#[derive(Debug, Clone)]
pub struct StartCampaign {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The campaign to create.
    pub draft: CampaignDraft,
}

impl StartCampaign {
    /// Creates the command with a fresh correlation ID.
    #[must_use]
    pub fn new(draft: CampaignDraft) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            draft,
        }
    }
}

impl Command for StartCampaign {
    fn command_type(&self) -> &'static str {
        "session.start_campaign"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to load an existing campaign as the current session.
#[derive(Debug, Clone)]
pub struct ResumeCampaign {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The campaign to load.
    pub campaign_id: CampaignId,
}

impl ResumeCampaign {
    /// Creates the command with a fresh correlation ID.
    #[must_use]
    pub fn new(campaign_id: CampaignId) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            campaign_id,
        }
    }
}

impl Command for ResumeCampaign {
    fn command_type(&self) -> &'static str {
        "session.resume_campaign"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

#[cfg(test)]
mod tests {
    use dmscreen_core::dice::DiceKind;

    use super::*;

    #[test]
    fn test_command_types() {
        assert_eq!(
            SubmitNarration::new("Hi").command_type(),
            "session.submit_narration"
        );
        assert_eq!(
            RequestSuggestions::new(None).command_type(),
            "session.request_suggestions"
        );
        assert_eq!(
            RollDice::new(DiceRollSpec::new(DiceKind::D20, 1, 0)).command_type(),
            "session.roll_dice"
        );
        assert_eq!(
            StartCampaign::new(CampaignDraft::new("", "", 2)).command_type(),
            "session.start_campaign"
        );
        assert_eq!(
            ResumeCampaign::new(CampaignId(3)).command_type(),
            "session.resume_campaign"
        );
    }

    #[test]
    fn test_each_command_gets_its_own_correlation_id() {
        let first = SubmitNarration::new("Hi");
        let second = SubmitNarration::new("Hi");

        assert_ne!(first.correlation_id(), second.correlation_id());
        assert_eq!(first.correlation_id(), first.correlation_id);
    }
}

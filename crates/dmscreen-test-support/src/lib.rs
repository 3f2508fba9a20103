//! Shared test doubles and fixtures for the DM Screen session engine.

mod clock;
mod fixtures;
mod service;

pub use clock::FixedClock;
pub use fixtures::{character, fixed_now, sample_campaign, sample_party};
pub use service::{Endpoint, FailingCampaignService, Gate, ScriptedCampaignService, ServiceCalls};

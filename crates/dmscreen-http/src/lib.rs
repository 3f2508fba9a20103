//! DM Screen — HTTP client for the remote campaign service.
//!
//! Implements `RemoteCampaignService` over the service's JSON API and reads
//! its connection settings from the environment.

pub mod config;
pub mod http_campaign_service;
mod wire;

pub use config::{ConfigError, ServiceConfig};
pub use http_campaign_service::HttpCampaignService;

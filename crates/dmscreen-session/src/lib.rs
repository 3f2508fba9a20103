//! DM Screen — Session.
//!
//! Owns the session aggregate (campaign, party, adventure log and transient
//! flags), the coordinator that runs narration and suggestion round trips
//! against it, and the loader that bootstraps it.

pub mod application;
pub mod domain;

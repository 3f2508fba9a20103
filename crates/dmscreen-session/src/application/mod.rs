//! Session application services.

pub mod coordinator;
pub mod loader;
pub mod suggestions;

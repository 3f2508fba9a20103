//! Session domain: the aggregate, its store and the command records.

pub mod commands;
pub mod state;
pub mod store;

//! DM Screen Core — shared domain abstractions.
//!
//! This crate defines the records exchanged with the remote campaign
//! service, the error taxonomy every session operation reports, and the
//! port trait the rest of the workspace talks to the network through. It
//! contains no infrastructure code.

pub mod campaign;
pub mod character;
pub mod clock;
pub mod command;
pub mod dice;
pub mod error;
pub mod message;
pub mod service;

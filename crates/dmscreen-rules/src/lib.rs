//! DM Screen — Rules.
//!
//! Pure derivations used for display (ability modifiers, dice totals) and
//! the dice engine that checks outcomes reported by the remote dice
//! authority before they reach the session.

pub mod application;
pub mod domain;

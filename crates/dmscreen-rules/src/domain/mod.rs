//! Pure rules: no I/O.

pub mod ability;
pub mod dice;

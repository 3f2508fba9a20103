//! Application services for the rules crate.

pub mod dice_engine;

//! DM Screen operator console.

pub mod app;
pub mod console;
pub mod error;
pub mod render;

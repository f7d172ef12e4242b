//! Command handlers.
//!
//! This module contains handlers for the generate, verify and stats commands.

pub mod generate;
pub mod stats;
pub mod verify;

pub use generate::run_generate;
pub use stats::{run_stats, StatsArgs};
pub use verify::run_verify;

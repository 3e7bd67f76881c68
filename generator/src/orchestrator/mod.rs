//! Orchestrator - the generation run
//!
//! Drives the day loop over the configured date range, appends the fault
//! trains, and orders the final log.
//!
//! See `engine.rs` for full implementation.

pub mod engine;

// Re-export main types for convenience
pub use engine::{
    DaySummary, GeneratorConfig, GeneratorError, LogGenerator, LogOrdering, WeekLog,
};

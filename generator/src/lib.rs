//! Service Log Simulator - Rust Engine
//!
//! Deterministic generator for a week of robot-waiter restaurant service
//! logs: scheduled order trips with derived metrics, plus fault records
//! standing in for configured downtime windows.
//!
//! # Architecture
//!
//! - **calendar**: Date iteration, service hours, daily cutoff
//! - **models**: Domain types (OrderRecord, DowntimeBlock)
//! - **scheduler**: Per-hour trip placement with rejection sampling
//! - **factory**: Field synthesis for individual records
//! - **faults**: Fault trains for downtime blocks
//! - **orchestrator**: The generation run (day loop, ordering)
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents)
//! 2. All randomness is deterministic (seeded RNG); the draw order is part
//!    of the output contract
//! 3. Registered trip windows never overlap within an hour

// Module declarations
pub mod calendar;
pub mod factory;
pub mod faults;
pub mod models;
pub mod orchestrator;
pub mod rng;
pub mod scheduler;

// Re-exports for convenience
pub use calendar::{date_range, ServiceCalendar};
pub use factory::{OrderFactory, OrderProfile};
pub use faults::FaultGenerator;
pub use models::{
    downtime::{DowntimeBlock, DowntimeCalendar},
    record::OrderRecord,
};
pub use orchestrator::{
    DaySummary, GeneratorConfig, GeneratorError, LogGenerator, LogOrdering, WeekLog,
};
pub use rng::SeededRng;
pub use scheduler::{DayRun, HourOutcome, PlacementPolicy, TripConfig, TripScheduler, TripWindow};

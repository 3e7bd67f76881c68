//! Domain models for the service log generator

pub mod downtime;
pub mod record;

// Re-exports
pub use downtime::{DowntimeBlock, DowntimeCalendar};
pub use record::OrderRecord;

//! Fault record generation
//!
//! Every downtime block stands in for a stretch of lost service, and the
//! log shows it as a train of fault records: one per spacing interval of
//! outage (default four minutes), scattered uniformly across the block at
//! whole-minute offsets. Fault ids restart at `ERR001` within each block
//! and follow the block's chronological order.

use chrono::Duration;

use crate::factory::{OrderFactory, OrderProfile};
use crate::models::downtime::DowntimeBlock;
use crate::models::record::{self, OrderRecord};
use crate::rng::SeededRng;

/// Emits the fault records for downtime blocks.
pub struct FaultGenerator<'a> {
    factory: OrderFactory<'a>,
    minutes_per_fault: i64,
}

impl<'a> FaultGenerator<'a> {
    /// Create a fault generator
    ///
    /// # Arguments
    ///
    /// * `profile` - Field profile for the table/amount/birth draws
    /// * `minutes_per_fault` - Outage minutes represented by one fault
    ///
    /// # Panics
    /// Panics if `minutes_per_fault` is not positive. Configuration
    /// validation rejects such values up front.
    pub fn new(profile: &'a OrderProfile, minutes_per_fault: i64) -> Self {
        assert!(minutes_per_fault > 0, "minutes_per_fault must be positive");
        Self {
            factory: OrderFactory::new(profile),
            minutes_per_fault,
        }
    }

    /// Generate the fault train for one block
    ///
    /// The fault count is the block's whole-minute duration divided by the
    /// spacing, truncated; blocks shorter than one spacing emit nothing.
    /// A malformed block (end before start) has negative duration and is
    /// guarded here explicitly: it emits nothing and consumes no draws.
    pub fn faults_for_block(
        &self,
        block: &DowntimeBlock,
        rng: &mut SeededRng,
    ) -> Vec<OrderRecord> {
        let minutes = block.duration_minutes();
        if minutes <= 0 {
            return Vec::new();
        }
        let count = minutes / self.minutes_per_fault;

        let start = block.date().and_time(block.start());
        let mut instants: Vec<_> = (0..count)
            .map(|_| start + Duration::minutes(rng.range(0, minutes + 1)))
            .collect();
        // Ids number the instants chronologically, not in draw order
        instants.sort();

        let label = block.label();
        instants
            .into_iter()
            .enumerate()
            .map(|(index, at)| {
                let id = record::fault_id(block.date(), index as u32 + 1);
                self.factory
                    .fault_record(id, block.date(), at, label.clone(), rng)
            })
            .collect()
    }
}

//! Generation engine
//!
//! Main generation loop integrating all components:
//! - Trip scheduling (per-hour rejection sampling)
//! - Record synthesis (field draws per order)
//! - Fault trains (one per downtime block)
//! - Log ordering (textual or chronological)
//!
//! # Architecture
//!
//! A run walks the configured date range once:
//!
//! ```text
//! For each date d:
//! 1. Fill every service hour with trips (scheduler)
//! 2. Record the day's outcome (targets, placements, attempts)
//! For each downtime block b:
//! 3. Emit b's fault train
//! Finally:
//! 4. Sort all records into the configured log order
//! ```
//!
//! # Determinism
//!
//! All randomness flows through one seeded xorshift64* stream. Same config
//! and seed → byte-identical log. A second `generate` call on the same
//! instance continues the stream and yields a different (still
//! deterministic) log.
//!
//! # Example
//!
//! ```
//! use servesim_core::{GeneratorConfig, LogGenerator};
//!
//! let mut config = GeneratorConfig::sample_week();
//! config.seed = 42;
//!
//! let mut generator = LogGenerator::new(config).unwrap();
//! let log = generator.generate();
//! assert!(!log.records.is_empty());
//! assert_eq!(log.days.len(), 8); // Apr 28 through May 5
//! ```

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::{self, ServiceCalendar};
use crate::factory::OrderProfile;
use crate::faults::FaultGenerator;
use crate::models::downtime::{DowntimeBlock, DowntimeCalendar};
use crate::models::record::OrderRecord;
use crate::rng::SeededRng;
use crate::scheduler::{TripConfig, TripScheduler};

// ============================================================================
// Configuration Types
// ============================================================================

/// How the final log is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogOrdering {
    /// Stable sort on the wire texts (`DD-MM-YYYY`, `HH:MM:SS`). This is
    /// the historical feed's order; across a month boundary it is *not*
    /// calendar order ("01-05-2025" sorts before "28-04-2025").
    Lexicographic,

    /// Stable sort on the underlying date and pick time.
    Chronological,
}

impl Default for LogOrdering {
    fn default() -> Self {
        LogOrdering::Lexicographic
    }
}

/// Complete configuration for one generation run
///
/// The default reproduces the historical feed's parameters with no
/// downtime; [`GeneratorConfig::sample_week`] adds the feed's three
/// outage blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// First service date (inclusive)
    pub start_date: NaiveDate,

    /// Last service date (inclusive)
    pub end_date: NaiveDate,

    /// Service hours per date, half-open (first, past-last)
    pub service_hours: (u32, u32),

    /// Latest admissible pick or delivery time of day (inclusive)
    pub cutoff: NaiveTime,

    /// RNG seed for the whole run
    pub seed: u64,

    /// Trip placement parameters
    pub trips: TripConfig,

    /// Field profile for records
    pub profile: OrderProfile,

    /// Downtime blocks; picks avoid them, faults fill them
    pub downtime: Vec<DowntimeBlock>,

    /// Outage minutes represented by one fault record
    pub minutes_per_fault: i64,

    /// Final log ordering
    pub ordering: LogOrdering,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start_date: date(2025, 4, 28),
            end_date: date(2025, 5, 5),
            service_hours: (9, 21),
            cutoff: NaiveTime::from_hms_opt(21, 30, 0).expect("valid cutoff"),
            seed: 1337,
            trips: TripConfig::default(),
            profile: OrderProfile::default(),
            downtime: Vec::new(),
            minutes_per_fault: 4,
            ordering: LogOrdering::default(),
        }
    }
}

impl GeneratorConfig {
    /// The historical week: default parameters plus its three outage blocks
    ///
    /// Note the last date carries two blocks; their fault ids repeat, as
    /// they did in the feed.
    pub fn sample_week() -> Self {
        let downtime = vec![
            DowntimeBlock::new(
                date(2025, 5, 1),
                time(10, 13),
                time(11, 56),
                "E01",
                "POLLING ERROR",
            ),
            DowntimeBlock::new(
                date(2025, 5, 5),
                time(9, 4),
                time(11, 13),
                "E02",
                "UNABLE TO CONNECT",
            ),
            DowntimeBlock::new(
                date(2025, 5, 5),
                time(15, 56),
                time(18, 46),
                "E03",
                "Runtime error: Physical collision detected",
            ),
        ];
        Self {
            downtime,
            ..Self::default()
        }
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid preset date")
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid preset time")
}

// ============================================================================
// Run Results
// ============================================================================

/// Outcome of one service date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySummary {
    /// The service date
    pub date: NaiveDate,

    /// Records emitted for the date (including trailing singletons,
    /// excluding faults)
    pub records: usize,

    /// Summed hourly order targets
    pub target: u32,

    /// Orders placed against the targets
    pub placed: u32,

    /// Orders the attempt budgets failed to place
    pub shortfall: u32,

    /// Rejected candidates across the date's hours
    pub attempts: u32,
}

/// A complete generated log: every record in final order, plus per-date
/// outcomes for observability.
#[derive(Debug, Clone)]
pub struct WeekLog {
    /// All records, ordered per the configured [`LogOrdering`]
    pub records: Vec<OrderRecord>,

    /// Per-date outcomes, in date order
    pub days: Vec<DaySummary>,
}

impl WeekLog {
    /// The delivered orders in the log
    pub fn orders(&self) -> impl Iterator<Item = &OrderRecord> {
        self.records.iter().filter(|record| !record.is_fault())
    }

    /// The fault records in the log
    pub fn faults(&self) -> impl Iterator<Item = &OrderRecord> {
        self.records.iter().filter(|record| record.is_fault())
    }
}

/// Generation error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// Configuration validation error
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

// ============================================================================
// Generator
// ============================================================================

/// Owns a validated configuration and the RNG stream, and produces logs.
///
/// # Determinism
///
/// All randomness is via the seeded xorshift64* stream. Same seed + same
/// config = identical log.
#[derive(Debug)]
pub struct LogGenerator {
    /// Validated run configuration
    config: GeneratorConfig,

    /// Deterministic RNG
    rng: SeededRng,

    /// Downtime windows, built from the config
    downtime: DowntimeCalendar,

    /// Service hours and cutoff, built from the config
    calendar: ServiceCalendar,
}

impl LogGenerator {
    /// Create a generator from a configuration
    ///
    /// # Returns
    ///
    /// * `Ok(LogGenerator)` - configuration validated, RNG seeded
    /// * `Err(GeneratorError)` - configuration rejected
    ///
    /// # Example
    ///
    /// ```
    /// use servesim_core::{GeneratorConfig, LogGenerator};
    ///
    /// let mut bad = GeneratorConfig::default();
    /// bad.profile.table_pool.clear();
    /// assert!(LogGenerator::new(bad).is_err());
    /// ```
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        Self::validate_config(&config)?;

        let rng = SeededRng::new(config.seed);
        let downtime = DowntimeCalendar::new(config.downtime.clone());
        let calendar = ServiceCalendar::new(config.service_hours, config.cutoff);

        Ok(Self {
            config,
            rng,
            downtime,
            calendar,
        })
    }

    /// Validate configuration
    fn validate_config(config: &GeneratorConfig) -> Result<(), GeneratorError> {
        if config.end_date < config.start_date {
            return Err(GeneratorError::InvalidConfig(
                "date range ends before it starts".to_string(),
            ));
        }

        let (open, close) = config.service_hours;
        if open >= close {
            return Err(GeneratorError::InvalidConfig(
                "service hours span is empty".to_string(),
            ));
        }
        if close > 24 {
            return Err(GeneratorError::InvalidConfig(
                "service hours run past midnight".to_string(),
            ));
        }

        let trips = &config.trips;
        if trips.orders_per_hour.0 > trips.orders_per_hour.1 {
            return Err(GeneratorError::InvalidConfig(
                "orders_per_hour minimum exceeds maximum".to_string(),
            ));
        }
        if trips.group_sizes.0 < 1 {
            return Err(GeneratorError::InvalidConfig(
                "group size must be at least 1".to_string(),
            ));
        }
        if trips.group_sizes.0 > trips.group_sizes.1 {
            return Err(GeneratorError::InvalidConfig(
                "group size minimum exceeds maximum".to_string(),
            ));
        }
        if trips.delay_seconds.0 > trips.delay_seconds.1 {
            return Err(GeneratorError::InvalidConfig(
                "delay minimum exceeds maximum".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&trips.group_chance) {
            return Err(GeneratorError::InvalidConfig(
                "group_chance must be within 0.0..=1.0".to_string(),
            ));
        }

        let profile = &config.profile;
        if profile.table_pool.is_empty() {
            return Err(GeneratorError::InvalidConfig(
                "table pool must not be empty".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&profile.comment_chance) {
            return Err(GeneratorError::InvalidConfig(
                "comment_chance must be within 0.0..=1.0".to_string(),
            ));
        }
        if profile.comment_chance > 0.0
            && profile.negative_comments.is_empty()
            && profile.positive_comments.is_empty()
        {
            return Err(GeneratorError::InvalidConfig(
                "comment pools must not both be empty".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&profile.young_guest_chance) {
            return Err(GeneratorError::InvalidConfig(
                "young_guest_chance must be within 0.0..=1.0".to_string(),
            ));
        }
        for &(min_age, max_age) in [&profile.young_age_years, &profile.older_age_years] {
            if min_age < 0 {
                return Err(GeneratorError::InvalidConfig(
                    "ages must be non-negative".to_string(),
                ));
            }
            if min_age > max_age {
                return Err(GeneratorError::InvalidConfig(
                    "age bracket minimum exceeds maximum".to_string(),
                ));
            }
        }
        if profile.amount_cents.0 <= 0 {
            return Err(GeneratorError::InvalidConfig(
                "amounts must be positive".to_string(),
            ));
        }
        if profile.amount_cents.0 > profile.amount_cents.1 {
            return Err(GeneratorError::InvalidConfig(
                "amount minimum exceeds maximum".to_string(),
            ));
        }

        if config.minutes_per_fault < 1 {
            return Err(GeneratorError::InvalidConfig(
                "minutes_per_fault must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// The validated configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Current RNG state (for diagnostics and replay)
    pub fn rng_state(&self) -> u64 {
        self.rng.state()
    }

    /// Run one full generation pass
    ///
    /// Walks the date range, emits every fault train, and returns the
    /// ordered log with per-date outcomes.
    pub fn generate(&mut self) -> WeekLog {
        let scheduler = TripScheduler::new(
            &self.config.trips,
            &self.config.profile,
            &self.downtime,
            &self.calendar,
        );

        // STEP 1: SERVICE DAYS
        // Each date fills its hours in order; ids restart per date.
        let mut records = Vec::new();
        let mut days = Vec::new();
        for day_date in calendar::date_range(self.config.start_date, self.config.end_date) {
            let day = scheduler.fill_day(day_date, &mut self.rng);
            days.push(DaySummary {
                date: day_date,
                records: day.records.len(),
                target: day.target(),
                placed: day.placed(),
                shortfall: day.shortfall(),
                attempts: day.attempts(),
            });
            records.extend(day.records);
        }

        // STEP 2: FAULT TRAINS
        // Blocks run after all service days, in configuration order.
        let fault_generator =
            FaultGenerator::new(&self.config.profile, self.config.minutes_per_fault);
        for block in self.downtime.blocks() {
            records.extend(fault_generator.faults_for_block(block, &mut self.rng));
        }

        // STEP 3: LOG ORDERING
        // Both sorts are stable; ties keep creation order.
        match self.config.ordering {
            LogOrdering::Lexicographic => {
                records.sort_by_cached_key(|r| (r.date_text(), r.time_text()));
            }
            LogOrdering::Chronological => {
                records.sort_by_key(|r| (r.date(), r.time_picked()));
            }
        }

        WeekLog { records, days }
    }
}

//! Trip scheduling
//!
//! Fills each service hour of a date with non-overlapping robot trips. Every
//! hour draws a target order count, then places trips by rejection sampling:
//! a candidate pick instant is drawn inside the hour and thrown away when it
//! falls in a downtime window, inside an already scheduled trip, or past the
//! daily cutoff. A bounded attempt budget keeps an over-constrained hour from
//! looping forever; when the budget runs out the hour is left short rather
//! than violated.
//!
//! # Placement passes
//!
//! Each accepted placement is a *group* of one or more orders sharing a pick
//! instant, with per-member delivery delays. The trip window (pick to last
//! delivery) is registered so later candidates cannot intersect it.
//! Under [`PlacementPolicy::GroupedWithTrailingSingle`] every accepted group
//! additionally drags in one extra singleton order that bypasses the target
//! count and registers no window; this reproduces the roughly doubled
//! hourly volume of the historical feed.
//!
//! # Draw order
//!
//! The RNG stream is consumed in a fixed order per iteration: group roll,
//! group size, pick minute, pick second, one delay per member, then the
//! factory's field draws per order. Rejected candidates consume their draws
//! up to the point of rejection.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::calendar::{self, ServiceCalendar};
use crate::factory::{OrderFactory, OrderProfile};
use crate::models::downtime::DowntimeCalendar;
use crate::models::record::{self, OrderRecord};
use crate::rng::SeededRng;

/// How trips are placed within an hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementPolicy {
    /// Grouped placements only; realized counts stay within the hourly
    /// target range.
    Grouped,

    /// Grouped placements, each followed by one extra singleton that
    /// neither counts toward the target nor registers a trip window.
    /// Matches the historical feed, overshooting the target range.
    GroupedWithTrailingSingle,
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        PlacementPolicy::GroupedWithTrailingSingle
    }
}

/// Configuration for trip placement within service hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripConfig {
    /// Hourly order target bounds (min, max inclusive)
    pub orders_per_hour: (u32, u32),

    /// Probability that a placement is a group rather than a single
    pub group_chance: f64,

    /// Group size bounds when the group roll fires (min, max inclusive)
    pub group_sizes: (u32, u32),

    /// Delivery delay bounds in seconds (min, max inclusive)
    pub delay_seconds: (u32, u32),

    /// Rejected-candidate budget per hour
    pub attempt_cap: u32,

    /// Placement policy for the hour loop
    pub placement: PlacementPolicy,
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            orders_per_hour: (8, 14),
            group_chance: 0.2,
            group_sizes: (2, 3),
            delay_seconds: (30, 180),
            attempt_cap: 1_000,
            placement: PlacementPolicy::default(),
        }
    }
}

/// A scheduled trip: pick instant through last delivery, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TripWindow {
    /// Create a window
    ///
    /// # Panics
    /// Panics if `end` precedes `start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        assert!(end >= start, "window end must not precede its start");
        Self { start, end }
    }

    /// First instant of the window
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Last instant of the window
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Does the instant fall inside the window? Both ends count.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }

    /// Do two windows share any instant?
    pub fn overlaps(&self, other: &TripWindow) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Per-hour placement outcome.
///
/// `placed` counts only target-filling orders; trailing singletons appear in
/// the record stream but not here. `attempts` counts rejected candidates,
/// not iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourOutcome {
    /// The clock hour that was filled
    pub hour: u32,
    /// Drawn order target for the hour
    pub target: u32,
    /// Orders placed against the target
    pub placed: u32,
    /// Rejected candidates charged to the attempt budget
    pub attempts: u32,
}

/// One scheduled service date: its records in creation order plus the
/// per-hour outcomes.
#[derive(Debug, Clone)]
pub struct DayRun {
    /// The service date
    pub date: NaiveDate,
    /// Records in creation order (not yet log-ordered)
    pub records: Vec<OrderRecord>,
    /// Outcome per service hour, in hour order
    pub hours: Vec<HourOutcome>,
}

impl DayRun {
    /// Summed hourly targets
    pub fn target(&self) -> u32 {
        self.hours.iter().map(|hour| hour.target).sum()
    }

    /// Summed target-filling placements
    pub fn placed(&self) -> u32 {
        self.hours.iter().map(|hour| hour.placed).sum()
    }

    /// Summed rejected candidates
    pub fn attempts(&self) -> u32 {
        self.hours.iter().map(|hour| hour.attempts).sum()
    }

    /// Orders the attempt budget failed to place
    pub fn shortfall(&self) -> u32 {
        self.target() - self.placed()
    }
}

/// Places trips for whole service dates.
pub struct TripScheduler<'a> {
    config: &'a TripConfig,
    factory: OrderFactory<'a>,
    downtime: &'a DowntimeCalendar,
    calendar: &'a ServiceCalendar,
}

impl<'a> TripScheduler<'a> {
    /// Create a scheduler
    ///
    /// # Arguments
    ///
    /// * `config` - Placement parameters
    /// * `profile` - Field profile handed to the order factory
    /// * `downtime` - Windows no pick may fall into
    /// * `calendar` - Service hours and daily cutoff
    pub fn new(
        config: &'a TripConfig,
        profile: &'a OrderProfile,
        downtime: &'a DowntimeCalendar,
        calendar: &'a ServiceCalendar,
    ) -> Self {
        Self {
            config,
            factory: OrderFactory::new(profile),
            downtime,
            calendar,
        }
    }

    /// Fill every service hour of a date
    ///
    /// Order ids restart at 1 on each date and stay unique within it,
    /// numbering records in creation order across both placement passes.
    pub fn fill_day(&self, date: NaiveDate, rng: &mut SeededRng) -> DayRun {
        let mut records = Vec::new();
        let mut hours = Vec::new();
        let mut next_sequence: u32 = 1;

        for hour in self.calendar.hours() {
            let outcome = self.fill_hour(date, hour, &mut next_sequence, rng, &mut records);
            hours.push(outcome);
        }

        DayRun {
            date,
            records,
            hours,
        }
    }

    fn fill_hour(
        &self,
        date: NaiveDate,
        hour: u32,
        next_sequence: &mut u32,
        rng: &mut SeededRng,
        out: &mut Vec<OrderRecord>,
    ) -> HourOutcome {
        let (target_min, target_max) = self.config.orders_per_hour;
        let target = rng.range(target_min as i64, target_max as i64 + 1) as u32;
        let (delay_min, delay_max) = self.config.delay_seconds;

        let mut placed: u32 = 0;
        let mut attempts: u32 = 0;
        let mut windows: Vec<TripWindow> = Vec::new();

        while placed < target && attempts < self.config.attempt_cap {
            // Group roll comes before the pick draw
            let mut group_size: u32 = 1;
            if rng.chance(self.config.group_chance) {
                let (group_min, group_max) = self.config.group_sizes;
                group_size = rng.range(group_min as i64, group_max as i64 + 1) as u32;
            }
            // A group that would overshoot the target collapses to a single
            if placed + group_size > target {
                group_size = 1;
            }

            // Candidate pick instant inside the hour. The downtime and trip
            // checks run before any delay is drawn; a dead pick consumes no
            // delay draws.
            let minute = rng.range(0, 60) as u32;
            let second = rng.range(0, 60) as u32;
            let picked = calendar::instant(date, hour, minute, second);
            if self.downtime.contains(picked) || windows.iter().any(|w| w.contains(picked)) {
                attempts += 1;
                continue;
            }
            if !self.calendar.within_cutoff(picked.time()) {
                attempts += 1;
                continue;
            }

            // One delay per member; the candidate is judged only after all
            // its delays are drawn
            let deliveries: Vec<NaiveDateTime> = (0..group_size)
                .map(|_| {
                    picked + Duration::seconds(rng.range(delay_min as i64, delay_max as i64 + 1))
                })
                .collect();
            if deliveries
                .iter()
                .any(|d| d.date() != date || !self.calendar.within_cutoff(d.time()))
            {
                attempts += 1;
                continue;
            }

            // Registered windows stay pairwise disjoint: the full candidate
            // window is re-checked now that the delays are known
            let trip_end = deliveries.iter().copied().max().unwrap_or(picked);
            let window = TripWindow::new(picked, trip_end);
            if windows.iter().any(|w| w.overlaps(&window)) {
                attempts += 1;
                continue;
            }
            windows.push(window);

            for delivered in deliveries {
                let id = record::order_id(date, *next_sequence);
                *next_sequence += 1;
                out.push(self.factory.completed_order(id, date, picked, delivered, rng));
                placed += 1;
            }

            if self.config.placement == PlacementPolicy::GroupedWithTrailingSingle {
                // Extra singleton riding along with the accepted group. It
                // does not count toward the target and registers no window;
                // its pick only avoids downtime and existing trips.
                let minute = rng.range(0, 60) as u32;
                let second = rng.range(0, 60) as u32;
                let picked = calendar::instant(date, hour, minute, second);
                if self.downtime.contains(picked) || windows.iter().any(|w| w.contains(picked)) {
                    attempts += 1;
                    continue;
                }
                let delay = rng.range(delay_min as i64, delay_max as i64 + 1);
                let delivered = picked + Duration::seconds(delay);
                if delivered.date() != date || !self.calendar.within_cutoff(delivered.time()) {
                    attempts += 1;
                    continue;
                }

                let id = record::order_id(date, *next_sequence);
                *next_sequence += 1;
                out.push(self.factory.completed_order(id, date, picked, delivered, rng));
            }
        }

        HourOutcome {
            hour,
            target,
            placed,
            attempts,
        }
    }
}

//! Service-day time model
//!
//! A generation run walks an inclusive range of calendar dates. Within each
//! date, service is divided into clock hours; every trip must pick and
//! deliver before a hard evening cutoff. This module provides the date
//! iteration and the wall-clock composition helpers.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// The in-day service span: which hours open for orders, and the cutoff
/// instant after which nothing may be picked or delivered.
///
/// Hours are half-open: `(9, 21)` means the 09:00 hour through the 20:00
/// hour, so picks land strictly before 21:00 while deliveries may spill
/// past it up to the cutoff.
///
/// # Example
/// ```
/// use chrono::NaiveTime;
/// use servesim_core::ServiceCalendar;
///
/// let cutoff = NaiveTime::from_hms_opt(21, 30, 0).unwrap();
/// let calendar = ServiceCalendar::new((9, 21), cutoff);
/// assert_eq!(calendar.hours().count(), 12);
/// assert!(calendar.within_cutoff(cutoff));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCalendar {
    /// First hour that opens for orders
    open_hour: u32,
    /// First hour past the service span (exclusive)
    close_hour: u32,
    /// Latest admissible pick or delivery instant (inclusive)
    cutoff: NaiveTime,
}

impl ServiceCalendar {
    /// Create a calendar for a half-open hour span and a daily cutoff
    ///
    /// # Panics
    /// Panics if the span is empty or runs past hour 24. Configuration
    /// validation rejects such spans before a calendar is built.
    pub fn new(service_hours: (u32, u32), cutoff: NaiveTime) -> Self {
        let (open_hour, close_hour) = service_hours;
        assert!(open_hour < close_hour, "service span must not be empty");
        assert!(close_hour <= 24, "service span must end within the day");
        Self {
            open_hour,
            close_hour,
            cutoff,
        }
    }

    /// Iterate the clock hours that open for orders
    pub fn hours(&self) -> std::ops::Range<u32> {
        self.open_hour..self.close_hour
    }

    /// Is this time of day at or before the cutoff?
    ///
    /// The cutoff itself is admissible; rejection starts one second past it.
    pub fn within_cutoff(&self, at: NaiveTime) -> bool {
        at <= self.cutoff
    }

    /// The daily cutoff instant
    pub fn cutoff(&self) -> NaiveTime {
        self.cutoff
    }
}

/// Compose a wall-clock instant on a service date
///
/// # Panics
/// Panics if the components do not form a valid time of day. Callers draw
/// minutes and seconds in `[0, 60)` and take hours from a validated span,
/// so this cannot fire during generation.
pub fn instant(date: NaiveDate, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, minute, second)
        .expect("hour/minute/second form a valid wall-clock time")
}

/// Iterator over an inclusive range of calendar dates
///
/// Produced by [`date_range`]. Yields nothing when the range ends before
/// it starts.
#[derive(Debug, Clone)]
pub struct DateRange {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

/// Iterate every date from `first` through `last`, inclusive
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use servesim_core::date_range;
///
/// let first = NaiveDate::from_ymd_opt(2025, 4, 28).unwrap();
/// let last = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
/// assert_eq!(date_range(first, last).count(), 8);
/// ```
pub fn date_range(first: NaiveDate, last: NaiveDate) -> DateRange {
    let next = (first <= last).then_some(first);
    DateRange { next, last }
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = if current < self.last {
            current.succ_opt()
        } else {
            None
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let days: Vec<NaiveDate> = date_range(date(2025, 4, 28), date(2025, 5, 5)).collect();
        assert_eq!(days.len(), 8, "Apr 28 through May 5 spans 8 days");
        assert_eq!(days[0], date(2025, 4, 28));
        assert_eq!(days[7], date(2025, 5, 5));
    }

    #[test]
    fn test_date_range_single_day() {
        let days: Vec<NaiveDate> = date_range(date(2025, 5, 1), date(2025, 5, 1)).collect();
        assert_eq!(days, vec![date(2025, 5, 1)]);
    }

    #[test]
    fn test_date_range_reversed_is_empty() {
        let mut days = date_range(date(2025, 5, 5), date(2025, 4, 28));
        assert_eq!(days.next(), None, "reversed range must yield nothing");
    }

    #[test]
    fn test_cutoff_boundary_is_admissible() {
        let cutoff = NaiveTime::from_hms_opt(21, 30, 0).unwrap();
        let calendar = ServiceCalendar::new((9, 21), cutoff);

        assert!(calendar.within_cutoff(cutoff), "the cutoff itself is allowed");
        let just_past = NaiveTime::from_hms_opt(21, 30, 1).unwrap();
        assert!(
            !calendar.within_cutoff(just_past),
            "one second past the cutoff is rejected"
        );
    }

    #[test]
    fn test_service_hours_span() {
        let cutoff = NaiveTime::from_hms_opt(21, 30, 0).unwrap();
        let calendar = ServiceCalendar::new((9, 21), cutoff);
        let hours: Vec<u32> = calendar.hours().collect();

        assert_eq!(hours.first(), Some(&9));
        assert_eq!(hours.last(), Some(&20), "last order hour opens at 20:00");
    }

    #[test]
    #[should_panic(expected = "service span must not be empty")]
    fn test_empty_span_panics() {
        let cutoff = NaiveTime::from_hms_opt(21, 30, 0).unwrap();
        ServiceCalendar::new((12, 12), cutoff);
    }

    #[test]
    fn test_instant_composition() {
        let at = instant(date(2025, 5, 1), 10, 13, 0);
        assert_eq!(at.to_string(), "2025-05-01 10:13:00");
    }
}

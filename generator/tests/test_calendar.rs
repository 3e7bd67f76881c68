//! Tests for the service-day time model

use chrono::{NaiveDate, NaiveTime};
use servesim_core::{date_range, ServiceCalendar};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_historical_week_spans_eight_dates() {
    let days: Vec<NaiveDate> = date_range(date(2025, 4, 28), date(2025, 5, 5)).collect();

    assert_eq!(days.len(), 8);
    assert_eq!(days[0], date(2025, 4, 28));
    assert_eq!(days[2], date(2025, 4, 30));
    assert_eq!(days[3], date(2025, 5, 1), "iteration crosses the month boundary");
    assert_eq!(days[7], date(2025, 5, 5));
}

#[test]
fn test_leap_day_iteration() {
    let days: Vec<NaiveDate> = date_range(date(2024, 2, 28), date(2024, 3, 1)).collect();
    assert_eq!(
        days,
        vec![date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)],
        "2024 is a leap year"
    );
}

#[test]
fn test_reversed_range_yields_nothing() {
    assert_eq!(date_range(date(2025, 5, 5), date(2025, 4, 28)).count(), 0);
}

#[test]
fn test_service_day_has_twelve_hours() {
    let cutoff = NaiveTime::from_hms_opt(21, 30, 0).unwrap();
    let calendar = ServiceCalendar::new((9, 21), cutoff);

    let hours: Vec<u32> = calendar.hours().collect();
    assert_eq!(hours.len(), 12);
    assert_eq!(hours[0], 9);
    assert_eq!(*hours.last().unwrap(), 20, "the 21:00 hour never opens");
}

#[test]
fn test_cutoff_is_inclusive() {
    let cutoff = NaiveTime::from_hms_opt(21, 30, 0).unwrap();
    let calendar = ServiceCalendar::new((9, 21), cutoff);

    assert!(calendar.within_cutoff(NaiveTime::from_hms_opt(21, 29, 59).unwrap()));
    assert!(calendar.within_cutoff(cutoff));
    assert!(!calendar.within_cutoff(NaiveTime::from_hms_opt(21, 30, 1).unwrap()));
}

//! Property tests
//!
//! Randomized checks of the arithmetic the rest of the suite pins down
//! with examples: fault counts for arbitrary block shapes, energy
//! quantization, window overlap symmetry and draw-stream determinism.

use chrono::{Duration, NaiveDate, NaiveTime};
use proptest::prelude::*;

use servesim_core::factory::energy_kwh;
use servesim_core::{
    DowntimeBlock, DowntimeCalendar, FaultGenerator, OrderProfile, SeededRng, ServiceCalendar,
    TripConfig, TripScheduler, TripWindow,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

proptest! {
    #[test]
    fn fault_count_is_duration_over_spacing(
        minutes in 0i64..600,
        spacing in 1i64..60,
        seed in any::<u64>(),
    ) {
        let block = DowntimeBlock::new(
            date(2025, 5, 5),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            NaiveTime::from_hms_opt((minutes / 60) as u32, (minutes % 60) as u32, 0).unwrap(),
            "E02",
            "UNABLE TO CONNECT",
        );
        let profile = OrderProfile::default();
        let generator = FaultGenerator::new(&profile, spacing);
        let mut rng = SeededRng::new(seed);

        let faults = generator.faults_for_block(&block, &mut rng);

        prop_assert_eq!(faults.len() as i64, minutes / spacing);
        for (index, fault) in faults.iter().enumerate() {
            prop_assert!(fault.is_fault());
            prop_assert_eq!(fault.fault_label(), Some("E02: UNABLE TO CONNECT"));
            let expected_id = format!("20250505-ERR{:03}", index + 1);
            prop_assert_eq!(fault.order_id(), expected_id);
            prop_assert!(
                block.start() <= fault.time_picked() && fault.time_picked() <= block.end()
            );
        }
    }

    #[test]
    fn energy_is_quantized_to_three_decimals(
        duration_seconds in 0i64..20_000,
        power_watt in 1u32..5_000,
    ) {
        let energy = energy_kwh(duration_seconds, power_watt);
        let raw = (duration_seconds as f64 / 3600.0) * (power_watt as f64 / 1000.0);

        prop_assert!(energy >= 0.0);
        let millis = energy * 1000.0;
        prop_assert!(
            (millis - millis.round()).abs() < 1e-6,
            "energy {} is not quantized to 3 decimals", energy
        );
        prop_assert!(
            (energy - raw).abs() <= 0.0005 + 1e-9,
            "energy {} strays more than half a step from {}", energy, raw
        );
    }

    #[test]
    fn window_overlap_is_symmetric(
        a_start in 0i64..86_000,
        a_len in 0i64..400,
        b_start in 0i64..86_000,
        b_len in 0i64..400,
    ) {
        let base = date(2025, 5, 1).and_hms_opt(0, 0, 0).unwrap();
        let a = TripWindow::new(
            base + Duration::seconds(a_start),
            base + Duration::seconds(a_start + a_len),
        );
        let b = TripWindow::new(
            base + Duration::seconds(b_start),
            base + Duration::seconds(b_start + b_len),
        );

        let intersects = a_start.max(b_start) <= (a_start + a_len).min(b_start + b_len);
        prop_assert_eq!(a.overlaps(&b), intersects);
        prop_assert_eq!(b.overlaps(&a), intersects, "overlap must be symmetric");
        prop_assert!(a.contains(a.start()) && a.contains(a.end()));
    }

    #[test]
    fn range_stays_within_bounds(
        seed in any::<u64>(),
        min in -1_000i64..1_000,
        span in 1i64..5_000,
    ) {
        let mut rng = SeededRng::new(seed);
        for _ in 0..50 {
            let value = rng.range(min, min + span);
            prop_assert!((min..min + span).contains(&value));
        }
    }

    #[test]
    fn any_seed_reproduces_its_day(seed in any::<u64>()) {
        let config = TripConfig::default();
        let profile = OrderProfile::default();
        let downtime = DowntimeCalendar::default();
        let calendar = ServiceCalendar::new((9, 21), NaiveTime::from_hms_opt(21, 30, 0).unwrap());
        let scheduler = TripScheduler::new(&config, &profile, &downtime, &calendar);

        let mut rng1 = SeededRng::new(seed);
        let mut rng2 = SeededRng::new(seed);
        let day1 = scheduler.fill_day(date(2025, 4, 29), &mut rng1);
        let day2 = scheduler.fill_day(date(2025, 4, 29), &mut rng2);

        prop_assert_eq!(day1.records, day2.records);
        prop_assert_eq!(rng1.state(), rng2.state());
    }
}

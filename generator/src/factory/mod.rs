//! Order record synthesis
//!
//! Once the scheduler has fixed a pick and delivery instant, this module
//! fills in everything else about the order: guest comment and rating,
//! table, amount, birth date and trip energy.
//!
//! # Key Principles
//!
//! 1. **Determinism**: every field comes from the shared seeded RNG
//! 2. **Fixed draw order**: comment roll, comment pick, rating, table,
//!    amount, birth date; reordering the draws changes every record that
//!    follows in the stream, so the order is part of the output contract
//! 3. **Coupled rating**: a negative comment forces the low rating band
//!    (1-5); everything else rates 6-10

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::record::OrderRecord;
use crate::rng::SeededRng;

/// Stochastic profile for the non-temporal fields of a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderProfile {
    /// Identifier stamped on every record
    pub server_id: String,

    /// Tables an order or fault can be attributed to
    pub table_pool: Vec<u32>,

    /// Probability that an order carries a guest comment
    pub comment_chance: f64,

    /// Comments that force the low rating band
    pub negative_comments: Vec<String>,

    /// Comments that keep the high rating band
    pub positive_comments: Vec<String>,

    /// Probability that the guest falls in the young age bracket
    pub young_guest_chance: f64,

    /// Young age bracket in years (min, max inclusive)
    pub young_age_years: (i64, i64),

    /// Older age bracket in years (min, max inclusive)
    pub older_age_years: (i64, i64),

    /// Order amount bounds in cents (min, max inclusive)
    pub amount_cents: (i64, i64),

    /// Drive power used for trip energy, in watts
    pub power_watt: u32,
}

impl Default for OrderProfile {
    fn default() -> Self {
        Self {
            server_id: "server_1337".to_string(),
            table_pool: (1..=20).collect(),
            comment_chance: 0.10,
            negative_comments: vec![
                "Traag bezorgd".to_string(),
                "Koud eten".to_string(),
                "Verkeerde bestelling".to_string(),
            ],
            positive_comments: vec![
                "Uitstekende service".to_string(),
                "Lekker en snel".to_string(),
                "Geweldige ervaring".to_string(),
            ],
            young_guest_chance: 0.43,
            young_age_years: (18, 44),
            older_age_years: (45, 90),
            amount_cents: (1_000, 10_000),
            power_watt: 900,
        }
    }
}

/// Trip energy in kWh: drive power applied for the pick-to-delivery span,
/// rounded half away from zero to 3 decimals.
///
/// # Example
/// ```
/// use servesim_core::factory::energy_kwh;
///
/// assert_eq!(energy_kwh(180, 900), 0.045);
/// assert_eq!(energy_kwh(30, 900), 0.008);
/// ```
pub fn energy_kwh(duration_seconds: i64, power_watt: u32) -> f64 {
    let raw = (duration_seconds as f64 / 3600.0) * (power_watt as f64 / 1000.0);
    (raw * 1000.0).round() / 1000.0
}

/// Derives full records from scheduled instants.
pub struct OrderFactory<'a> {
    profile: &'a OrderProfile,
}

impl<'a> OrderFactory<'a> {
    /// Create a factory over a field profile
    pub fn new(profile: &'a OrderProfile) -> Self {
        Self { profile }
    }

    /// Build a delivered order for a scheduled pick/delivery pair
    ///
    /// Consumes the RNG in the fixed field draw order.
    pub fn completed_order(
        &self,
        order_id: String,
        date: NaiveDate,
        picked: NaiveDateTime,
        delivered: NaiveDateTime,
        rng: &mut SeededRng,
    ) -> OrderRecord {
        let comment = self.draw_comment(rng);
        let rating = self.draw_rating(comment.as_ref(), rng);
        let table = *rng.pick(&self.profile.table_pool);
        let amount_cents = self.draw_amount(rng);
        let birth_date = self.draw_birth_date(date, rng);

        let duration = delivered.signed_duration_since(picked);
        let energy = energy_kwh(duration.num_seconds(), self.profile.power_watt);

        OrderRecord::completed(
            order_id,
            date,
            picked.time(),
            delivered.time(),
            self.profile.server_id.clone(),
            table,
            Some(rating),
            amount_cents,
            birth_date,
            comment.map(|drawn| drawn.text),
            energy,
        )
    }

    /// Build a fault record at a downtime instant
    ///
    /// Faults skip the comment and rating draws but fill table, amount and
    /// birth date like any order.
    pub fn fault_record(
        &self,
        order_id: String,
        date: NaiveDate,
        at: NaiveDateTime,
        fault_label: String,
        rng: &mut SeededRng,
    ) -> OrderRecord {
        let table = *rng.pick(&self.profile.table_pool);
        let amount_cents = self.draw_amount(rng);
        let birth_date = self.draw_birth_date(date, rng);

        OrderRecord::fault(
            order_id,
            date,
            at.time(),
            self.profile.server_id.clone(),
            table,
            amount_cents,
            birth_date,
            fault_label,
        )
    }

    /// Roll for a comment, then pick uniformly across both pools
    ///
    /// The pick indexes the negative pool first, so negativity comes from
    /// the drawn index rather than text comparison.
    fn draw_comment(&self, rng: &mut SeededRng) -> Option<DrawnComment> {
        if !rng.chance(self.profile.comment_chance) {
            return None;
        }

        let negatives = self.profile.negative_comments.len();
        let total = negatives + self.profile.positive_comments.len();
        let index = rng.range(0, total as i64) as usize;
        if index < negatives {
            Some(DrawnComment {
                text: self.profile.negative_comments[index].clone(),
                negative: true,
            })
        } else {
            Some(DrawnComment {
                text: self.profile.positive_comments[index - negatives].clone(),
                negative: false,
            })
        }
    }

    /// Rating band follows the comment: negative → 1-5, otherwise 6-10
    fn draw_rating(&self, comment: Option<&DrawnComment>, rng: &mut SeededRng) -> u8 {
        let negative = comment.map(|drawn| drawn.negative).unwrap_or(false);
        if negative {
            rng.range(1, 6) as u8
        } else {
            rng.range(6, 11) as u8
        }
    }

    fn draw_amount(&self, rng: &mut SeededRng) -> i64 {
        let (min, max) = self.profile.amount_cents;
        rng.range(min, max + 1) // +1 for inclusive range
    }

    /// Age bracket roll, age in years, then a day-of-year scatter
    fn draw_birth_date(&self, day: NaiveDate, rng: &mut SeededRng) -> NaiveDate {
        let (min_age, max_age) = if rng.chance(self.profile.young_guest_chance) {
            self.profile.young_age_years
        } else {
            self.profile.older_age_years
        };
        let age = rng.range(min_age, max_age + 1);
        let scatter = rng.range(0, 365);
        day - Duration::days(age * 365 + scatter)
    }
}

/// A drawn comment together with which pool it came from.
struct DrawnComment {
    text: String,
    negative: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn trip(h: u32, m: u32, s: u32, delay_seconds: i64) -> (NaiveDateTime, NaiveDateTime) {
        let picked = date(2025, 5, 1).and_hms_opt(h, m, s).unwrap();
        (picked, picked + Duration::seconds(delay_seconds))
    }

    #[test]
    fn test_same_seed_same_record() {
        let profile = OrderProfile::default();
        let factory = OrderFactory::new(&profile);
        let (picked, delivered) = trip(12, 5, 31, 95);

        let mut rng1 = SeededRng::new(42);
        let mut rng2 = SeededRng::new(42);
        let record1 =
            factory.completed_order("id".to_string(), date(2025, 5, 1), picked, delivered, &mut rng1);
        let record2 =
            factory.completed_order("id".to_string(), date(2025, 5, 1), picked, delivered, &mut rng2);

        assert_eq!(record1, record2, "same seed must give an identical record");
    }

    #[test]
    fn test_rating_band_follows_comment() {
        let profile = OrderProfile {
            comment_chance: 1.0, // every order gets a comment
            ..OrderProfile::default()
        };
        let factory = OrderFactory::new(&profile);
        let mut rng = SeededRng::new(7);

        for sequence in 0..200 {
            let (picked, delivered) = trip(12, 0, 0, 60);
            let record = factory.completed_order(
                format!("id-{}", sequence),
                date(2025, 5, 1),
                picked,
                delivered,
                &mut rng,
            );

            let comment = record.comment().expect("comment_chance 1.0 always draws");
            let rating = record.rating().expect("orders always carry a rating");
            if profile.negative_comments.iter().any(|c| c == comment) {
                assert!(
                    (1..=5).contains(&rating),
                    "negative comment {:?} must rate 1-5, got {}",
                    comment,
                    rating
                );
            } else {
                assert!(
                    (6..=10).contains(&rating),
                    "positive comment {:?} must rate 6-10, got {}",
                    comment,
                    rating
                );
            }
        }
    }

    #[test]
    fn test_no_comment_keeps_high_band() {
        let profile = OrderProfile {
            comment_chance: 0.0,
            ..OrderProfile::default()
        };
        let factory = OrderFactory::new(&profile);
        let mut rng = SeededRng::new(11);

        for sequence in 0..100 {
            let (picked, delivered) = trip(13, 0, 0, 45);
            let record = factory.completed_order(
                format!("id-{}", sequence),
                date(2025, 5, 1),
                picked,
                delivered,
                &mut rng,
            );

            assert_eq!(record.comment(), None);
            let rating = record.rating().unwrap();
            assert!(
                (6..=10).contains(&rating),
                "uncommented orders rate 6-10, got {}",
                rating
            );
        }
    }

    #[test]
    fn test_amount_and_table_within_pools() {
        let profile = OrderProfile::default();
        let factory = OrderFactory::new(&profile);
        let mut rng = SeededRng::new(1);

        for sequence in 0..100 {
            let (picked, delivered) = trip(14, 0, 0, 120);
            let record = factory.completed_order(
                format!("id-{}", sequence),
                date(2025, 5, 1),
                picked,
                delivered,
                &mut rng,
            );

            assert!((1_000..=10_000).contains(&record.amount_cents()));
            assert!(profile.table_pool.contains(&record.table()));
        }
    }

    #[test]
    fn test_birth_date_within_age_brackets() {
        let profile = OrderProfile::default();
        let factory = OrderFactory::new(&profile);
        let mut rng = SeededRng::new(3);
        let day = date(2025, 5, 1);

        for sequence in 0..100 {
            let (picked, delivered) = trip(15, 0, 0, 90);
            let record = factory.completed_order(
                format!("id-{}", sequence),
                day,
                picked,
                delivered,
                &mut rng,
            );

            // Oldest: 90 years plus the 364-day scatter; youngest: exactly 18 years.
            let oldest = day - Duration::days(90 * 365 + 364);
            let youngest = day - Duration::days(18 * 365);
            assert!(
                (oldest..=youngest).contains(&record.birth_date()),
                "birth date {} outside the configured brackets",
                record.birth_date()
            );
        }
    }

    #[test]
    fn test_fault_record_fields() {
        let profile = OrderProfile::default();
        let factory = OrderFactory::new(&profile);
        let mut rng = SeededRng::new(9);

        let at = date(2025, 5, 5).and_hms_opt(9, 30, 0).unwrap();
        let fault = factory.fault_record(
            "20250505-ERR001".to_string(),
            date(2025, 5, 5),
            at,
            "E02: UNABLE TO CONNECT".to_string(),
            &mut rng,
        );

        assert!(fault.is_fault());
        assert_eq!(fault.fault_label(), Some("E02: UNABLE TO CONNECT"));
        assert_eq!(fault.time_delivered(), None);
        assert_eq!(fault.rating(), None);
        assert_eq!(fault.comment(), None);
        assert_eq!(fault.energy_kwh(), None);
        assert!(profile.table_pool.contains(&fault.table()));
        assert!((1_000..=10_000).contains(&fault.amount_cents()));
    }

    #[test]
    fn test_energy_rounds_to_three_decimals() {
        assert_eq!(energy_kwh(180, 900), 0.045);
        assert_eq!(energy_kwh(100, 900), 0.025);
        assert_eq!(energy_kwh(30, 900), 0.008, "0.0075 rounds half away to 0.008");
        assert_eq!(energy_kwh(0, 900), 0.0);
    }
}

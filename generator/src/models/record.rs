//! Order record model
//!
//! One row of the generated log. A record is either a delivered order or a
//! fault entry standing in for a downtime window; both share the same wire
//! shape, with fields that do not apply left empty.
//!
//! CRITICAL: All money values are i64 (cents). Euros appear only at the
//! serialization boundary.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Wire format for calendar dates (`28-04-2025`)
pub const DATE_FORMAT: &str = "%d-%m-%Y";
/// Wire format for times of day (`10:13:00`)
pub const TIME_FORMAT: &str = "%H:%M:%S";
/// Date prefix of record ids (`20250428`)
pub const ID_DATE_FORMAT: &str = "%Y%m%d";

/// Build an order id: date prefix plus zero-padded day sequence
///
/// The sequence restarts at 1 on every service date, so ids are unique per
/// date. Padding is three digits; larger sequences keep all their digits.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use servesim_core::models::record::order_id;
///
/// let date = NaiveDate::from_ymd_opt(2025, 4, 28).unwrap();
/// assert_eq!(order_id(date, 7), "20250428-007");
/// assert_eq!(order_id(date, 1234), "20250428-1234");
/// ```
pub fn order_id(date: NaiveDate, sequence: u32) -> String {
    format!("{}-{:03}", date.format(ID_DATE_FORMAT), sequence)
}

/// Build a fault id: date prefix plus `ERR` and a zero-padded sequence
///
/// Fault sequences restart at 1 per downtime block, not per date; two
/// blocks on one date repeat ids. See the fault generator.
pub fn fault_id(date: NaiveDate, sequence: u32) -> String {
    format!("{}-ERR{:03}", date.format(ID_DATE_FORMAT), sequence)
}

/// One row of the generated service log
///
/// Field order matches the wire layout. Optional fields serialize as `""`
/// when absent, so every row carries every column; downstream consumers
/// read the log as a uniform table.
///
/// # Example
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use servesim_core::models::record::{order_id, OrderRecord};
///
/// let date = NaiveDate::from_ymd_opt(2025, 4, 28).unwrap();
/// let picked = NaiveTime::from_hms_opt(12, 5, 31).unwrap();
/// let delivered = NaiveTime::from_hms_opt(12, 6, 45).unwrap();
/// let record = OrderRecord::completed(
///     order_id(date, 1),
///     date,
///     picked,
///     delivered,
///     "server_1337".to_string(),
///     4,
///     Some(7),
///     4250, // EUR 42.50 in cents
///     NaiveDate::from_ymd_opt(1991, 3, 2).unwrap(),
///     None,
///     0.019,
/// );
/// assert!(!record.is_fault());
/// assert_eq!(record.amount_cents(), 4250);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRecord {
    /// Record id, unique per service date for orders
    #[serde(rename = "Order_ID")]
    order_id: String,

    /// Service date
    #[serde(rename = "Date", serialize_with = "wire::date_dmy")]
    date: NaiveDate,

    /// Instant the order was picked up (fault instant for fault records)
    #[serde(rename = "Time_Picked", serialize_with = "wire::time_hms")]
    time_picked: NaiveTime,

    /// Delivery instant; absent on fault records
    #[serde(rename = "Time_Delivery", serialize_with = "wire::time_or_blank")]
    time_delivered: Option<NaiveTime>,

    /// Identifier of the serving unit
    #[serde(rename = "Server")]
    server_id: String,

    /// Table the order belongs to
    #[serde(rename = "Table")]
    table: u32,

    /// Guest rating, 1-10; low band (1-5) goes with negative comments.
    /// Absent on fault records.
    #[serde(rename = "Rating", serialize_with = "wire::rating_or_blank")]
    rating: Option<u8>,

    /// Order amount (i64 cents), serialized as euros
    #[serde(rename = "Total_Amount", serialize_with = "wire::euros")]
    amount_cents: i64,

    /// Guest birth date
    #[serde(rename = "Birth_Date", serialize_with = "wire::date_dmy")]
    birth_date: NaiveDate,

    /// Guest comment, drawn for roughly one order in ten
    #[serde(rename = "Comment", serialize_with = "wire::text_or_blank")]
    comment: Option<String>,

    /// Trip energy in kWh, rounded to 3 decimals; absent on fault records
    #[serde(rename = "Power consumption", serialize_with = "wire::kwh_or_blank")]
    energy_kwh: Option<f64>,

    /// `"<code>: <message>"` label on fault records, absent on orders
    #[serde(rename = "Error_code", serialize_with = "wire::text_or_blank")]
    fault: Option<String>,
}

impl OrderRecord {
    /// Create a delivered order record
    ///
    /// # Panics
    /// Panics if delivery precedes pickup, the rating leaves 1-10, or the
    /// amount is not positive. The factory draws all three from validated
    /// ranges.
    #[allow(clippy::too_many_arguments)]
    pub fn completed(
        order_id: String,
        date: NaiveDate,
        time_picked: NaiveTime,
        time_delivered: NaiveTime,
        server_id: String,
        table: u32,
        rating: Option<u8>,
        amount_cents: i64,
        birth_date: NaiveDate,
        comment: Option<String>,
        energy_kwh: f64,
    ) -> Self {
        assert!(
            time_delivered >= time_picked,
            "delivery must not precede pickup"
        );
        assert!(amount_cents > 0, "amount must be positive");
        if let Some(r) = rating {
            assert!((1..=10).contains(&r), "rating must be within 1-10");
        }

        Self {
            order_id,
            date,
            time_picked,
            time_delivered: Some(time_delivered),
            server_id,
            table,
            rating,
            amount_cents,
            birth_date,
            comment,
            energy_kwh: Some(energy_kwh),
            fault: None,
        }
    }

    /// Create a fault record for a downtime window
    ///
    /// Delivery, rating, comment and energy stay empty; table, amount and
    /// birth date are filled like on orders.
    ///
    /// # Panics
    /// Panics if the amount is not positive.
    #[allow(clippy::too_many_arguments)]
    pub fn fault(
        order_id: String,
        date: NaiveDate,
        time_picked: NaiveTime,
        server_id: String,
        table: u32,
        amount_cents: i64,
        birth_date: NaiveDate,
        fault_label: String,
    ) -> Self {
        assert!(amount_cents > 0, "amount must be positive");

        Self {
            order_id,
            date,
            time_picked,
            time_delivered: None,
            server_id,
            table,
            rating: None,
            amount_cents,
            birth_date,
            comment: None,
            energy_kwh: None,
            fault: Some(fault_label),
        }
    }

    /// Record id
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Service date
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Pickup instant (fault instant for fault records)
    pub fn time_picked(&self) -> NaiveTime {
        self.time_picked
    }

    /// Delivery instant, `None` on fault records
    pub fn time_delivered(&self) -> Option<NaiveTime> {
        self.time_delivered
    }

    /// Serving unit id
    pub fn server_id(&self) -> &str {
        &self.server_id
    }

    /// Table number
    pub fn table(&self) -> u32 {
        self.table
    }

    /// Guest rating, `None` on fault records
    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    /// Order amount (i64 cents)
    pub fn amount_cents(&self) -> i64 {
        self.amount_cents
    }

    /// Guest birth date
    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Guest comment, if one was drawn
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Trip energy in kWh, `None` on fault records
    pub fn energy_kwh(&self) -> Option<f64> {
        self.energy_kwh
    }

    /// Fault label, `None` on order records
    pub fn fault_label(&self) -> Option<&str> {
        self.fault.as_deref()
    }

    /// Is this a fault record?
    pub fn is_fault(&self) -> bool {
        self.fault.is_some()
    }

    /// The date as it appears on the wire (`DD-MM-YYYY`)
    ///
    /// Log ordering compares these strings, not the underlying dates.
    pub fn date_text(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// The pickup time as it appears on the wire (`HH:MM:SS`)
    pub fn time_text(&self) -> String {
        self.time_picked.format(TIME_FORMAT).to_string()
    }
}

mod wire {
    //! Serializers for the log's uniform-table convention: absent values
    //! become `""` rather than null, dates and times become fixed-width
    //! strings, cents become euros.

    use chrono::{NaiveDate, NaiveTime};
    use serde::Serializer;

    use super::{DATE_FORMAT, TIME_FORMAT};

    pub fn date_dmy<S: Serializer>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(DATE_FORMAT))
    }

    pub fn time_hms<S: Serializer>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(TIME_FORMAT))
    }

    pub fn time_or_blank<S: Serializer>(
        value: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => time_hms(time, serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn rating_or_blank<S: Serializer>(
        value: &Option<u8>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(rating) => serializer.serialize_u8(*rating),
            None => serializer.serialize_str(""),
        }
    }

    pub fn euros<S: Serializer>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(*cents as f64 / 100.0)
    }

    pub fn text_or_blank<S: Serializer>(
        value: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(text) => serializer.serialize_str(text),
            None => serializer.serialize_str(""),
        }
    }

    pub fn kwh_or_blank<S: Serializer>(
        value: &Option<f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(kwh) => serializer.serialize_f64(*kwh),
            None => serializer.serialize_str(""),
        }
    }
}

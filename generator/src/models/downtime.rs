//! Downtime block model
//!
//! A downtime block is a configured window on one service date during which
//! the robot server is out of order. Blocks have two effects on the log:
//! no trip may be *picked* inside one, and each block later emits a train
//! of fault records in its place.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A single downtime window on a service date
///
/// The window is inclusive at both ends: a pick at exactly `start` or
/// exactly `end` counts as inside.
///
/// # Example
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use servesim_core::DowntimeBlock;
///
/// let block = DowntimeBlock::new(
///     NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
///     NaiveTime::from_hms_opt(10, 13, 0).unwrap(),
///     NaiveTime::from_hms_opt(11, 56, 0).unwrap(),
///     "E01",
///     "POLLING ERROR",
/// );
/// assert_eq!(block.label(), "E01: POLLING ERROR");
/// assert_eq!(block.duration_minutes(), 103);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DowntimeBlock {
    /// Service date the window falls on
    date: NaiveDate,
    /// First instant of the window (inclusive)
    start: NaiveTime,
    /// Last instant of the window (inclusive)
    end: NaiveTime,
    /// Short fault code, e.g. "E02"
    code: String,
    /// Human-readable fault message
    message: String,
}

impl DowntimeBlock {
    /// Create a downtime block
    ///
    /// `end` before `start` is accepted here; such a malformed block simply
    /// matches no instant and emits no faults.
    pub fn new(
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            date,
            start,
            end,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Service date of the window
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// First instant of the window (inclusive)
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// Last instant of the window (inclusive)
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Short fault code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable fault message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The `"<code>: <message>"` label carried by fault records
    pub fn label(&self) -> String {
        format!("{}: {}", self.code, self.message)
    }

    /// Whole minutes from start to end
    ///
    /// Negative when the block is malformed (`end` before `start`); callers
    /// deriving fault counts must guard for that.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_seconds() / 60
    }

    /// Does this instant fall inside the window?
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.date == at.date() && self.start <= at.time() && at.time() <= self.end
    }
}

/// All downtime windows of a generation run
///
/// Wraps the configured blocks behind one membership test so the scheduler
/// does not care how many windows a date carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DowntimeCalendar {
    blocks: Vec<DowntimeBlock>,
}

impl DowntimeCalendar {
    /// Create a calendar from configured blocks
    pub fn new(blocks: Vec<DowntimeBlock>) -> Self {
        Self { blocks }
    }

    /// Does any block contain this instant?
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.blocks.iter().any(|block| block.contains(at))
    }

    /// The configured blocks, in configuration order
    pub fn blocks(&self) -> &[DowntimeBlock] {
        &self.blocks
    }

    /// Number of configured blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True when no blocks are configured
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

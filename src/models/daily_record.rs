//! Daily work record model and raw-entry parsing.
//!
//! This module defines the [`WorkStatus`] tag, the typed [`DailyRecord`], the
//! string-based [`RawDailyEntry`] that arrives from the log table or storage,
//! and the [`NormalizedRecord`] produced once net minutes have been derived.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Attendance status of a single day.
///
/// # Example
///
/// ```
/// use payroll_engine::models::WorkStatus;
///
/// let status: WorkStatus = "unpaid holiday".parse().unwrap();
/// assert_eq!(status, WorkStatus::UnpaidHoliday);
/// assert_eq!(WorkStatus::Absence.to_string(), "ABSENCE");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkStatus {
    /// Ordinary working day.
    #[default]
    Normal,
    /// Paid leave; never counts as shortfall.
    PaidHoliday,
    /// Unpaid leave; counts as a full shortfall day but never triggers the weekly penalty.
    UnpaidHoliday,
    /// Unauthorised absence; full shortfall day and triggers the weekly penalty.
    Absence,
}

impl WorkStatus {
    /// True for statuses that zero the day's worked minutes.
    pub fn is_non_working(&self) -> bool {
        matches!(self, WorkStatus::UnpaidHoliday | WorkStatus::Absence)
    }
}

impl std::fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkStatus::Normal => write!(f, "NORMAL"),
            WorkStatus::PaidHoliday => write!(f, "PAID_HOLIDAY"),
            WorkStatus::UnpaidHoliday => write!(f, "UNPAID_HOLIDAY"),
            WorkStatus::Absence => write!(f, "ABSENCE"),
        }
    }
}

impl std::str::FromStr for WorkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect();
        match key.as_str() {
            "NORMAL" => Ok(WorkStatus::Normal),
            "PAID_HOLIDAY" => Ok(WorkStatus::PaidHoliday),
            "UNPAID_HOLIDAY" => Ok(WorkStatus::UnpaidHoliday),
            "ABSENCE" => Ok(WorkStatus::Absence),
            _ => Err(format!("unknown status '{}'", s)),
        }
    }
}

/// A day entry as typed into the work log, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawDailyEntry {
    /// Date in `YYYY-MM-DD` form.
    pub date: String,
    /// Start time (`HH:MM` or `HH:MM:SS`), empty when not worked.
    #[serde(default)]
    pub start_time: Option<String>,
    /// End time (`HH:MM` or `HH:MM:SS`), empty when not worked.
    #[serde(default)]
    pub end_time: Option<String>,
    /// Status tag; defaults to `NORMAL`.
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    WorkStatus::Normal.to_string()
}

/// A validated day of the work log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DailyRecord {
    /// The calendar date of the record.
    pub date: NaiveDate,
    /// Shift start, if recorded.
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    /// Shift end, if recorded. An end before the start crosses midnight.
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    /// Attendance status.
    #[serde(default)]
    pub status: WorkStatus,
}

impl DailyRecord {
    /// A NORMAL record with no times, equivalent to a missing day.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            start_time: None,
            end_time: None,
            status: WorkStatus::Normal,
        }
    }

    /// Returns the start and end times when both are present.
    pub fn times(&self) -> Option<(NaiveTime, NaiveTime)> {
        self.start_time.zip(self.end_time)
    }

    /// Validates a raw entry. `row` is the 1-based position used in error reports.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{DailyRecord, RawDailyEntry, WorkStatus};
    ///
    /// let raw = RawDailyEntry {
    ///     date: "2026-01-12".to_string(),
    ///     start_time: Some("09:00".to_string()),
    ///     end_time: Some("18:00".to_string()),
    ///     status: "NORMAL".to_string(),
    /// };
    /// let record = DailyRecord::parse(1, &raw).unwrap();
    /// assert_eq!(record.status, WorkStatus::Normal);
    /// assert!(record.times().is_some());
    /// ```
    pub fn parse(row: usize, raw: &RawDailyEntry) -> EngineResult<Self> {
        let date = NaiveDate::parse_from_str(raw.date.trim(), "%Y-%m-%d").map_err(|_| {
            EngineError::InvalidRecord {
                row,
                message: format!("unparseable date '{}'", raw.date),
            }
        })?;
        let start_time = parse_time(row, "start", raw.start_time.as_deref())?;
        let end_time = parse_time(row, "end", raw.end_time.as_deref())?;
        let status = raw
            .status
            .parse::<WorkStatus>()
            .map_err(|message| EngineError::InvalidRecord {
                row,
                message: format!("{} on {}", message, raw.date),
            })?;

        Ok(Self {
            date,
            start_time,
            end_time,
            status,
        })
    }
}

impl From<&DailyRecord> for RawDailyEntry {
    fn from(record: &DailyRecord) -> Self {
        RawDailyEntry {
            date: record.date.format("%Y-%m-%d").to_string(),
            start_time: record.start_time.map(|t| t.format("%H:%M").to_string()),
            end_time: record.end_time.map(|t| t.format("%H:%M").to_string()),
            status: record.status.to_string(),
        }
    }
}

fn parse_time(row: usize, which: &str, value: Option<&str>) -> EngineResult<Option<NaiveTime>> {
    let Some(text) = value.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .map(Some)
        .map_err(|_| EngineError::InvalidRecord {
            row,
            message: format!("unparseable {} time '{}'", which, text),
        })
}

/// Parses a whole work log, aborting at the first invalid row.
pub fn parse_records(entries: &[RawDailyEntry]) -> EngineResult<Vec<DailyRecord>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, raw)| DailyRecord::parse(index + 1, raw))
        .collect()
}

/// A daily record with the values derived by the work-minute normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// The source record.
    pub record: DailyRecord,
    /// True when the date is a Saturday, Sunday or designated holiday.
    pub is_originally_public_holiday: bool,
    /// Worked minutes after breaks, never negative.
    pub net_work_minutes: i64,
}

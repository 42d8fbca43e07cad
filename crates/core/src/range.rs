//! Inclusive date ranges used to scope ledger reads and rollups.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Inclusive date range with optional open ends.
///
/// `DateRange::all_time()` (both ends open) matches every date.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl ValueObject for DateRange {}

impl DateRange {
    /// Closed range `[start, end]`.
    pub fn between(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        Self::new(Some(start), Some(end))
    }

    /// Range with optional bounds; rejects `start > end`.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> DomainResult<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(DomainError::validation(format!(
                    "date range start {s} is after end {e}"
                )));
            }
        }
        Ok(Self { start, end })
    }

    pub fn all_time() -> Self {
        Self::default()
    }

    pub fn from(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    pub fn until(end: NaiveDate) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    pub fn is_all_time(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

impl core::fmt::Display for DateRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match (self.start, self.end) {
            (None, None) => write!(f, "all-time"),
            (Some(s), None) => write!(f, "{s}.."),
            (None, Some(e)) => write!(f, "..={e}"),
            (Some(s), Some(e)) => write!(f, "{s}..={e}"),
        }
    }
}

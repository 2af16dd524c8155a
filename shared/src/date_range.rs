//! Inclusive reporting period and the dashboard's default-period policy

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use thiserror::Error;

/// Start is after end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid date range: {start} is after {end}")]
pub struct InvalidDateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Inclusive [start, end] period. Every record load covers exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InvalidDateRange> {
        if start > end {
            return Err(InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Default reporting period: 1st of the current month through yesterday.
    /// On the 1st that collapses to the whole previous month.
    pub fn reporting_default(today: NaiveDate) -> Self {
        let end = today.pred_opt().unwrap_or(today);
        let start = end.with_day(1).unwrap_or(end);
        Self { start, end }
    }
}

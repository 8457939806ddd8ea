// View range module
// Half-open [min, max) bound on the dates a calendar can navigate to

use chrono::{Duration, NaiveDate};

use crate::error::{CalendarError, Result};

/// Navigable date bound. `min` is inclusive, `max` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRange {
    min: NaiveDate,
    max: NaiveDate,
}

impl ViewRange {
    /// Create a range, rejecting `max <= min`.
    pub fn new(min: NaiveDate, max: NaiveDate) -> Result<Self> {
        if max <= min {
            return Err(CalendarError::InvertedBounds { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> NaiveDate {
        self.min
    }

    pub fn max(&self) -> NaiveDate {
        self.max
    }

    /// The last navigable day (`max - 1 day`).
    pub fn last_day(&self) -> NaiveDate {
        self.max - Duration::days(1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.min && date < self.max
    }

    /// Clamp `date` into `[min, last_day]`.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.min, self.last_day())
    }

    pub fn out_of_range(&self, date: NaiveDate) -> CalendarError {
        CalendarError::DateOutOfRange {
            date,
            min: self.min,
            max: self.max,
        }
    }
}

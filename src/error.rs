//! Error types shared by the calendar core.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid bounds: maximum date {max} must be after minimum date {min}")]
    InvertedBounds { min: NaiveDate, max: NaiveDate },

    #[error("Page {page} is out of range (total pages: {total})")]
    PageOutOfRange { page: usize, total: usize },

    #[error("Date {date} is outside the navigable range [{min}, {max})")]
    DateOutOfRange {
        date: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },

    #[error("Invalid week start day {0} (expected 0-6, 0 = Sunday)")]
    InvalidWeekStart(u8),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Event not found: {0}")]
    EventNotFound(i64),

    #[error("Missing dependency: {0} must be provided before use")]
    MissingDependency(&'static str),

    #[error("No page transition is pending")]
    NoPendingTransition,
}

impl CalendarError {
    /// Whether the error comes from bad configuration rather than a bad
    /// navigation target or event.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvertedBounds { .. } | Self::InvalidWeekStart(_) | Self::MissingDependency(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CalendarError>;

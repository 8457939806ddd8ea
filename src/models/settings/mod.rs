// Settings module
// User-facing configuration for calendar pages

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};
use crate::models::ui::ViewType;
use crate::models::view_range::ViewRange;
use crate::utils::date::weekday_from_index;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 0 = Sunday, 1 = Monday, ... 6 = Saturday
    pub first_day_of_week: u8,
    pub min_date: NaiveDate,
    /// Exclusive upper bound
    pub max_date: NaiveDate,
    /// Page shown at startup; `None` means today
    pub initial_date: Option<NaiveDate>,
    pub default_view: ViewType,
    /// Event tiles shown per month cell before collapsing into "+N more"
    pub max_tiles_per_cell: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            first_day_of_week: 0, // Sunday
            min_date: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN),
            max_date: NaiveDate::from_ymd_opt(2100, 1, 1).unwrap_or(NaiveDate::MAX),
            initial_date: None,
            default_view: ViewType::Month,
            max_tiles_per_cell: 3,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        weekday_from_index(self.first_day_of_week)?;
        ViewRange::new(self.min_date, self.max_date)?;
        Ok(())
    }

    pub fn week_start(&self) -> Result<Weekday> {
        weekday_from_index(self.first_day_of_week)
    }

    pub fn view_range(&self) -> Result<ViewRange> {
        ViewRange::new(self.min_date, self.max_date)
    }
}

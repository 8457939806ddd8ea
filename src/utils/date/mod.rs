//! Date and grid helpers for month, week and day pages.
//!
//! Weekday indices follow the settings convention: 0 = Sunday ... 6 = Saturday.
//! All "between" counts are inclusive, so the same month, week or day yields 1.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

use crate::error::{CalendarError, Result};

/// Number of cells in a five-week grid.
pub const SHORT_GRID_DAYS: usize = 35;
/// Number of cells in a six-week grid.
pub const LONG_GRID_DAYS: usize = 42;

/// Convert a settings weekday index (0 = Sunday) to a [`Weekday`].
pub fn weekday_from_index(index: u8) -> Result<Weekday> {
    match index {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        other => Err(CalendarError::InvalidWeekStart(other)),
    }
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `start` - The weekday shown in the first column
pub fn week_start(date: NaiveDate, start: Weekday) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - start.num_days_from_sunday() as i64).rem_euclid(7);
    date - Duration::days(offset)
}

/// The seven days of the week containing `date`, beginning on `start`.
pub fn days_in_week(date: NaiveDate, start: Weekday) -> Vec<NaiveDate> {
    let first = week_start(date, start);
    (0..7).map(|offset| first + Duration::days(offset)).collect()
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_day_of_month(date);
    first + Duration::days(days_in_month(date.year(), date.month()) as i64 - 1)
}

/// Number of days in the given month, or 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// The day cells of the month grid containing `date`.
///
/// The grid starts on the week-start day on or before the first of the month.
/// When the first displayed week through the week holding the last day of the
/// month spans more than 35 days the grid has six rows, otherwise five
/// (a February that fits in four rows is padded to five).
pub fn days_in_month_grid(date: NaiveDate, start: Weekday) -> Vec<NaiveDate> {
    let first_displayed = week_start(first_day_of_month(date), start);
    let last_displayed = week_start(last_day_of_month(date), start) + Duration::days(6);
    let span = (last_displayed - first_displayed).num_days() + 1;

    let len = if span > SHORT_GRID_DAYS as i64 {
        LONG_GRID_DAYS
    } else {
        SHORT_GRID_DAYS
    };

    (0..len as i64)
        .map(|offset| first_displayed + Duration::days(offset))
        .collect()
}

/// Number of week rows (5 or 6) in the month grid containing `date`.
pub fn weeks_in_month_grid(date: NaiveDate, start: Weekday) -> u32 {
    (days_in_month_grid(date, start).len() / 7) as u32
}

/// Inclusive number of calendar months spanned by `a` and `b`, in either order.
pub fn months_between(a: NaiveDate, b: NaiveDate) -> u32 {
    let diff = (b.year() - a.year()) * 12 + (b.month() as i32 - a.month() as i32);
    diff.unsigned_abs() + 1
}

/// Inclusive number of weeks spanned by `a` and `b`, in either order.
pub fn weeks_between(a: NaiveDate, b: NaiveDate, start: Weekday) -> u32 {
    let days = (week_start(b, start) - week_start(a, start)).num_days();
    (days.unsigned_abs() / 7) as u32 + 1
}

/// Inclusive number of days spanned by `a` and `b`, in either order.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> u32 {
    (b - a).num_days().unsigned_abs() as u32 + 1
}

/// Shift `date` by `delta` months, clamping the day to the target month's length.
///
/// Returns `None` when the result falls outside chrono's supported range.
pub fn add_months(date: NaiveDate, delta: i32) -> Option<NaiveDate> {
    let total_months = (date.year() * 12) + (date.month() as i32 - 1) + delta;
    let year = total_months.div_euclid(12);
    let month = total_months.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// Short weekday labels rotated so the first entry is `start`.
pub fn weekday_labels(start: Weekday) -> Vec<&'static str> {
    const NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
    let origin = start.num_days_from_sunday() as usize;
    (0..7).map(|idx| NAMES[(origin + idx) % 7]).collect()
}

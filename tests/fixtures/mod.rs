// Test fixtures - reusable test data
// Provides consistent dates and events across integration tests

#![allow(dead_code)]

use calendar_pages::models::event::CalendarEvent;
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Sample dates for testing
pub mod dates {
    use super::*;

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    pub fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
        date.and_hms_opt(hour, minute, 0).unwrap()
    }

    /// Lower navigation bound used throughout the tests
    pub fn range_min() -> NaiveDate {
        ymd(2020, 1, 1)
    }

    /// Exclusive upper navigation bound
    pub fn range_max() -> NaiveDate {
        ymd(2025, 1, 1)
    }

    /// Thursday, May 13, 2021
    pub fn may_13_2021() -> NaiveDate {
        ymd(2021, 5, 13)
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        ymd(2024, 2, 29)
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    pub fn timed(title: &str, start: NaiveDateTime, minutes: i64) -> CalendarEvent {
        CalendarEvent::new(title, start, start + Duration::minutes(minutes)).unwrap()
    }

    pub fn standup(date: NaiveDate) -> CalendarEvent {
        timed("Daily Standup", dates::at(date, 9, 15), 15)
    }

    pub fn lunch(date: NaiveDate) -> CalendarEvent {
        timed("Team Lunch", dates::at(date, 12, 0), 60)
    }

    pub fn offsite(start: NaiveDate) -> CalendarEvent {
        CalendarEvent::builder()
            .title("Offsite")
            .event_type("Work")
            .start(dates::at(start, 8, 0))
            .end(dates::at(start + Duration::days(2), 17, 0))
            .build()
            .unwrap()
    }

    pub fn holiday(date: NaiveDate) -> CalendarEvent {
        CalendarEvent::builder()
            .title("Public Holiday")
            .all_day_on(date)
            .build()
            .unwrap()
    }
}

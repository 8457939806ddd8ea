// Event module
// Calendar event model shown on month, week and day pages

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};

/// A titled, typed occurrence with start and end timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub all_day: bool,
}

impl CalendarEvent {
    /// Create a new event with required fields
    ///
    /// # Arguments
    /// * `title` - Event title (required, non-empty)
    /// * `start` - Event start time
    /// * `end` - Event end time (must be after `start`)
    ///
    /// # Examples
    /// ```
    /// use calendar_pages::models::event::CalendarEvent;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let end = start + chrono::Duration::hours(1);
    /// let event = CalendarEvent::new("Team Meeting", start, end).unwrap();
    /// assert_eq!(event.title, "Team Meeting");
    /// ```
    pub fn new(
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self> {
        let event = Self {
            id: None,
            title: title.into(),
            description: None,
            event_type: None,
            color: None,
            start,
            end,
            all_day: false,
        };
        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(invalid("Event title cannot be empty"));
        }

        if self.end <= self.start {
            return Err(invalid("Event end time must be after start time"));
        }

        if let Some(ref color) = self.color {
            if !color.starts_with('#') || (color.len() != 7 && color.len() != 4) {
                return Err(invalid("Color must be in hex format (#RRGGBB or #RGB)"));
            }
        }

        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Last calendar day the event is visible on.
    ///
    /// An event ending exactly at midnight does not occupy the following day.
    pub fn end_date(&self) -> NaiveDate {
        let end_date = self.end.date();
        if end_date > self.start.date() && self.end == end_date.and_time(chrono::NaiveTime::MIN) {
            end_date.pred_opt().unwrap_or(end_date)
        } else {
            end_date
        }
    }

    /// True when the event covers more than one calendar day.
    pub fn is_ranging(&self) -> bool {
        self.end_date() > self.start_date()
    }

    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Every calendar day the event is visible on, in order.
    pub fn covered_days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_date();
        self.start_date().iter_days().take_while(move |day| *day <= end)
    }
}

fn invalid(message: &str) -> CalendarError {
    CalendarError::InvalidEvent(message.to_string())
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct EventBuilder {
    title: Option<String>,
    description: Option<String>,
    event_type: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    all_day: bool,
    color: Option<String>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the event type label (e.g. "Meeting", "Birthday")
    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Mark as an all-day event spanning `date` (midnight to midnight)
    pub fn all_day_on(mut self, date: NaiveDate) -> Self {
        let start = date.and_time(chrono::NaiveTime::MIN);
        self.start = Some(start);
        self.end = Some(start + Duration::days(1));
        self.all_day = true;
        self
    }

    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    /// Set the event color (hex format)
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn build(self) -> Result<CalendarEvent> {
        let title = self.title.ok_or_else(|| invalid("Event title is required"))?;
        let start = self.start.ok_or_else(|| invalid("Event start time is required"))?;
        let end = self.end.ok_or_else(|| invalid("Event end time is required"))?;

        let event = CalendarEvent {
            id: None,
            title,
            description: self.description,
            event_type: self.event_type,
            color: self.color,
            start,
            end,
            all_day: self.all_day,
        };

        event.validate()?;
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_new_event_success() {
        let event = CalendarEvent::new("Meeting", at(15, 10), at(15, 11)).unwrap();
        assert_eq!(event.title, "Meeting");
        assert_eq!(event.start, at(15, 10));
        assert!(!event.all_day);
        assert!(event.id.is_none());
    }

    #[test]
    fn test_new_event_empty_title() {
        let result = CalendarEvent::new("   ", at(15, 10), at(15, 11));
        assert_eq!(
            result.unwrap_err(),
            CalendarError::InvalidEvent("Event title cannot be empty".to_string())
        );
    }

    #[test]
    fn test_new_event_invalid_times() {
        assert!(CalendarEvent::new("Meeting", at(15, 11), at(15, 10)).is_err());
        assert!(CalendarEvent::new("Meeting", at(15, 10), at(15, 10)).is_err());
    }

    #[test]
    fn test_builder_with_optional_fields() {
        let event = CalendarEvent::builder()
            .title("Conference")
            .description("Annual tech conference")
            .event_type("Work")
            .start(at(15, 9))
            .end(at(17, 17))
            .color("#FF5733")
            .build()
            .unwrap();

        assert_eq!(event.event_type.as_deref(), Some("Work"));
        assert_eq!(event.color.as_deref(), Some("#FF5733"));
        assert!(event.is_ranging());
    }

    #[test]
    fn test_builder_missing_start() {
        let result = CalendarEvent::builder().title("Meeting").end(at(15, 10)).build();
        assert_eq!(
            result.unwrap_err(),
            CalendarError::InvalidEvent("Event start time is required".to_string())
        );
    }

    #[test]
    fn test_validate_invalid_color() {
        let mut event = CalendarEvent::new("Meeting", at(15, 10), at(15, 11)).unwrap();
        event.color = Some("red".to_string());
        assert!(event.validate().is_err());
        event.color = Some("#F57".to_string());
        assert!(event.validate().is_ok());
    }

    #[test]
    fn test_all_day_event_covers_single_day() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let event = CalendarEvent::builder()
            .title("Holiday")
            .all_day_on(date)
            .build()
            .unwrap();

        assert!(event.all_day);
        assert!(!event.is_ranging());
        assert_eq!(event.end_date(), date);
        assert_eq!(event.covered_days().collect::<Vec<_>>(), vec![date]);
    }

    #[test]
    fn test_covered_days_for_ranging_event() {
        let event = CalendarEvent::new("Trip", at(10, 18), at(12, 9)).unwrap();
        let days: Vec<_> = event.covered_days().collect();
        assert_eq!(days.len(), 3);
        assert!(event.occurs_on(at(11, 0).date()));
        assert!(!event.occurs_on(at(13, 0).date()));
    }

    #[test]
    fn test_duration() {
        let event = CalendarEvent::new("Meeting", at(15, 10), at(15, 12)).unwrap();
        assert_eq!(event.duration(), Duration::hours(2));
    }
}

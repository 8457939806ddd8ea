use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use super::EventCollection;
use crate::models::event::CalendarEvent;

impl EventCollection {
    /// Events on `date`, in sorter order.
    pub fn events_on(&self, date: NaiveDate) -> &[CalendarEvent] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Events on `date`, optionally leaving out all-day events.
    pub fn events_on_filtered(&self, date: NaiveDate, include_all_day: bool) -> Vec<CalendarEvent> {
        self.events_on(date)
            .iter()
            .filter(|event| include_all_day || !event.all_day)
            .cloned()
            .collect()
    }

    /// Events per day for the inclusive range `start..=end`. Days without events are omitted.
    pub fn events_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BTreeMap<NaiveDate, Vec<CalendarEvent>> {
        if end < start {
            return BTreeMap::new();
        }
        self.days
            .range(start..=end)
            .map(|(day, events)| (*day, events.clone()))
            .collect()
    }

    pub fn get(&self, id: i64) -> Option<&CalendarEvent> {
        self.days
            .values()
            .flat_map(|events| events.iter())
            .find(|event| event.id == Some(id))
    }

    /// Every stored event once, ordered by start.
    pub fn all_events(&self) -> Vec<CalendarEvent> {
        let mut seen = HashSet::new();
        let mut events: Vec<CalendarEvent> = self
            .days
            .values()
            .flat_map(|events| events.iter())
            .filter(|event| seen.insert(event.id))
            .cloned()
            .collect();
        events.sort_by_key(|event| event.start);
        events
    }

    pub fn len(&self) -> usize {
        self.days
            .values()
            .flat_map(|events| events.iter())
            .map(|event| event.id)
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Search events by title, description, or event type (case-insensitive).
    pub fn search(&self, query: &str) -> Vec<CalendarEvent> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return vec![];
        }

        let matches = |value: Option<&str>| {
            value
                .map(|text| text.to_lowercase().contains(&query))
                .unwrap_or(false)
        };

        self.all_events()
            .into_iter()
            .filter(|event| {
                matches(Some(&event.title))
                    || matches(event.description.as_deref())
                    || matches(event.event_type.as_deref())
            })
            .collect()
    }

    /// Events whose type matches `event_type`. `None` passes everything through.
    pub fn filter_by_type(&self, event_type: Option<&str>) -> Vec<CalendarEvent> {
        let events = self.all_events();
        match event_type {
            None => events,
            Some(wanted) => events
                .into_iter()
                .filter(|event| event.event_type.as_deref() == Some(wanted))
                .collect(),
        }
    }
}

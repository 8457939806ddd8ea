//! Ordering of events within a day.

use std::cmp::Ordering;

use crate::models::event::CalendarEvent;
use crate::utils::date::minutes_since_midnight;

/// Pluggable ordering for events shown on the same day.
pub type EventSorter = Box<dyn Fn(&CalendarEvent, &CalendarEvent) -> Ordering>;

/// Default ordering: ascending start time of day, in minutes since midnight.
pub fn by_start_time(a: &CalendarEvent, b: &CalendarEvent) -> Ordering {
    minutes_since_midnight(a.start.time()).cmp(&minutes_since_midnight(b.start.time()))
}

/// Insert `event` before the first element that compares strictly greater.
///
/// Elements comparing equal stay ahead of the new event, so repeated inserts
/// keep their insertion order. Appends when nothing is greater.
pub fn insert_sorted<F>(events: &mut Vec<CalendarEvent>, event: CalendarEvent, compare: F) -> usize
where
    F: Fn(&CalendarEvent, &CalendarEvent) -> Ordering,
{
    let index = events
        .iter()
        .position(|existing| compare(existing, &event) == Ordering::Greater)
        .unwrap_or(events.len());
    events.insert(index, event);
    index
}

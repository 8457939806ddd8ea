use super::{CollectionChange, EventCollection};
use crate::error::{CalendarError, Result};
use crate::models::event::CalendarEvent;

impl EventCollection {
    /// Add an event, assigning an id when it has none or its id is taken.
    pub fn add(&mut self, event: CalendarEvent) -> Result<i64> {
        let id = self.insert(event)?;
        self.notify(CollectionChange::Added(vec![id]));
        Ok(id)
    }

    /// Add several events with a single notification.
    ///
    /// Every event is validated before any is stored.
    pub fn add_all(&mut self, events: impl IntoIterator<Item = CalendarEvent>) -> Result<Vec<i64>> {
        let events: Vec<CalendarEvent> = events.into_iter().collect();
        for event in &events {
            event.validate()?;
            check_explicit_id(event)?;
        }

        let mut ids = Vec::with_capacity(events.len());
        for event in events {
            ids.push(self.insert(event)?);
        }
        if !ids.is_empty() {
            self.notify(CollectionChange::Added(ids.clone()));
        }
        Ok(ids)
    }

    fn insert(&mut self, mut event: CalendarEvent) -> Result<i64> {
        event.validate()?;
        check_explicit_id(&event)?;

        let id = match event.id {
            Some(id) if self.get(id).is_none() => id,
            _ => self.next_id,
        };
        let following = id
            .checked_add(1)
            .ok_or_else(|| CalendarError::InvalidEvent("event ids exhausted".to_string()))?;
        self.next_id = self.next_id.max(following);
        event.id = Some(id);

        log::debug!("Adding event {} '{}' at {}", id, event.title, event.start);
        self.index_event(event);
        Ok(id)
    }

    /// Remove an event by id, returning it.
    pub fn remove(&mut self, id: i64) -> Result<CalendarEvent> {
        let event = self
            .get(id)
            .cloned()
            .ok_or(CalendarError::EventNotFound(id))?;
        self.unindex_event(&event);
        self.notify(CollectionChange::Removed(vec![id]));
        Ok(event)
    }

    /// Remove every event matching `predicate`. Returns how many were removed.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&CalendarEvent) -> bool,
    {
        let doomed: Vec<CalendarEvent> = self
            .all_events()
            .into_iter()
            .filter(|event| predicate(event))
            .collect();
        if doomed.is_empty() {
            return 0;
        }

        for event in &doomed {
            self.unindex_event(event);
        }
        let ids = doomed.iter().filter_map(|event| event.id).collect();
        self.notify(CollectionChange::Removed(ids));
        doomed.len()
    }

    /// Replace the event stored under `id`, re-indexing it by its new dates.
    pub fn update(&mut self, id: i64, mut event: CalendarEvent) -> Result<()> {
        event.validate()?;
        let previous = self
            .get(id)
            .cloned()
            .ok_or(CalendarError::EventNotFound(id))?;

        self.unindex_event(&previous);
        event.id = Some(id);
        self.index_event(event);
        self.notify(CollectionChange::Updated(id));
        Ok(())
    }

    /// Remove all events.
    pub fn clear(&mut self) {
        self.days.clear();
        self.notify(CollectionChange::Cleared);
    }
}

/// The largest id leaves nothing to assign after it.
fn check_explicit_id(event: &CalendarEvent) -> Result<()> {
    match event.id {
        Some(i64::MAX) => Err(CalendarError::InvalidEvent(format!(
            "event id {} is out of range",
            i64::MAX
        ))),
        _ => Ok(()),
    }
}

//! In-memory event collection.
//! Events are indexed per calendar day and kept in sorter order, with
//! mutation and query helpers organized across focused submodules.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use chrono::NaiveDate;

use crate::models::event::CalendarEvent;

pub mod crud;
pub mod queries;
pub mod sorting;

use sorting::{by_start_time, insert_sorted, EventSorter};

/// Handle returned by [`EventCollection::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// What changed in a collection, delivered to every subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionChange {
    Added(Vec<i64>),
    Removed(Vec<i64>),
    Updated(i64),
    Cleared,
    Resorted,
}

pub type Listener = Box<dyn FnMut(&CollectionChange)>;

/// Event collection shared between the views observing it.
pub type SharedEvents = Rc<RefCell<EventCollection>>;

type ListenerSlot = Rc<RefCell<Listener>>;

/// Ordered mapping from calendar day to the events occurring on it.
///
/// Events spanning several days are indexed on every day they cover.
/// Every mutation notifies all subscribers.
pub struct EventCollection {
    pub(crate) days: BTreeMap<NaiveDate, Vec<CalendarEvent>>,
    pub(crate) next_id: i64,
    sorter: Option<EventSorter>,
    listeners: Vec<(SubscriptionId, ListenerSlot)>,
    next_subscription: u64,
    deferred: Option<Vec<CollectionChange>>,
}

impl EventCollection {
    pub fn new() -> Self {
        Self {
            days: BTreeMap::new(),
            next_id: 1,
            sorter: None,
            listeners: Vec::new(),
            next_subscription: 0,
            deferred: None,
        }
    }

    /// Collection ordering each day with a custom comparator.
    pub fn with_sorter(sorter: EventSorter) -> Self {
        Self {
            sorter: Some(sorter),
            ..Self::new()
        }
    }

    /// Register a listener called after every mutation.
    ///
    /// Listeners run inside the mutating call. A collection shared as
    /// [`SharedEvents`] is still mutably borrowed at that point unless the
    /// mutation goes through [`EventCollection::modify`], which delivers
    /// changes once the borrow is released.
    pub fn subscribe(&mut self, listener: impl FnMut(&CollectionChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        let listener: Listener = Box::new(listener);
        self.listeners.push((id, Rc::new(RefCell::new(listener))));
        log::debug!("Subscribed listener {:?} ({} total)", id, self.listeners.len());
        id
    }

    /// Remove a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        before != self.listeners.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Mutate a shared collection, notifying subscribers after the borrow ends
    /// so they may read the collection while handling the change.
    pub fn modify<R>(shared: &SharedEvents, mutation: impl FnOnce(&mut EventCollection) -> R) -> R {
        let (result, changes, listeners) = {
            let mut collection = shared.borrow_mut();
            collection.deferred = Some(Vec::new());
            let result = mutation(&mut collection);
            let changes = collection.deferred.take().unwrap_or_default();
            (result, changes, collection.listener_slots())
        };
        for change in &changes {
            deliver(&listeners, change);
        }
        result
    }

    pub(crate) fn notify(&mut self, change: CollectionChange) {
        log::debug!(
            "Event collection changed: {:?} ({} subscribers)",
            change,
            self.listeners.len()
        );
        match self.deferred.as_mut() {
            Some(queue) => queue.push(change),
            None => deliver(&self.listener_slots(), &change),
        }
    }

    fn listener_slots(&self) -> Vec<ListenerSlot> {
        self.listeners.iter().map(|(_, slot)| Rc::clone(slot)).collect()
    }

    /// Index `event` on each day it covers, in sorter order.
    pub(crate) fn index_event(&mut self, event: CalendarEvent) {
        let sorter = &self.sorter;
        for day in event.covered_days() {
            let list = self.days.entry(day).or_default();
            insert_sorted(list, event.clone(), |a, b| compare_with(sorter, a, b));
        }
    }

    /// Drop every indexed copy of `event`.
    pub(crate) fn unindex_event(&mut self, event: &CalendarEvent) {
        for day in event.covered_days() {
            if let Some(list) = self.days.get_mut(&day) {
                list.retain(|existing| existing.id != event.id);
                if list.is_empty() {
                    self.days.remove(&day);
                }
            }
        }
    }

    /// Replace the comparator and re-sort every day.
    pub fn set_sorter(&mut self, sorter: Option<EventSorter>) {
        self.sorter = sorter;
        let sorter = &self.sorter;
        for list in self.days.values_mut() {
            list.sort_by(|a, b| compare_with(sorter, a, b));
        }
        self.notify(CollectionChange::Resorted);
    }
}

fn deliver(listeners: &[ListenerSlot], change: &CollectionChange) {
    for slot in listeners {
        match slot.try_borrow_mut() {
            Ok(mut listener) => listener(change),
            Err(_) => log::warn!("Skipping listener re-entered while handling {:?}", change),
        }
    }
}

fn compare_with(sorter: &Option<EventSorter>, a: &CalendarEvent, b: &CalendarEvent) -> Ordering {
    match sorter {
        Some(sorter) => sorter(a, b),
        None => by_start_time(a, b),
    }
}

impl Default for EventCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventCollection")
            .field("days", &self.days.len())
            .field("next_id", &self.next_id)
            .field("custom_sorter", &self.sorter.is_some())
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}

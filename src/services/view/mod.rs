//! View state tying a page navigator to a shared event collection.
//!
//! A UI layer owns one [`CalendarView`] per visible calendar and calls its
//! methods from its own lifecycle: build on creation, [`CalendarView::apply_settings`]
//! when configuration changes, [`CalendarView::refresh`] every frame, drop on
//! dispose. Collection changes mark the view for rebuild.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{CalendarError, Result};
use crate::models::event::CalendarEvent;
use crate::models::settings::Settings;
use crate::models::ui::ViewType;
pub use crate::services::event::SharedEvents;
use crate::services::event::SubscriptionId;
use crate::services::layout::{arrange_day_events, month_cell_tiles_capped, CellTiles, TilePlacement};
use crate::services::navigation::{PageController, PageNavigator, PageTransition};

/// One displayed day with its events.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for leading/trailing days borrowed from adjacent months
    pub in_current_month: bool,
    pub is_today: bool,
    pub events: Vec<CalendarEvent>,
    pub tiles: CellTiles,
}

#[derive(Default)]
pub struct CalendarViewBuilder {
    collection: Option<SharedEvents>,
    settings: Settings,
    view: Option<ViewType>,
    controller: Option<PageController>,
}

impl CalendarViewBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(mut self, collection: SharedEvents) -> Self {
        self.collection = Some(collection);
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Override the settings' default view.
    pub fn view(mut self, view: ViewType) -> Self {
        self.view = Some(view);
        self
    }

    pub fn controller(mut self, controller: PageController) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn build(self) -> Result<CalendarView> {
        let collection = self
            .collection
            .ok_or(CalendarError::MissingDependency("event collection"))?;
        self.settings.validate()?;

        let view = self.view.unwrap_or(self.settings.default_view);
        let mut navigator = PageNavigator::from_settings(view, &self.settings)?;
        if let Some(controller) = &self.controller {
            navigator.attach_controller(controller);
        }

        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        let subscription = collection
            .borrow_mut()
            .subscribe(move |_| flag.set(true));

        log::debug!(
            "Built {} view at {} ({} pages)",
            view,
            navigator.current_date(),
            navigator.total_pages()
        );

        Ok(CalendarView {
            navigator,
            collection,
            subscription,
            dirty,
            max_tiles_per_cell: self.settings.max_tiles_per_cell,
        })
    }
}

pub struct CalendarView {
    navigator: PageNavigator,
    collection: SharedEvents,
    subscription: SubscriptionId,
    dirty: Rc<Cell<bool>>,
    max_tiles_per_cell: usize,
}

impl CalendarView {
    pub fn builder() -> CalendarViewBuilder {
        CalendarViewBuilder::new()
    }

    pub fn navigator(&self) -> &PageNavigator {
        &self.navigator
    }

    /// Page changes made through the navigator also mark the view dirty.
    pub fn navigator_mut(&mut self) -> &mut PageNavigator {
        self.dirty.set(true);
        &mut self.navigator
    }

    pub fn collection(&self) -> &SharedEvents {
        &self.collection
    }

    pub fn needs_rebuild(&self) -> bool {
        self.dirty.get()
    }

    /// Returns whether a rebuild was pending and clears the flag.
    pub fn take_rebuild(&self) -> bool {
        self.dirty.replace(false)
    }

    /// Process pending controller requests.
    pub fn refresh(&mut self) -> Option<Result<PageTransition>> {
        let request = self.navigator.poll_controller();
        if request.is_some() {
            self.dirty.set(true);
        }
        request
    }

    /// Re-apply configuration (bounds, week start, tile cap).
    pub fn apply_settings(&mut self, settings: &Settings) -> Result<()> {
        settings.validate()?;
        self.navigator.set_range(settings.view_range()?);
        self.navigator.set_week_start(settings.week_start()?);
        self.max_tiles_per_cell = settings.max_tiles_per_cell;
        self.dirty.set(true);
        Ok(())
    }

    /// Cells of the displayed page.
    pub fn visible_days(&self) -> Vec<DayCell> {
        self.visible_days_at(Local::now().date_naive())
    }

    /// Cells of the displayed page, with `today` supplied by the caller.
    pub fn visible_days_at(&self, today: NaiveDate) -> Vec<DayCell> {
        let anchor = self.navigator.current_date();
        let month_view = self.navigator.view() == ViewType::Month;
        let collection = self.collection.borrow();

        self.navigator
            .current_page_dates()
            .into_iter()
            .map(|date| {
                let events = collection.events_on(date).to_vec();
                let tiles = month_cell_tiles_capped(events.len(), self.max_tiles_per_cell);
                DayCell {
                    date,
                    in_current_month: !month_view
                        || (date.year() == anchor.year() && date.month() == anchor.month()),
                    is_today: date == today,
                    events,
                    tiles,
                }
            })
            .collect()
    }

    /// Side-by-side tile placement for one day column.
    pub fn day_layout(&self, date: NaiveDate, minute_height: f32) -> Vec<TilePlacement> {
        arrange_day_events(self.collection.borrow().events_on(date), date, minute_height)
    }
}

impl Drop for CalendarView {
    fn drop(&mut self) {
        match self.collection.try_borrow_mut() {
            Ok(mut collection) => {
                collection.unsubscribe(self.subscription);
            }
            Err(_) => log::warn!(
                "Event collection busy while disposing view; subscription {:?} left registered",
                self.subscription
            ),
        }
    }
}

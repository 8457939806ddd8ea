//! Page navigation for month, week and day views.
//!
//! A page index counts units (months, weeks or days) from the page holding the
//! range minimum. The navigator keeps `0 <= current < total` at all times and
//! re-derives the index from the displayed date whenever bounds change.

use chrono::{Duration, Local, NaiveDate, Weekday};
use tokio::sync::watch;

use crate::error::{CalendarError, Result};
use crate::models::settings::Settings;
use crate::models::ui::ViewType;
use crate::models::view_range::ViewRange;
use crate::utils::date::{
    add_months, days_between, days_in_month_grid, days_in_week, first_day_of_month,
    months_between, week_start, weeks_between,
};

mod controller;
mod transition;

pub use controller::PageController;
pub use transition::{PageTransition, TransitionOutcome};
use transition::PendingTransition;

#[derive(Debug)]
pub struct PageNavigator {
    view: ViewType,
    range: ViewRange,
    week_start: Weekday,
    current: usize,
    total: usize,
    pending: Option<PendingTransition>,
    controller: Option<watch::Receiver<Option<NaiveDate>>>,
}

impl PageNavigator {
    /// Create a navigator showing the page for `initial` (today when `None`),
    /// clamped into `range`.
    pub fn new(
        view: ViewType,
        range: ViewRange,
        week_start: Weekday,
        initial: Option<NaiveDate>,
    ) -> Self {
        let mut navigator = Self {
            view,
            range,
            week_start,
            current: 0,
            total: 1,
            pending: None,
            controller: None,
        };
        navigator.total = navigator.count_pages();

        let requested = initial.unwrap_or_else(|| Local::now().date_naive());
        let start = range.clamp(requested);
        if start != requested {
            log::warn!(
                "Initial date {} outside [{}, {}), showing {} instead",
                requested,
                range.min(),
                range.max(),
                start
            );
        }
        navigator.current = navigator.index_of(start);
        navigator
    }

    pub fn from_settings(view: ViewType, settings: &Settings) -> Result<Self> {
        Ok(Self::new(
            view,
            settings.view_range()?,
            settings.week_start()?,
            settings.initial_date,
        ))
    }

    pub fn view(&self) -> ViewType {
        self.view
    }

    pub fn range(&self) -> ViewRange {
        self.range
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub fn total_pages(&self) -> usize {
        self.total
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    /// Anchor date of the displayed page: first of the month, first day of the
    /// week, or the day itself.
    pub fn current_date(&self) -> NaiveDate {
        self.anchor(self.current).unwrap_or(self.range.min())
    }

    /// Page index showing `date`. Fails when `date` is outside `[min, max)`.
    pub fn page_for_date(&self, date: NaiveDate) -> Result<usize> {
        if !self.range.contains(date) {
            return Err(self.range.out_of_range(date));
        }
        Ok(self.index_of(date))
    }

    pub fn date_for_page(&self, page: usize) -> Result<NaiveDate> {
        self.check_page(page)?;
        self.anchor(page).ok_or(CalendarError::PageOutOfRange {
            page,
            total: self.total,
        })
    }

    /// Day cells for `page`: a 35/42-day grid, a 7-day week, or one day.
    pub fn page_dates(&self, page: usize) -> Result<Vec<NaiveDate>> {
        let anchor = self.date_for_page(page)?;
        Ok(match self.view {
            ViewType::Month => days_in_month_grid(anchor, self.week_start),
            ViewType::Week => days_in_week(anchor, self.week_start),
            ViewType::Day => vec![anchor],
        })
    }

    pub fn current_page_dates(&self) -> Vec<NaiveDate> {
        self.page_dates(self.current).unwrap_or_default()
    }

    /// Move one page forward. Returns false at the last page.
    pub fn next(&mut self) -> bool {
        if self.current + 1 >= self.total {
            return false;
        }
        self.set_page(self.current + 1);
        true
    }

    /// Move one page back. Returns false at the first page.
    pub fn previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.set_page(self.current - 1);
        true
    }

    pub fn jump_to_page(&mut self, page: usize) -> Result<()> {
        self.check_page(page)?;
        self.set_page(page);
        Ok(())
    }

    pub fn jump_to_date(&mut self, date: NaiveDate) -> Result<usize> {
        let page = self.page_for_date(date)?;
        self.set_page(page);
        Ok(page)
    }

    pub fn jump_to_today(&mut self) -> Result<usize> {
        self.jump_to_date(Local::now().date_naive())
    }

    /// Start an animated move to `page`, superseding any running one.
    ///
    /// The page changes when the UI calls [`complete_transition`](Self::complete_transition).
    pub fn animate_to_page(&mut self, page: usize) -> Result<PageTransition> {
        self.check_page(page)?;
        self.supersede_pending();

        let (pending, handle) = PendingTransition::new(page);
        log::debug!("Animating {} page {} -> {}", self.view, self.current, page);
        self.pending = Some(pending);
        Ok(handle)
    }

    pub fn animate_to_date(&mut self, date: NaiveDate) -> Result<PageTransition> {
        let page = self.page_for_date(date)?;
        self.animate_to_page(page)
    }

    /// Finish the running animation and show its target page.
    pub fn complete_transition(&mut self) -> Result<usize> {
        let pending = self.pending.take().ok_or(CalendarError::NoPendingTransition)?;
        let target = pending.target.min(self.total - 1);
        self.current = target;
        pending.complete();
        log::debug!("Transition to {} page {} completed", self.view, target);
        Ok(target)
    }

    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_target(&self) -> Option<usize> {
        self.pending.as_ref().map(|pending| pending.target)
    }

    /// Replace the bounds, keeping the displayed date where possible.
    pub fn set_range(&mut self, range: ViewRange) {
        let shown = self.current_date();
        self.supersede_pending();
        self.range = range;
        self.recalculate(shown);
    }

    pub fn set_week_start(&mut self, week_start: Weekday) {
        if self.week_start == week_start {
            return;
        }
        let shown = self.current_date();
        self.supersede_pending();
        self.week_start = week_start;
        self.recalculate(shown);
    }

    /// Switch between month, week and day pages around the displayed date.
    pub fn set_view(&mut self, view: ViewType) {
        if self.view == view {
            return;
        }
        let shown = self.current_date();
        self.supersede_pending();
        self.view = view;
        self.recalculate(shown);
    }

    /// Listen for requests made through `controller`. Requests issued before
    /// attaching are ignored.
    pub fn attach_controller(&mut self, controller: &PageController) {
        self.controller = Some(controller.subscribe());
    }

    pub fn detach_controller(&mut self) {
        self.controller = None;
    }

    /// Start a transition for the latest unseen controller request, if any.
    pub fn poll_controller(&mut self) -> Option<Result<PageTransition>> {
        let receiver = self.controller.as_mut()?;
        if !receiver.has_changed().unwrap_or(false) {
            return None;
        }
        let requested = *receiver.borrow_and_update();
        let date = requested?;
        Some(self.animate_to_date(date))
    }

    fn recalculate(&mut self, shown: NaiveDate) {
        self.total = self.count_pages();
        self.current = self.index_of(self.range.clamp(shown)).min(self.total - 1);
        log::debug!(
            "Recalculated {} pages: {} total, showing page {}",
            self.view,
            self.total,
            self.current
        );
    }

    fn set_page(&mut self, page: usize) {
        self.supersede_pending();
        self.current = page;
    }

    fn supersede_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            log::debug!("Superseding transition to page {}", pending.target);
            pending.supersede();
        }
    }

    fn check_page(&self, page: usize) -> Result<()> {
        if page >= self.total {
            return Err(CalendarError::PageOutOfRange {
                page,
                total: self.total,
            });
        }
        Ok(())
    }

    fn count_pages(&self) -> usize {
        self.units_between(self.range.min(), self.range.last_day()) as usize
    }

    /// Index of the page holding `date`; `date` must not precede the minimum.
    fn index_of(&self, date: NaiveDate) -> usize {
        self.units_between(self.range.min(), date) as usize - 1
    }

    fn units_between(&self, a: NaiveDate, b: NaiveDate) -> u32 {
        match self.view {
            ViewType::Month => months_between(a, b),
            ViewType::Week => weeks_between(a, b, self.week_start),
            ViewType::Day => days_between(a, b),
        }
    }

    fn anchor(&self, page: usize) -> Option<NaiveDate> {
        let min = self.range.min();
        match self.view {
            ViewType::Month => add_months(first_day_of_month(min), i32::try_from(page).ok()?),
            ViewType::Week => {
                week_start(min, self.week_start).checked_add_signed(Duration::weeks(page as i64))
            }
            ViewType::Day => min.checked_add_signed(Duration::days(page as i64)),
        }
    }
}

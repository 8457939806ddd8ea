//! Externally driven "animate to date" requests.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::watch;

/// Shared handle other parts of an application use to move a calendar.
///
/// Passed explicitly to the navigator (see
/// [`PageNavigator::attach_controller`](super::PageNavigator::attach_controller));
/// only the most recent request is kept.
#[derive(Debug, Clone)]
pub struct PageController {
    sender: Arc<watch::Sender<Option<NaiveDate>>>,
}

impl PageController {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Ask every attached navigator to animate to the page containing `date`.
    pub fn animate_to_date(&self, date: NaiveDate) {
        log::debug!("Page controller requested {}", date);
        self.sender.send_replace(Some(date));
    }

    /// Most recent requested date, if any.
    pub fn requested_date(&self) -> Option<NaiveDate> {
        *self.sender.borrow()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Option<NaiveDate>> {
        self.sender.subscribe()
    }
}

impl Default for PageController {
    fn default() -> Self {
        Self::new()
    }
}

//! Completion signals for animated page transitions.

use tokio::sync::oneshot;

/// How an animated transition ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The animation finished and the navigator now shows `page`.
    Completed { page: usize },
    /// A newer navigation request replaced this one before it finished.
    Superseded,
}

/// Handle for a requested transition. Await [`PageTransition::finished`] to
/// learn how it ended.
#[derive(Debug)]
pub struct PageTransition {
    target: usize,
    receiver: oneshot::Receiver<TransitionOutcome>,
}

impl PageTransition {
    pub fn target(&self) -> usize {
        self.target
    }

    /// Non-blocking check; `None` while the animation is still running.
    pub fn try_outcome(&mut self) -> Option<TransitionOutcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(TransitionOutcome::Superseded),
        }
    }

    /// Resolves once the transition completes or is superseded.
    /// A navigator dropped mid-animation counts as superseded.
    pub async fn finished(self) -> TransitionOutcome {
        self.receiver.await.unwrap_or(TransitionOutcome::Superseded)
    }
}

/// Navigator-side half of a transition.
#[derive(Debug)]
pub(crate) struct PendingTransition {
    pub(crate) target: usize,
    sender: oneshot::Sender<TransitionOutcome>,
}

impl PendingTransition {
    pub(crate) fn new(target: usize) -> (Self, PageTransition) {
        let (sender, receiver) = oneshot::channel();
        (
            Self { target, sender },
            PageTransition { target, receiver },
        )
    }

    pub(crate) fn complete(self) {
        // The caller may have dropped its handle; nothing to signal then.
        let _ = self.sender.send(TransitionOutcome::Completed { page: self.target });
    }

    pub(crate) fn supersede(self) {
        let _ = self.sender.send(TransitionOutcome::Superseded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_outcome_pending_then_completed() {
        let (pending, mut handle) = PendingTransition::new(4);
        assert_eq!(handle.target(), 4);
        assert_eq!(handle.try_outcome(), None);

        pending.complete();
        assert_eq!(handle.try_outcome(), Some(TransitionOutcome::Completed { page: 4 }));
    }

    #[tokio::test]
    async fn test_finished_resolves_superseded() {
        let (pending, handle) = PendingTransition::new(2);
        pending.supersede();
        assert_eq!(handle.finished().await, TransitionOutcome::Superseded);
    }

    #[tokio::test]
    async fn test_dropped_sender_counts_as_superseded() {
        let (pending, handle) = PendingTransition::new(2);
        drop(pending);
        assert_eq!(handle.finished().await, TransitionOutcome::Superseded);
    }
}

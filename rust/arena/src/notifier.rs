//! Outbound boundary to whatever renders a game.
//!
//! The arena calls a [`Notifier`] after every committed change, outside the
//! session lock. A failing notifier is logged and counted; the change it
//! reports stays committed.

use crate::session::{SessionId, SessionSnapshot};
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("renderer unavailable: {0}")]
    Unavailable(String),
    #[error("renderer rejected update: {0}")]
    Rejected(String),
}

pub trait Notifier: Send + Sync {
    /// Show the current state of `session_id`.
    fn render_state(
        &self,
        session_id: &SessionId,
        snapshot: &SessionSnapshot,
    ) -> Result<(), NotifyError>;

    /// The session is gone. `reason` is one of `replay_declined`,
    /// `terminated_by_request` or `expired`.
    fn session_closed(&self, _session_id: &SessionId, _reason: &str) {}
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn render_state(&self, _: &SessionId, _: &SessionSnapshot) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// What a [`RecordingNotifier`] saw, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Rendered(SessionSnapshot),
    Closed { session_id: SessionId, reason: String },
}

/// Keeps every call in memory. Meant for tests and embedding demos.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Rendered snapshots only.
    pub fn snapshots(&self) -> Vec<SessionSnapshot> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Rendered(snapshot) => Some(snapshot),
                Notification::Closed { .. } => None,
            })
            .collect()
    }

    pub fn last_snapshot(&self) -> Option<SessionSnapshot> {
        self.snapshots().pop()
    }

    fn push(&self, notification: Notification) {
        let mut guard = self
            .seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.push(notification);
    }
}

impl Notifier for RecordingNotifier {
    fn render_state(
        &self,
        _session_id: &SessionId,
        snapshot: &SessionSnapshot,
    ) -> Result<(), NotifyError> {
        self.push(Notification::Rendered(snapshot.clone()));
        Ok(())
    }

    fn session_closed(&self, session_id: &SessionId, reason: &str) {
        self.push(Notification::Closed {
            session_id: session_id.clone(),
            reason: reason.to_string(),
        });
    }
}

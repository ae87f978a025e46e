use crate::notifier::{Notifier, NotifyError};
use crate::session::{SessionId, SessionSnapshot};
use fourline_engine::game::GameStatus;
use fourline_engine::seat::Seat;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::mpsc;

// Bounded so a stalled subscriber cannot grow memory without limit; a full
// channel gets the subscriber dropped.
const EVENT_CHANNEL_BUFFER: usize = 256;

pub type EventSender = mpsc::Sender<GameEvent>;
pub type EventReceiver = mpsc::Receiver<GameEvent>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    StateChanged {
        session_id: SessionId,
        snapshot: SessionSnapshot,
    },
    GameOver {
        session_id: SessionId,
        round: u64,
        winner: Option<Seat>,
        status: GameStatus,
    },
    GameEnded {
        session_id: SessionId,
        reason: String,
    },
}

impl GameEvent {
    pub fn session_id(&self) -> &SessionId {
        match self {
            GameEvent::StateChanged { session_id, .. }
            | GameEvent::GameOver { session_id, .. }
            | GameEvent::GameEnded { session_id, .. } => session_id,
        }
    }
}

pub struct EventSubscription {
    bus: EventBus,
    session_id: SessionId,
    subscriber_id: usize,
    pub receiver: EventReceiver,
}

impl EventSubscription {
    pub fn receiver(&mut self) -> &mut EventReceiver {
        &mut self.receiver
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(&self.session_id, self.subscriber_id);
    }
}

/// Per-session fan-out of [`GameEvent`]s over bounded channels.
///
/// Acts as the arena's stock [`Notifier`]: every rendered snapshot becomes a
/// `StateChanged` (plus a `GameOver` when the snapshot is terminal), and a
/// closed session sends `GameEnded` and drops its subscribers.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

#[derive(Debug, Default)]
struct EventBusInner {
    subscribers: RwLock<HashMap<SessionId, Vec<(usize, EventSender)>>>,
    next_id: AtomicUsize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, session_id: SessionId) -> EventSubscription {
        let (subscriber_id, receiver) = self.subscribe_raw(session_id.clone());
        EventSubscription {
            bus: self.clone(),
            session_id,
            subscriber_id,
            receiver,
        }
    }

    fn subscribe_raw(&self, session_id: SessionId) -> (usize, EventReceiver) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_BUFFER);
        let id = self.inner.next_id.fetch_add(1, Ordering::AcqRel);
        self.write()
            .entry(session_id.clone())
            .or_default()
            .push((id, tx));

        tracing::debug!(
            session_id = %session_id,
            subscriber_id = id,
            "subscribed to game events"
        );

        (id, rx)
    }

    pub fn broadcast(&self, session_id: &SessionId, event: GameEvent) -> usize {
        let subscribers = self.read().get(session_id).cloned();

        let Some(list) = subscribers else {
            tracing::trace!(session_id = %session_id, "no subscribers for session");
            return 0;
        };

        let mut delivered = 0;
        let mut failed = Vec::new();
        for (id, sender) in list {
            match sender.try_send(event.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        session_id = %session_id,
                        subscriber_id = id,
                        error = %e,
                        "dropping subscriber that cannot take events"
                    );
                    failed.push(id);
                }
            }
        }
        if !failed.is_empty() {
            self.remove_subscribers(session_id, &failed);
        }
        delivered
    }

    pub fn unsubscribe(&self, session_id: &SessionId, subscriber_id: usize) {
        self.remove_subscribers(session_id, &[subscriber_id]);
    }

    pub fn drop_session(&self, session_id: &SessionId) {
        self.write().remove(session_id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.read().values().map(|list| list.len()).sum()
    }

    fn remove_subscribers(&self, session_id: &SessionId, ids: &[usize]) {
        let mut guard = self.write();
        if let Some(list) = guard.get_mut(session_id) {
            list.retain(|(id, _)| !ids.contains(id));
            if list.is_empty() {
                guard.remove(session_id);
            }
        }
    }

    // Senders carry no invariant a panicking writer could break.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<SessionId, Vec<(usize, EventSender)>>> {
        self.inner
            .subscribers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<SessionId, Vec<(usize, EventSender)>>> {
        self.inner
            .subscribers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Notifier for EventBus {
    fn render_state(
        &self,
        session_id: &SessionId,
        snapshot: &SessionSnapshot,
    ) -> Result<(), NotifyError> {
        self.broadcast(
            session_id,
            GameEvent::StateChanged {
                session_id: session_id.clone(),
                snapshot: snapshot.clone(),
            },
        );
        if snapshot.game_over {
            self.broadcast(
                session_id,
                GameEvent::GameOver {
                    session_id: session_id.clone(),
                    round: snapshot.round,
                    winner: snapshot.winner,
                    status: snapshot.status.clone(),
                },
            );
        }
        Ok(())
    }

    fn session_closed(&self, session_id: &SessionId, reason: &str) {
        self.broadcast(
            session_id,
            GameEvent::GameEnded {
                session_id: session_id.clone(),
                reason: reason.to_string(),
            },
        );
        self.drop_session(session_id);
    }
}

//! Delayed per-turn tasks: the turn timer and the adversary's move.
//!
//! Neither kind of task is ever cancelled. Each carries the [`TurnStamp`] of
//! the turn it was scheduled for, and the session ignores it if the turn has
//! moved on by the time it fires.

use crate::session::{SessionError, SessionId, SessionManager};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::runtime::Handle;

/// Identifies one turn of one session.
///
/// `generation` restarts at zero on replay, so `round` keeps turns from
/// different rounds apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnStamp {
    pub round: u64,
    pub generation: u64,
}

impl TurnStamp {
    pub fn new(round: u64, generation: u64) -> Self {
        Self { round, generation }
    }
}

impl fmt::Display for TurnStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}g{}", self.round, self.generation)
    }
}

/// Run `task` on the ambient Tokio runtime, or drop it with a warning when
/// called outside one.
pub(crate) fn spawn_detached<F>(kind: &'static str, session_id: &SessionId, task: F) -> bool
where
    F: Future<Output = ()> + Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn(task);
            true
        }
        Err(_) => {
            tracing::warn!(
                session_id = %session_id,
                task = kind,
                "no tokio runtime available, task not scheduled"
            );
            false
        }
    }
}

/// Forfeit the seat on turn if `stamp` is still current after `timeout`.
pub(crate) fn arm_turn_timer(
    manager: &SessionManager,
    session_id: SessionId,
    stamp: TurnStamp,
    timeout: Duration,
) {
    let weak = manager.downgrade();
    let label = session_id.clone();
    let armed = spawn_detached("turn_timer", &label, async move {
        tokio::time::sleep(timeout).await;
        let Some(manager) = SessionManager::upgrade(&weak) else {
            return;
        };
        match manager.expire_turn(&session_id, stamp) {
            Ok(_) => {}
            Err(SessionError::NotFound(_)) => {
                tracing::debug!(session_id = %session_id, %stamp, "turn timer fired for removed session");
            }
            Err(err) => {
                tracing::warn!(session_id = %session_id, %stamp, error = %err, "turn timer failed");
            }
        }
    });
    if armed {
        tracing::debug!(
            session_id = %label,
            %stamp,
            timeout_ms = timeout.as_millis() as u64,
            "turn timer armed"
        );
    }
}

/// Let the adversary move after `think` if `stamp` is still current.
pub(crate) fn schedule_adversary_turn(
    manager: &SessionManager,
    session_id: SessionId,
    stamp: TurnStamp,
    think: Duration,
) {
    let weak = manager.downgrade();
    let label = session_id.clone();
    spawn_detached("adversary_turn", &label, async move {
        tokio::time::sleep(think).await;
        let Some(manager) = SessionManager::upgrade(&weak) else {
            return;
        };
        match manager.play_adversary_turn(&session_id, stamp) {
            Ok(_) => {}
            Err(SessionError::NotFound(_)) => {
                tracing::debug!(session_id = %session_id, %stamp, "adversary turn for removed session");
            }
            Err(err) => {
                tracing::warn!(session_id = %session_id, %stamp, error = %err, "adversary turn failed");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamps_compare_by_round_and_generation() {
        assert_eq!(TurnStamp::new(1, 4), TurnStamp::new(1, 4));
        assert_ne!(TurnStamp::new(0, 4), TurnStamp::new(1, 4));
        assert_eq!(TurnStamp::new(2, 7).to_string(), "r2g7");
    }

    #[test]
    fn spawning_without_a_runtime_is_skipped() {
        let id: SessionId = "no-runtime".into();
        assert!(!spawn_detached("test", &id, async {}));
    }

    #[tokio::test]
    async fn spawning_inside_a_runtime_runs_the_task() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let id: SessionId = "with-runtime".into();
        assert!(spawn_detached("test", &id, async move {
            let _ = tx.send(7);
        }));
        assert_eq!(rx.await.expect("task ran"), 7);
    }
}

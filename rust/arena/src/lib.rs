//! # fourline-arena: Concurrent Session Host
//!
//! Runs any number of simultaneous games on top of [`fourline_engine`] and
//! [`fourline_ai`]. Callers drive sessions through a [`SessionManager`];
//! adversary replies and turn timers run as Tokio tasks, and every committed
//! change is pushed to a [`Notifier`].
//!
//! ```rust
//! use fourline_arena::{GameConfig, NullNotifier, SessionManager};
//! use std::sync::Arc;
//!
//! let manager = SessionManager::new(Arc::new(NullNotifier));
//! let id = manager
//!     .create_session(GameConfig::between("alice", "bob").with_seed(1))
//!     .expect("create");
//!
//! let snapshot = manager.get_snapshot(&id).expect("snapshot");
//! let first = snapshot.on_turn().human_id().expect("human").to_string();
//! let result = manager.apply_player_move(&id, &first, 3).expect("move");
//! assert_eq!(result.snapshot.generation, 1);
//! ```

pub mod config;
pub mod events;
pub mod logging;
pub mod metrics;
pub mod notifier;
pub mod participant;
pub mod session;
pub mod timer;

pub use config::{load_with_sources, ArenaSettings, ConfigError, ConfigResolved, ValueSource};
pub use events::{EventBus, EventSubscription, GameEvent};
pub use logging::{init_logging, init_test_logging, CaptureLog, LogEntry, LogFormat};
pub use metrics::{ArenaMetrics, MetricsSnapshot};
pub use notifier::{Notification, Notifier, NotifyError, NullNotifier, RecordingNotifier};
pub use participant::{Participant, PlayerId, Seating};
pub use session::{
    GameConfig, GameSession, MoveResult, ReplayResult, SessionError, SessionId, SessionManager,
    SessionSnapshot, TurnOutcome,
};
pub use timer::TurnStamp;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn event_bus_plugs_in_as_notifier() {
        let bus = EventBus::new();
        let manager = SessionManager::new(Arc::new(bus.clone()));

        assert_eq!(bus.subscriber_count(), 0);
        assert!(manager.active_sessions().is_empty());
    }
}

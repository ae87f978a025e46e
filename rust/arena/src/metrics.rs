use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters for the arena's moving parts. Cloning shares the counters.
#[derive(Debug, Clone, Default)]
pub struct ArenaMetrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug, Default)]
struct MetricsInner {
    sessions_created: AtomicU64,
    sessions_closed: AtomicU64,
    moves_applied: AtomicU64,
    adversary_moves: AtomicU64,
    forfeits: AtomicU64,
    turns_timed_out: AtomicU64,
    replays: AtomicU64,
    stale_timers_ignored: AtomicU64,
    stale_adversary_turns: AtomicU64,
    notify_failures: AtomicU64,
}

impl ArenaMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_session_created(&self) {
        let count = self.inner.sessions_created.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::trace!(sessions_created = count, "session count increased");
    }

    pub fn record_session_closed(&self) {
        self.inner.sessions_closed.fetch_add(1, Ordering::Relaxed);
    }

    /// Any accepted move, human or adversary.
    pub fn record_move(&self) {
        self.inner.moves_applied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_adversary_move(&self) {
        self.inner.adversary_moves.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_forfeit(&self) {
        self.inner.forfeits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_turn_timed_out(&self) {
        self.inner.turns_timed_out.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_replay(&self) {
        self.inner.replays.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale_timer(&self) {
        self.inner
            .stale_timers_ignored
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale_adversary_turn(&self) {
        self.inner
            .stale_adversary_turns
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_notify_failure(&self) {
        self.inner.notify_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sessions_created: self.inner.sessions_created.load(Ordering::Relaxed),
            sessions_closed: self.inner.sessions_closed.load(Ordering::Relaxed),
            moves_applied: self.inner.moves_applied.load(Ordering::Relaxed),
            adversary_moves: self.inner.adversary_moves.load(Ordering::Relaxed),
            forfeits: self.inner.forfeits.load(Ordering::Relaxed),
            turns_timed_out: self.inner.turns_timed_out.load(Ordering::Relaxed),
            replays: self.inner.replays.load(Ordering::Relaxed),
            stale_timers_ignored: self.inner.stale_timers_ignored.load(Ordering::Relaxed),
            stale_adversary_turns: self.inner.stale_adversary_turns.load(Ordering::Relaxed),
            notify_failures: self.inner.notify_failures.load(Ordering::Relaxed),
        }
    }

    pub fn log_metrics(&self) {
        let snapshot = self.snapshot();
        tracing::info!(
            sessions_created = snapshot.sessions_created,
            sessions_closed = snapshot.sessions_closed,
            live_sessions = snapshot.live_sessions(),
            moves_applied = snapshot.moves_applied,
            adversary_moves = snapshot.adversary_moves,
            forfeits = snapshot.forfeits,
            turns_timed_out = snapshot.turns_timed_out,
            replays = snapshot.replays,
            stale_timers_ignored = snapshot.stale_timers_ignored,
            stale_adversary_turns = snapshot.stale_adversary_turns,
            notify_failures = snapshot.notify_failures,
            "arena metrics"
        );
    }
}

/// Point-in-time copy of [`ArenaMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub sessions_created: u64,
    pub sessions_closed: u64,
    pub moves_applied: u64,
    pub adversary_moves: u64,
    pub forfeits: u64,
    pub turns_timed_out: u64,
    pub replays: u64,
    pub stale_timers_ignored: u64,
    pub stale_adversary_turns: u64,
    pub notify_failures: u64,
}

impl MetricsSnapshot {
    pub fn live_sessions(&self) -> u64 {
        self.sessions_created.saturating_sub(self.sessions_closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn starts_at_zero() {
        let snapshot = ArenaMetrics::new().snapshot();
        assert_eq!(snapshot.sessions_created, 0);
        assert_eq!(snapshot.moves_applied, 0);
        assert_eq!(snapshot.live_sessions(), 0);
    }

    #[test]
    fn clones_share_counters() {
        let metrics = ArenaMetrics::new();
        let other = metrics.clone();
        metrics.record_session_created();
        metrics.record_session_created();
        other.record_session_closed();
        other.record_stale_timer();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.sessions_created, 2);
        assert_eq!(snapshot.live_sessions(), 1);
        assert_eq!(snapshot.stale_timers_ignored, 1);
    }

    #[test]
    fn concurrent_updates_are_counted() {
        let metrics = ArenaMetrics::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let m = metrics.clone();
                thread::spawn(move || {
                    for _ in 0..250 {
                        m.record_move();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("join");
        }
        assert_eq!(metrics.snapshot().moves_applied, 2000);
    }

    #[test]
    fn snapshot_serializes() {
        let metrics = ArenaMetrics::new();
        metrics.record_notify_failure();
        let json = serde_json::to_value(metrics.snapshot()).expect("json");
        assert_eq!(json["notify_failures"], 1);
    }
}

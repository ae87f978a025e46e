use fourline_arena::{
    init_test_logging, EventBus, GameConfig, GameEvent, SessionError, SessionManager, TurnOutcome,
};
use fourline_engine::board::Position;
use fourline_engine::game::{GameStatus, MoveOutcome};
use fourline_engine::seat::Seat;
use serial_test::serial;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

fn manager_with_bus() -> (SessionManager, EventBus) {
    let bus = EventBus::new();
    let manager =
        SessionManager::with_timing(Arc::new(bus.clone()), Duration::ZERO, Duration::from_secs(60));
    (manager, bus)
}

fn seated(manager: &SessionManager, id: &String) -> (String, String) {
    let snapshot = manager.get_snapshot(id).expect("snapshot");
    (
        snapshot.seats[0].human_id().expect("human").to_string(),
        snapshot.seats[1].human_id().expect("human").to_string(),
    )
}

#[test]
fn every_accepted_move_is_broadcast() {
    let (manager, bus) = manager_with_bus();
    let id = manager
        .create_session(GameConfig::between("alice", "bob"))
        .expect("create");
    let (first, second) = seated(&manager, &id);
    let mut sub = bus.subscribe(id.clone());

    manager.apply_player_move(&id, &first, 3).expect("move");
    manager.apply_player_move(&id, &second, 4).expect("move");
    assert!(manager.apply_player_move(&id, &second, 4).is_err());

    let mut generations = Vec::new();
    while let Ok(event) = sub.receiver.try_recv() {
        match event {
            GameEvent::StateChanged { session_id, snapshot } => {
                assert_eq!(session_id, id);
                generations.push(snapshot.generation);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
    assert_eq!(generations, vec![1, 2]);
}

#[test]
fn vertical_win_in_column_three() {
    let (manager, bus) = manager_with_bus();
    let id = manager
        .create_session(GameConfig::between("alice", "bob"))
        .expect("create");
    let (first, second) = seated(&manager, &id);
    let mut sub = bus.subscribe(id.clone());

    for _ in 0..3 {
        manager.apply_player_move(&id, &first, 3).expect("move");
        manager.apply_player_move(&id, &second, 0).expect("move");
    }
    let result = manager.apply_player_move(&id, &first, 3).expect("winning move");

    let expected: BTreeSet<Position> = [(5, 3), (4, 3), (3, 3), (2, 3)]
        .into_iter()
        .map(|(row, col)| Position::new(row, col))
        .collect();
    match &result.outcome {
        TurnOutcome::Moved(MoveOutcome::Won { seat, cells }) => {
            assert_eq!(*seat, Seat::One);
            assert_eq!(cells.iter().copied().collect::<BTreeSet<_>>(), expected);
        }
        other => panic!("expected a win, got {other:?}"),
    }
    assert!(result.snapshot.game_over);
    assert_eq!(result.snapshot.winner, Some(Seat::One));
    assert_eq!(result.snapshot.turn, Seat::One);

    let events: Vec<_> = std::iter::from_fn(|| sub.receiver.try_recv().ok()).collect();
    match events.last() {
        Some(GameEvent::GameOver { winner, status, .. }) => {
            assert_eq!(*winner, Some(Seat::One));
            assert!(matches!(status, GameStatus::Won { .. }));
        }
        other => panic!("expected game over event, got {other:?}"),
    }

    assert_eq!(
        manager
            .apply_player_move(&id, &second, 1)
            .map_err(|err| err.code()),
        Err("game_already_over")
    );
}

#[test]
fn declined_replay_ends_the_stream() {
    let (manager, bus) = manager_with_bus();
    let id = manager
        .create_session(GameConfig::between("alice", "bob"))
        .expect("create");
    let mut sub = bus.subscribe(id.clone());

    manager.forfeit(&id, "bob").expect("resign");
    manager
        .request_replay(&id, "alice", false)
        .expect("decline");

    let events: Vec<_> = std::iter::from_fn(|| sub.receiver.try_recv().ok()).collect();
    assert_eq!(
        events.last(),
        Some(&GameEvent::GameEnded {
            session_id: id.clone(),
            reason: "replay_declined".into()
        })
    );
    assert_eq!(bus.subscriber_count(), 0);
    assert_eq!(
        manager.get_snapshot(&id),
        Err(SessionError::NotFound(id.clone()))
    );
}

#[tokio::test(start_paused = true)]
async fn idle_sessions_are_reaped() {
    let (manager, bus) = manager_with_bus();
    let stale = manager
        .create_session(GameConfig::between("alice", "bob"))
        .expect("create");
    let fresh = manager
        .create_session(GameConfig::between("carol", "dave"))
        .expect("create");
    let mut sub = bus.subscribe(stale.clone());

    tokio::time::advance(Duration::from_secs(30)).await;
    manager.get_snapshot(&fresh).expect("touch");
    tokio::time::advance(Duration::from_secs(31)).await;

    assert_eq!(manager.cleanup_idle_sessions(), vec![stale.clone()]);
    assert_eq!(manager.active_sessions(), vec![fresh.clone()]);
    assert_eq!(
        sub.receiver.try_recv().expect("event"),
        GameEvent::GameEnded {
            session_id: stale,
            reason: "expired".into()
        }
    );
    assert_eq!(manager.metrics().snapshot().live_sessions(), 1);
}

#[tokio::test(start_paused = true)]
async fn reaper_runs_in_the_background() {
    let (manager, _) = manager_with_bus();
    let id = manager
        .create_session(GameConfig::between("alice", "bob"))
        .expect("create");
    let reaper = manager
        .spawn_reaper(Duration::from_secs(10))
        .expect("runtime available");

    tokio::time::sleep(Duration::from_secs(55)).await;
    assert_eq!(manager.active_sessions(), vec![id.clone()]);

    tokio::time::sleep(Duration::from_secs(20)).await;
    assert!(manager.active_sessions().is_empty());
    reaper.abort();
}

#[test]
fn reaper_needs_a_runtime() {
    let (manager, _) = manager_with_bus();
    assert!(manager.spawn_reaper(Duration::from_secs(1)).is_none());
}

#[test]
#[serial]
fn stale_timer_is_logged() {
    let log = init_test_logging();
    let (manager, _) = manager_with_bus();
    let id = manager
        .create_session(GameConfig::between("alice", "bob"))
        .expect("create");
    let (first, _) = seated(&manager, &id);
    let stamp = manager.get_snapshot(&id).expect("snapshot").stamp();
    manager.apply_player_move(&id, &first, 0).expect("move");

    assert_eq!(manager.expire_turn(&id, stamp), Ok(None));

    let entries = log.matching("stale turn timer ignored");
    assert!(entries
        .iter()
        .any(|entry| entry.field("session_id") == Some(id.as_str())));
}

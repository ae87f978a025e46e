use crate::config::ArenaSettings;
use crate::metrics::ArenaMetrics;
use crate::notifier::Notifier;
use crate::participant::{draw_seats, seat_of, Participant, PlayerId, Seating};
use crate::timer::{self, TurnStamp};
use chrono::{DateTime, Utc};
use fourline_ai::{create_adversary, Adversary, Tier};
use fourline_engine::board::{Board, Position, DEFAULT_COLS, DEFAULT_ROWS};
use fourline_engine::errors::GameError;
use fourline_engine::game::{ForfeitReason, Game, GameStatus, MoveOutcome};
use fourline_engine::seat::{Cell, Seat};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, Weak};
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

pub type SessionId = String;

const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(30 * 60);
const DEFAULT_THINK_DELAY: Duration = Duration::from_millis(750);

/// Registry of live games.
///
/// Cloning is cheap and every clone sees the same sessions. Operations are
/// synchronous; follow-up work (the adversary's reply, the turn timer) is
/// spawned onto the ambient Tokio runtime.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<ManagerInner>,
}

pub(crate) struct ManagerInner {
    sessions: RwLock<HashMap<SessionId, Arc<GameSession>>>,
    notifier: Arc<dyn Notifier>,
    metrics: ArenaMetrics,
    think_delay: Duration,
    idle_ttl: Duration,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("active_sessions", &self.active_sessions().len())
            .field("think_delay", &self.inner.think_delay)
            .field("idle_ttl", &self.inner.idle_ttl)
            .finish()
    }
}

impl SessionManager {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self::with_timing(notifier, DEFAULT_THINK_DELAY, DEFAULT_IDLE_TTL)
    }

    pub fn with_settings(notifier: Arc<dyn Notifier>, settings: &ArenaSettings) -> Self {
        Self::with_timing(notifier, settings.think_delay(), settings.idle_ttl())
    }

    pub fn with_timing(
        notifier: Arc<dyn Notifier>,
        think_delay: Duration,
        idle_ttl: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(ManagerInner {
                sessions: RwLock::new(HashMap::new()),
                notifier,
                metrics: ArenaMetrics::new(),
                think_delay,
                idle_ttl,
            }),
        }
    }

    pub fn metrics(&self) -> ArenaMetrics {
        self.inner.metrics.clone()
    }

    pub(crate) fn downgrade(&self) -> Weak<ManagerInner> {
        Arc::downgrade(&self.inner)
    }

    pub(crate) fn upgrade(weak: &Weak<ManagerInner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    pub fn create_session(&self, config: GameConfig) -> Result<SessionId, SessionError> {
        config.validate()?;
        let id = Uuid::new_v4().to_string();

        tracing::info!(
            session_id = %id,
            rows = config.rows,
            cols = config.cols,
            opponent = %config.opponent,
            timed = config.turn_timeout.is_some(),
            "creating new game session"
        );

        let session = Arc::new(GameSession::new(id.clone(), config)?);
        {
            let mut guard = self
                .inner
                .sessions
                .write()
                .map_err(|_| SessionError::StoragePoisoned)?;
            guard.insert(id.clone(), Arc::clone(&session));
        }
        self.inner.metrics.record_session_created();

        let snapshot = session.snapshot()?;
        tracing::debug!(
            session_id = %id,
            seat_one = %snapshot.seats[0],
            seat_two = %snapshot.seats[1],
            "seats drawn"
        );
        self.publish(&snapshot);
        self.schedule_next_turn(&session, &snapshot);

        Ok(id)
    }

    pub fn get_session(&self, id: &SessionId) -> Result<Arc<GameSession>, SessionError> {
        let guard = self
            .inner
            .sessions
            .read()
            .map_err(|_| SessionError::StoragePoisoned)?;
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(id.clone()))
    }

    pub fn get_snapshot(&self, id: &SessionId) -> Result<SessionSnapshot, SessionError> {
        let session = self.get_session(id)?;
        session.touch();
        session.snapshot()
    }

    /// Drop a piece for `actor` in `column`.
    ///
    /// Checks run in order: the session exists, `actor` is seated, the game
    /// is still running, it is `actor`'s turn, and finally the column itself.
    /// Any rejection leaves the session untouched.
    pub fn apply_player_move(
        &self,
        id: &SessionId,
        actor: &str,
        column: usize,
    ) -> Result<MoveResult, SessionError> {
        let session = self.get_session(id)?;
        session.touch();

        let (seat, outcome, snapshot) = {
            let mut state = session.lock_state()?;
            let seat = state.seat_of(actor)?;
            if state.game.is_over() {
                return Err(GameError::GameAlreadyOver.into());
            }
            if state.game.turn() != seat {
                return Err(SessionError::NotYourTurn {
                    actor: actor.to_string(),
                });
            }
            let outcome = state.game.apply_move(column)?;
            (seat, outcome, session.capture(&state))
        };

        self.inner.metrics.record_move();
        tracing::debug!(
            session_id = %id,
            player = actor,
            %seat,
            column,
            generation = snapshot.generation,
            "player move applied"
        );

        Ok(self.finish_turn(&session, seat, TurnOutcome::Moved(outcome), snapshot))
    }

    /// `actor` resigns; the other seat wins.
    pub fn forfeit(&self, id: &SessionId, actor: &str) -> Result<MoveResult, SessionError> {
        let session = self.get_session(id)?;
        session.touch();

        let (seat, winner, snapshot) = {
            let mut state = session.lock_state()?;
            let seat = state.seat_of(actor)?;
            let winner = state.game.forfeit(seat, ForfeitReason::Resigned)?;
            (seat, winner, session.capture(&state))
        };

        self.inner.metrics.record_forfeit();
        tracing::info!(session_id = %id, player = actor, %seat, "player resigned");

        let outcome = TurnOutcome::Forfeited {
            winner,
            reason: ForfeitReason::Resigned,
        };
        Ok(self.finish_turn(&session, seat, outcome, snapshot))
    }

    /// Answer the end-of-game prompt.
    ///
    /// Accepting resets the board, bumps the round and redraws seats from the
    /// original pair. Declining removes the session. Both decisions take the
    /// session lock, so of two racing answers only the first one applies.
    pub fn request_replay(
        &self,
        id: &SessionId,
        actor: &str,
        accept: bool,
    ) -> Result<ReplayResult, SessionError> {
        if accept {
            let session = self.get_session(id)?;
            session.touch();
            self.restart_round(&session, actor)
                .map(ReplayResult::Restarted)
        } else {
            self.decline_replay(id, actor)?;
            Ok(ReplayResult::Declined)
        }
    }

    fn restart_round(
        &self,
        session: &GameSession,
        actor: &str,
    ) -> Result<SessionSnapshot, SessionError> {
        let snapshot = {
            let mut state = session.lock_state()?;
            state.seat_of(actor)?;
            if !state.game.is_over() {
                return Err(SessionError::GameInProgress);
            }
            state.game.reset();
            state.round += 1;
            let SessionState { seats, rng, .. } = &mut *state;
            *seats = draw_seats(&session.originals, rng);
            session.capture(&state)
        };

        self.inner.metrics.record_replay();
        tracing::info!(
            session_id = %session.id,
            round = snapshot.round,
            seat_one = %snapshot.seats[0],
            seat_two = %snapshot.seats[1],
            "replay accepted, seats redrawn"
        );

        self.publish(&snapshot);
        self.schedule_next_turn(session, &snapshot);
        Ok(snapshot)
    }

    /// The game-over check, the close mark and the removal all happen under
    /// the registry write lock and the session lock.
    fn decline_replay(&self, id: &SessionId, actor: &str) -> Result<(), SessionError> {
        {
            let mut sessions = self
                .inner
                .sessions
                .write()
                .map_err(|_| SessionError::StoragePoisoned)?;
            let session = sessions
                .get(id)
                .cloned()
                .ok_or_else(|| SessionError::NotFound(id.clone()))?;
            {
                let mut state = session.lock_state()?;
                state.seat_of(actor)?;
                if !state.game.is_over() {
                    return Err(SessionError::GameInProgress);
                }
                state.closed = true;
            }
            sessions.remove(id);
        }

        tracing::info!(session_id = %id, player = actor, "replay declined");
        self.close(id, "replay_declined");
        Ok(())
    }

    pub fn delete_session(&self, id: &SessionId) -> Result<(), SessionError> {
        match self.remove_session(id)? {
            Some(_) => {
                self.close(id, "terminated_by_request");
                Ok(())
            }
            None => Err(SessionError::NotFound(id.clone())),
        }
    }

    pub fn active_sessions(&self) -> Vec<SessionId> {
        match self.inner.sessions.read() {
            Ok(guard) => guard.keys().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Remove every session idle for longer than the TTL. Returns the removed
    /// ids.
    pub fn cleanup_idle_sessions(&self) -> Vec<SessionId> {
        let ttl = self.inner.idle_ttl;
        let mut expired = Vec::new();
        {
            let mut guard = match self.inner.sessions.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.retain(|id, session| {
                if session.is_idle(ttl) {
                    session.mark_closed();
                    expired.push(id.clone());
                    false
                } else {
                    true
                }
            });
        }

        for id in &expired {
            tracing::info!(session_id = %id, "session expired after inactivity");
            self.close(id, "expired");
        }
        expired
    }

    /// Run [`cleanup_idle_sessions`](Self::cleanup_idle_sessions) every
    /// `interval` until the manager is dropped.
    pub fn spawn_reaper(&self, interval: Duration) -> Option<JoinHandle<()>> {
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("no tokio runtime available, idle reaper not started");
                return None;
            }
        };
        let weak = self.downgrade();
        let interval = interval.max(Duration::from_millis(1));

        Some(handle.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(manager) = SessionManager::upgrade(&weak) else {
                    break;
                };
                let removed = manager.cleanup_idle_sessions();
                if !removed.is_empty() {
                    tracing::debug!(removed = removed.len(), "idle reaper pass");
                }
            }
        }))
    }

    /// Let the adversary move if the turn stamped `stamp` is still open and
    /// belongs to it. Returns `Ok(None)` for a stale or misdirected call.
    ///
    /// The board is copied under the lock and the choice is made without it.
    pub fn play_adversary_turn(
        &self,
        id: &SessionId,
        stamp: TurnStamp,
    ) -> Result<Option<MoveResult>, SessionError> {
        let session = self.get_session(id)?;
        let Some(adversary) = session.adversary.as_deref() else {
            return Ok(None);
        };

        let (board, seat) = {
            let state = session.lock_state()?;
            if !state.adversary_on_turn(stamp) {
                drop(state);
                self.ignore_stale_adversary_turn(id, stamp);
                return Ok(None);
            }
            (state.game.board().clone(), state.game.turn())
        };

        let Some(column) = adversary.choose_column(&board, seat) else {
            return Ok(None);
        };

        let (outcome, snapshot) = {
            let mut state = session.lock_state()?;
            if !state.adversary_on_turn(stamp) {
                drop(state);
                self.ignore_stale_adversary_turn(id, stamp);
                return Ok(None);
            }
            let outcome = state.game.apply_move(column)?;
            (outcome, session.capture(&state))
        };

        session.touch();
        self.inner.metrics.record_move();
        self.inner.metrics.record_adversary_move();
        tracing::debug!(
            session_id = %id,
            adversary = adversary.name(),
            %seat,
            column,
            generation = snapshot.generation,
            "adversary moved"
        );

        Ok(Some(self.finish_turn(
            &session,
            seat,
            TurnOutcome::Moved(outcome),
            snapshot,
        )))
    }

    /// Turn timer expiry. Forfeits the human on turn if `stamp` still
    /// matches; otherwise does nothing and returns `Ok(None)`.
    pub fn expire_turn(
        &self,
        id: &SessionId,
        stamp: TurnStamp,
    ) -> Result<Option<MoveResult>, SessionError> {
        let session = self.get_session(id)?;

        let (seat, winner, snapshot) = {
            let mut state = session.lock_state()?;
            if state.game.is_over() || state.stamp() != stamp || state.on_turn().is_adversary() {
                drop(state);
                self.inner.metrics.record_stale_timer();
                tracing::debug!(session_id = %id, %stamp, "stale turn timer ignored");
                return Ok(None);
            }
            let seat = state.game.turn();
            let winner = state.game.forfeit(seat, ForfeitReason::TimedOut)?;
            (seat, winner, session.capture(&state))
        };

        self.inner.metrics.record_turn_timed_out();
        tracing::info!(session_id = %id, %seat, %stamp, "turn timed out, seat forfeits");

        let outcome = TurnOutcome::Forfeited {
            winner,
            reason: ForfeitReason::TimedOut,
        };
        Ok(Some(self.finish_turn(&session, seat, outcome, snapshot)))
    }

    fn finish_turn(
        &self,
        session: &GameSession,
        seat: Seat,
        outcome: TurnOutcome,
        snapshot: SessionSnapshot,
    ) -> MoveResult {
        if snapshot.game_over {
            tracing::info!(
                session_id = %snapshot.session_id,
                winner = ?snapshot.winner,
                round = snapshot.round,
                generation = snapshot.generation,
                "game over"
            );
        }
        self.publish(&snapshot);
        self.schedule_next_turn(session, &snapshot);
        MoveResult {
            seat,
            outcome,
            snapshot,
        }
    }

    fn schedule_next_turn(&self, session: &GameSession, snapshot: &SessionSnapshot) {
        if snapshot.game_over {
            return;
        }
        let stamp = snapshot.stamp();
        match snapshot.on_turn() {
            Participant::Adversary(_) => timer::schedule_adversary_turn(
                self,
                session.id.clone(),
                stamp,
                self.inner.think_delay,
            ),
            Participant::Human(_) => {
                if let Some(timeout) = session.config.turn_timeout {
                    timer::arm_turn_timer(self, session.id.clone(), stamp, timeout);
                }
            }
        }
    }

    fn publish(&self, snapshot: &SessionSnapshot) {
        if let Err(err) = self
            .inner
            .notifier
            .render_state(&snapshot.session_id, snapshot)
        {
            self.inner.metrics.record_notify_failure();
            tracing::warn!(
                session_id = %snapshot.session_id,
                generation = snapshot.generation,
                error = %err,
                "notifier failed, state change kept"
            );
        }
    }

    fn ignore_stale_adversary_turn(&self, id: &SessionId, stamp: TurnStamp) {
        self.inner.metrics.record_stale_adversary_turn();
        tracing::debug!(session_id = %id, %stamp, "stale adversary turn ignored");
    }

    fn close(&self, id: &SessionId, reason: &str) {
        self.inner.metrics.record_session_closed();
        self.inner.notifier.session_closed(id, reason);
    }

    fn remove_session(&self, id: &SessionId) -> Result<Option<Arc<GameSession>>, SessionError> {
        let mut guard = self
            .inner
            .sessions
            .write()
            .map_err(|_| SessionError::StoragePoisoned)?;
        let removed = guard.remove(id);
        if let Some(session) = &removed {
            session.mark_closed();
        }
        Ok(removed)
    }
}

/// One game between two participants, across any number of replays.
pub struct GameSession {
    id: SessionId,
    config: GameConfig,
    originals: Seating,
    adversary: Option<Box<dyn Adversary>>,
    created_at: DateTime<Utc>,
    last_active: Mutex<Instant>,
    state: Mutex<SessionState>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("created_at", &self.created_at)
            .field(
                "adversary",
                &self
                    .adversary
                    .as_ref()
                    .map(|ai| ai.name())
                    .unwrap_or("none"),
            )
            .finish()
    }
}

#[derive(Debug)]
struct SessionState {
    game: Game,
    seats: Seating,
    round: u64,
    rng: ChaCha20Rng,
    /// Set once the session leaves the registry. Holders of a stale `Arc`
    /// then see `NotFound`.
    closed: bool,
}

impl SessionState {
    fn stamp(&self) -> TurnStamp {
        TurnStamp::new(self.round, self.game.generation())
    }

    fn on_turn(&self) -> &Participant {
        &self.seats[self.game.turn().index()]
    }

    fn seat_of(&self, actor: &str) -> Result<Seat, SessionError> {
        seat_of(&self.seats, actor).ok_or_else(|| SessionError::NotAParticipant {
            actor: actor.to_string(),
        })
    }

    fn adversary_on_turn(&self, stamp: TurnStamp) -> bool {
        !self.game.is_over() && self.stamp() == stamp && self.on_turn().is_adversary()
    }
}

impl GameSession {
    fn new(id: SessionId, config: GameConfig) -> Result<Self, SessionError> {
        let game = Game::new(config.rows, config.cols)?;
        let mut rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_os_rng(),
        };
        let originals = [
            Participant::Human(config.challenger.clone()),
            config.opponent.clone(),
        ];
        let seats = draw_seats(&originals, &mut rng);
        let adversary = config
            .opponent
            .tier()
            .map(|tier| create_adversary(tier, config.seed));

        Ok(Self {
            id,
            config,
            originals,
            adversary,
            created_at: Utc::now(),
            last_active: Mutex::new(Instant::now()),
            state: Mutex::new(SessionState {
                game,
                seats,
                round: 0,
                rng,
                closed: false,
            }),
        })
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The participants as configured, before any seat draw.
    pub fn participants(&self) -> &Seating {
        &self.originals
    }

    pub fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        let state = self.lock_state()?;
        Ok(self.capture(&state))
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, SessionState>, SessionError> {
        let state = self
            .state
            .lock()
            .map_err(|_| SessionError::StoragePoisoned)?;
        if state.closed {
            return Err(SessionError::NotFound(self.id.clone()));
        }
        Ok(state)
    }

    /// Called with the registry write lock held; registry then session is
    /// the only lock order.
    fn mark_closed(&self) {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state.closed = true;
    }

    fn capture(&self, state: &SessionState) -> SessionSnapshot {
        let game = &state.game;
        SessionSnapshot {
            session_id: self.id.clone(),
            rows: game.board().rows(),
            cols: game.board().cols(),
            board: game.board().to_grid(),
            turn: game.turn(),
            generation: game.generation(),
            round: state.round,
            status: game.status().clone(),
            game_over: game.is_over(),
            winner: game.winner(),
            winning_cells: game.winning_cells().to_vec(),
            seats: state.seats.clone(),
            turn_timeout: self.config.turn_timeout,
            last_move_at: game.last_move_at(),
        }
    }

    fn touch(&self) {
        if let Ok(mut guard) = self.last_active.lock() {
            *guard = Instant::now();
        }
    }

    fn is_idle(&self, ttl: Duration) -> bool {
        match self.last_active.lock() {
            Ok(last) => last.elapsed() >= ttl,
            Err(_) => false,
        }
    }
}

/// What it takes to start a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// The player who asked for the game.
    pub challenger: PlayerId,
    pub opponent: Participant,
    /// `None` plays untimed.
    pub turn_timeout: Option<Duration>,
    /// Fixes the seat draws and the adversary's random choices.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn against_adversary(challenger: impl Into<PlayerId>, tier: Tier) -> Self {
        Self::new(challenger.into(), Participant::Adversary(tier))
    }

    pub fn between(challenger: impl Into<PlayerId>, opponent: impl Into<PlayerId>) -> Self {
        Self::new(challenger.into(), Participant::Human(opponent.into()))
    }

    /// Board size and timer taken from `settings`.
    pub fn from_settings(
        settings: &ArenaSettings,
        challenger: impl Into<PlayerId>,
        opponent: Participant,
    ) -> Self {
        Self {
            rows: settings.default_rows,
            cols: settings.default_cols,
            turn_timeout: settings.turn_timeout(),
            ..Self::new(challenger.into(), opponent)
        }
    }

    fn new(challenger: PlayerId, opponent: Participant) -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            challenger,
            opponent,
            turn_timeout: None,
            seed: None,
        }
    }

    pub fn with_board(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn with_turn_timeout(mut self, timeout: Duration) -> Self {
        self.turn_timeout = Some(timeout);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        Board::new(self.rows, self.cols)
            .map_err(|err| SessionError::InvalidConfig(err.to_string()))?;

        if self.challenger.trim().is_empty() {
            return Err(SessionError::InvalidConfig(
                "challenger id cannot be empty".to_string(),
            ));
        }

        if let Participant::Human(opponent) = &self.opponent {
            if opponent.trim().is_empty() {
                return Err(SessionError::InvalidConfig(
                    "opponent id cannot be empty".to_string(),
                ));
            }
            if *opponent == self.challenger {
                return Err(SessionError::InvalidConfig(
                    "a player cannot challenge themselves".to_string(),
                ));
            }
        }

        if self.turn_timeout == Some(Duration::ZERO) {
            return Err(SessionError::InvalidConfig(
                "turn timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Read-only view of a session, handed to the notifier and to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub rows: usize,
    pub cols: usize,
    /// Row 0 is the top row.
    pub board: Vec<Vec<Cell>>,
    pub turn: Seat,
    pub generation: u64,
    pub round: u64,
    pub status: GameStatus,
    pub game_over: bool,
    pub winner: Option<Seat>,
    pub winning_cells: Vec<Position>,
    pub seats: Seating,
    pub turn_timeout: Option<Duration>,
    pub last_move_at: Option<DateTime<Utc>>,
}

impl SessionSnapshot {
    pub fn stamp(&self) -> TurnStamp {
        TurnStamp::new(self.round, self.generation)
    }

    pub fn participant(&self, seat: Seat) -> &Participant {
        &self.seats[seat.index()]
    }

    pub fn on_turn(&self) -> &Participant {
        self.participant(self.turn)
    }

    /// Seat held by the human `player`, if seated.
    pub fn seat_of(&self, player: &str) -> Option<Seat> {
        seat_of(&self.seats, player)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOutcome {
    Moved(MoveOutcome),
    Forfeited { winner: Seat, reason: ForfeitReason },
}

/// A committed turn: who acted, what happened, and the state afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveResult {
    pub seat: Seat,
    pub outcome: TurnOutcome,
    pub snapshot: SessionSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ReplayResult {
    Restarted(SessionSnapshot),
    Declined,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),
    #[error("{actor} is not seated in this session")]
    NotAParticipant { actor: PlayerId },
    #[error("It is not {actor}'s turn")]
    NotYourTurn { actor: PlayerId },
    #[error("Game is still in progress")]
    GameInProgress,
    #[error("Invalid game config: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Session storage poisoned")]
    StoragePoisoned,
}

impl SessionError {
    /// Stable machine-readable kind.
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::NotFound(_) => "session_not_found",
            SessionError::NotAParticipant { .. } => "not_a_participant",
            SessionError::NotYourTurn { .. } => "not_your_turn",
            SessionError::GameInProgress => "game_in_progress",
            SessionError::InvalidConfig(_) => "invalid_config",
            SessionError::Game(GameError::InvalidColumn { .. }) => "invalid_column",
            SessionError::Game(GameError::ColumnFull { .. }) => "column_full",
            SessionError::Game(GameError::GameAlreadyOver) => "game_already_over",
            SessionError::Game(GameError::InvalidDimensions { .. }) => "invalid_config",
            SessionError::StoragePoisoned => "session_storage_error",
        }
    }
}

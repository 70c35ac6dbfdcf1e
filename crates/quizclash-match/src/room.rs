//! Room and player state, plus the cancellable deadline handle.
//!
//! A `Room` is plain data owned by the registry inside the engine
//! task. Nothing here is shared across threads; the one concurrent
//! piece is [`DeadlineHandle`], a spawned timer task that messages the
//! engine when it fires and is aborted on cancel.

use std::time::Duration;

use quizclash_protocol::{PlayerId, Question, RoomId, ScoreEntry, ServerEvent};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::RoomState;
use crate::engine::EngineCommand;

/// Channel sender for delivering events to one player's connection.
pub type PlayerSender = mpsc::UnboundedSender<ServerEvent>;

/// A seated player. Exists only inside a room and dies with it.
pub struct Player {
    pub id: PlayerId,
    pub username: String,
    pub sender: PlayerSender,
    pub score: u32,
    pub total_response_ms: u64,
    /// Set at most once per round by this player's own submission,
    /// cleared exactly once on every round transition.
    pub answered: bool,
    /// Running count for the stats flush at settlement.
    pub correct_answers: u32,
}

impl Player {
    pub fn new(id: PlayerId, username: String, sender: PlayerSender) -> Self {
        Self {
            id,
            username,
            sender,
            score: 0,
            total_response_ms: 0,
            answered: false,
            correct_answers: 0,
        }
    }
}

/// Handle to a pending timer (round deadline or inter-round pacing).
///
/// Each room holds at most one of these at a time. Cancelling aborts
/// the underlying task; a task that already delivered its command is
/// harmless to abort, and the engine re-validates room state on every
/// firing anyway.
pub struct DeadlineHandle {
    task: JoinHandle<()>,
}

impl DeadlineHandle {
    /// Spawns a timer that sends `cmd` to the engine after `after`.
    pub(crate) fn arm(
        after: Duration,
        tx: mpsc::Sender<EngineCommand>,
        cmd: EngineCommand,
    ) -> Self {
        let task = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = tx.send(cmd).await;
        });
        Self { task }
    }

    pub(crate) fn cancel(self) {
        self.task.abort();
    }
}

impl Drop for DeadlineHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// A snapshot of room metadata for callers and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInfo {
    pub room_id: RoomId,
    pub state: RoomState,
    pub stake: u64,
    pub player_count: usize,
    /// Zero-based index of the current round.
    pub round: usize,
    pub total_rounds: usize,
}

/// One two-player match room.
pub struct Room {
    pub id: RoomId,
    pub stake: u64,
    pub state: RoomState,
    /// Seated players in join order. Capacity is exactly 2.
    pub players: Vec<Player>,
    /// Frozen question sequence, fetched once at start.
    pub questions: Vec<Question>,
    pub round: usize,
    /// The single pending timer, if any.
    pub deadline: Option<DeadlineHandle>,
}

impl Room {
    pub fn new(id: RoomId, stake: u64) -> Self {
        Self {
            id,
            stake,
            state: RoomState::Waiting,
            players: Vec::with_capacity(2),
            questions: Vec::new(),
            round: 0,
            deadline: None,
        }
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= 2
    }

    pub fn seat(&mut self, player: Player) {
        debug_assert!(self.players.len() < 2, "room capacity is exactly 2");
        self.players.push(player);
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.round)
    }

    pub fn all_answered(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(|p| p.answered)
    }

    pub fn clear_answered(&mut self) {
        for p in &mut self.players {
            p.answered = false;
        }
    }

    /// Moves to `next`, asserting the transition is legal.
    pub fn transition(&mut self, next: RoomState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {} -> {next}",
            self.state
        );
        tracing::debug!(room_id = %self.id, from = %self.state, to = %next, "room transition");
        self.state = next;
    }

    /// Installs a new pending timer, cancelling any existing one
    /// first. Cancel-then-arm is what keeps the at-most-one-timer
    /// invariant.
    pub fn arm_deadline(&mut self, handle: DeadlineHandle) {
        if let Some(old) = self.deadline.take() {
            old.cancel();
        }
        self.deadline = Some(handle);
    }

    pub fn cancel_deadline(&mut self) {
        if let Some(handle) = self.deadline.take() {
            handle.cancel();
        }
    }

    /// Sends an event to one seated player. Silently drops if their
    /// connection is gone.
    pub fn send_to(&self, player_id: PlayerId, event: ServerEvent) {
        if let Some(player) = self.players.iter().find(|p| p.id == player_id) {
            let _ = player.sender.send(event);
        }
    }

    /// Sends an event to every seated player.
    pub fn broadcast(&self, event: ServerEvent) {
        for player in &self.players {
            let _ = player.sender.send(event.clone());
        }
    }

    pub fn score_entries(&self) -> Vec<ScoreEntry> {
        self.players
            .iter()
            .map(|p| ScoreEntry {
                username: p.username.clone(),
                score: p.score,
                total_response_ms: p.total_response_ms,
            })
            .collect()
    }

    pub fn info(&self) -> RoomInfo {
        RoomInfo {
            room_id: self.id,
            state: self.state,
            stake: self.stake,
            player_count: self.players.len(),
            round: self.round,
            total_rounds: self.questions.len(),
        }
    }
}

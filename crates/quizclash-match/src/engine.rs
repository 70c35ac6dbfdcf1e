//! The match engine actor: one task that owns every room.
//!
//! All room-state mutations — player operations, timer firings, and
//! collaborator results — arrive as commands on a single channel and
//! run to completion, so room state never needs a lock. Anything that
//! would suspend (question fetch, ledger credit) runs in a spawned
//! task and reports back as a command; the handler then re-fetches the
//! room by id and re-validates its state, because the room may have
//! died while the call was outstanding.

use std::sync::Arc;

use quizclash_protocol::{PlayerId, Question, RoomId, ServerEvent, SubmitOutcome};
use quizclash_store::{Ledger, QuestionBank};
use tokio::sync::{mpsc, oneshot};

use crate::registry::RoomRegistry;
use crate::room::{PlayerSender, RoomInfo};
use crate::{MatchConfig, MatchError};

/// Command channel size. Backpressure only matters under pathological
/// load; timers and handlers both await the send.
const CHANNEL_SIZE: usize = 64;

/// Commands processed by the engine task.
pub(crate) enum EngineCommand {
    // -- Inbound player operations --
    JoinQueue {
        player_id: PlayerId,
        username: String,
        stake: u64,
        sender: PlayerSender,
        reply: oneshot::Sender<Result<RoomId, MatchError>>,
    },
    SubmitAnswer {
        room_id: RoomId,
        player_id: PlayerId,
        answer: usize,
        response_ms: u64,
        reply: oneshot::Sender<SubmitOutcome>,
    },
    Leave {
        player_id: PlayerId,
    },
    GetRoomInfo {
        room_id: RoomId,
        reply: oneshot::Sender<Option<RoomInfo>>,
    },

    // -- Internal resumptions --
    /// The question bank fetch for a starting room completed. An
    /// empty list means the bank failed or had nothing; either way the
    /// room dies before any round begins.
    QuestionsReady {
        room_id: RoomId,
        questions: Vec<Question>,
    },
    /// A round deadline elapsed. Carries the round it was armed for so
    /// stale firings can be discarded.
    DeadlineFired {
        room_id: RoomId,
        round: usize,
    },
    /// The inter-round pacing delay elapsed; `round` is the index to
    /// enter next.
    NextRoundDue {
        room_id: RoomId,
        round: usize,
    },
}

/// Handle to a running match engine. Cheap to clone; this is the
/// entire inbound surface the transport layer calls.
#[derive(Clone)]
pub struct EngineHandle {
    sender: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    /// Queues a player for a match at the given stake.
    ///
    /// Returns the room id synchronously; question fetch and round
    /// start happen afterwards as engine-side effects. Events for this
    /// player flow through `sender`.
    pub async fn join_queue(
        &self,
        player_id: PlayerId,
        username: impl Into<String>,
        stake: u64,
        sender: PlayerSender,
    ) -> Result<RoomId, MatchError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(EngineCommand::JoinQueue {
                player_id,
                username: username.into(),
                stake,
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| MatchError::EngineClosed)?;
        reply_rx.await.map_err(|_| MatchError::EngineClosed)?
    }

    /// Submits an answer for the room's current round.
    pub async fn submit_answer(
        &self,
        room_id: RoomId,
        player_id: PlayerId,
        answer: usize,
        response_ms: u64,
    ) -> Result<SubmitOutcome, MatchError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(EngineCommand::SubmitAnswer {
                room_id,
                player_id,
                answer,
                response_ms,
                reply: reply_tx,
            })
            .await
            .map_err(|_| MatchError::EngineClosed)?;
        reply_rx.await.map_err(|_| MatchError::EngineClosed)
    }

    /// Removes the player from whatever room they occupy, if any.
    /// Also the disconnect path; fire-and-forget.
    pub async fn leave(&self, player_id: PlayerId) {
        let _ = self.sender.send(EngineCommand::Leave { player_id }).await;
    }

    /// Snapshot of a room's metadata, or `None` if it no longer
    /// exists (or the engine is gone).
    pub async fn room_info(&self, room_id: RoomId) -> Option<RoomInfo> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(EngineCommand::GetRoomInfo {
                room_id,
                reply: reply_tx,
            })
            .await
            .ok()?;
        reply_rx.await.ok().flatten()
    }
}

/// The engine state. Lives inside its own Tokio task.
pub(crate) struct MatchEngine<B, L> {
    pub(crate) registry: RoomRegistry,
    pub(crate) config: MatchConfig,
    pub(crate) bank: Arc<B>,
    pub(crate) ledger: Arc<L>,
    /// Self-sender, cloned into timer and collaborator tasks.
    pub(crate) tx: mpsc::Sender<EngineCommand>,
    rx: mpsc::Receiver<EngineCommand>,
}

impl<B: QuestionBank, L: Ledger> MatchEngine<B, L> {
    async fn run(mut self) {
        tracing::info!("match engine started");

        while let Some(cmd) = self.rx.recv().await {
            match cmd {
                EngineCommand::JoinQueue {
                    player_id,
                    username,
                    stake,
                    sender,
                    reply,
                } => {
                    let result = self.handle_join_queue(player_id, username, stake, sender);
                    let _ = reply.send(result);
                }
                EngineCommand::SubmitAnswer {
                    room_id,
                    player_id,
                    answer,
                    response_ms,
                    reply,
                } => {
                    let outcome = self.handle_submit_answer(room_id, player_id, answer, response_ms);
                    let _ = reply.send(outcome);
                }
                EngineCommand::Leave { player_id } => {
                    self.handle_leave(player_id);
                }
                EngineCommand::GetRoomInfo { room_id, reply } => {
                    let _ = reply.send(self.registry.find(room_id).map(|r| r.info()));
                }
                EngineCommand::QuestionsReady { room_id, questions } => {
                    self.on_questions_ready(room_id, questions);
                }
                EngineCommand::DeadlineFired { room_id, round } => {
                    self.on_deadline_fired(room_id, round);
                }
                EngineCommand::NextRoundDue { room_id, round } => {
                    self.on_next_round_due(room_id, round);
                }
            }
        }

        tracing::info!("match engine stopped");
    }

    /// Removes a player from their room. An emptied room is destroyed;
    /// otherwise the remaining player is told their opponent left and
    /// the match plays on.
    fn handle_leave(&mut self, player_id: PlayerId) {
        let Some(room_id) = self.registry.room_of(player_id) else {
            tracing::debug!(%player_id, "leave ignored: not in any room");
            return;
        };

        let emptied = {
            let room = self
                .registry
                .find_mut(room_id)
                .expect("player index points at a live room");
            let Some(idx) = room.players.iter().position(|p| p.id == player_id) else {
                return;
            };
            let departed = room.players.remove(idx);
            tracing::info!(%room_id, %player_id, username = %departed.username, "player left");

            if room.players.is_empty() {
                true
            } else {
                room.broadcast(ServerEvent::OpponentLeft {
                    username: departed.username,
                });
                false
            }
        };

        self.registry.unseat_player(player_id);
        if emptied {
            self.registry.destroy(room_id);
        }
    }
}

/// Spawns a match engine task and returns a handle to it.
pub fn spawn_engine<B: QuestionBank, L: Ledger>(
    config: MatchConfig,
    bank: B,
    ledger: L,
) -> EngineHandle {
    let (tx, rx) = mpsc::channel(CHANNEL_SIZE);

    let engine = MatchEngine {
        registry: RoomRegistry::new(),
        config,
        bank: Arc::new(bank),
        ledger: Arc::new(ledger),
        tx: tx.clone(),
        rx,
    };

    tokio::spawn(engine.run());

    EngineHandle { sender: tx }
}

//! Round scheduling: question progression and deadlines.
//!
//! Drives a filled room through its rounds. Every timer firing and
//! bank result re-fetches the room by id and re-validates state and
//! round index before touching anything — a firing armed for a round
//! the room has already left is a stale no-op.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use quizclash_protocol::{PlayerId, Question, RoomId, ServerEvent, SubmitOutcome};
use quizclash_store::{Ledger, QuestionBank};

use crate::RoomState;
use crate::engine::{EngineCommand, MatchEngine};
use crate::room::DeadlineHandle;
use crate::score;

impl<B: QuestionBank, L: Ledger> MatchEngine<B, L> {
    /// Kicks off a just-filled room: requests the question sequence
    /// from the bank off-task and resumes on `QuestionsReady`.
    pub(crate) fn start_match(&mut self, room_id: RoomId) {
        let bank = Arc::clone(&self.bank);
        let tx = self.tx.clone();
        let count = self.config.questions_per_match;

        tokio::spawn(async move {
            let questions = match bank.sample(count).await {
                Ok(questions) => questions,
                Err(e) => {
                    tracing::warn!(%room_id, error = %e, "question fetch failed");
                    Vec::new()
                }
            };
            let _ = tx
                .send(EngineCommand::QuestionsReady { room_id, questions })
                .await;
        });
    }

    /// Resumption of [`start_match`]. Zero questions is fatal for the
    /// match; fewer than requested shortens it.
    pub(crate) fn on_questions_ready(&mut self, room_id: RoomId, questions: Vec<Question>) {
        {
            let Some(room) = self.registry.find_mut(room_id) else {
                tracing::debug!(%room_id, "room gone while fetching questions");
                return;
            };
            if room.state != RoomState::Starting {
                tracing::debug!(%room_id, state = %room.state, "stale question fetch result");
                return;
            }

            if questions.is_empty() {
                tracing::warn!(%room_id, "no questions available, failing match");
                room.broadcast(ServerEvent::MatchError {
                    reason: "no questions available".into(),
                });
                self.registry.destroy(room_id);
                return;
            }

            if questions.len() < self.config.questions_per_match {
                tracing::info!(
                    %room_id,
                    requested = self.config.questions_per_match,
                    got = questions.len(),
                    "short question sample, reducing round count"
                );
            }

            for player in &mut room.players {
                player.score = 0;
                player.total_response_ms = 0;
                player.correct_answers = 0;
            }
            room.questions = questions;
        }

        self.enter_round(room_id, 0);
    }

    /// Opens round `index`: clears answered flags, arms the round
    /// deadline (cancelling any pending timer first), and broadcasts
    /// the question.
    pub(crate) fn enter_round(&mut self, room_id: RoomId, index: usize) {
        let duration = self.config.round_duration;
        let tx = self.tx.clone();

        let Some(room) = self.registry.find_mut(room_id) else {
            return;
        };
        room.round = index;
        room.transition(RoomState::InRound);
        room.clear_answered();

        room.arm_deadline(DeadlineHandle::arm(
            duration,
            tx,
            EngineCommand::DeadlineFired {
                room_id,
                round: index,
            },
        ));

        let question = room
            .current_question()
            .expect("round index is bounded by question count");
        let total_rounds = room.questions.len();
        room.broadcast(ServerEvent::RoundStarted {
            prompt: question.prompt.clone(),
            options: question.options.clone(),
            round: index,
            total_rounds,
            deadline_unix_ms: unix_ms_after(duration),
        });
        tracing::info!(%room_id, round = index, total_rounds, "round started");
    }

    /// Records an answer. When the last seated player answers, the
    /// round ends immediately instead of waiting out the deadline.
    pub(crate) fn handle_submit_answer(
        &mut self,
        room_id: RoomId,
        player_id: PlayerId,
        answer: usize,
        response_ms: u64,
    ) -> SubmitOutcome {
        let all_answered = {
            let Some(room) = self.registry.find_mut(room_id) else {
                tracing::debug!(%room_id, %player_id, "answer ignored: unknown room");
                return SubmitOutcome::Ignored;
            };
            let outcome = score::record(room, player_id, answer, response_ms, self.config.scoring);
            if outcome == SubmitOutcome::Ignored {
                return SubmitOutcome::Ignored;
            }

            if room.all_answered() {
                room.cancel_deadline();
                true
            } else {
                room.broadcast(ServerEvent::ScoreUpdate {
                    scores: room.score_entries(),
                });
                false
            }
        };

        if all_answered {
            self.end_round(room_id);
        }
        SubmitOutcome::Accepted
    }

    /// A round deadline elapsed. Ignored if the room already advanced
    /// past the round the timer was armed for.
    pub(crate) fn on_deadline_fired(&mut self, room_id: RoomId, round: usize) {
        {
            let Some(room) = self.registry.find_mut(room_id) else {
                return;
            };
            if room.state != RoomState::InRound || room.round != round {
                tracing::debug!(%room_id, round, state = %room.state, "stale deadline firing");
                return;
            }
            // The handle that just fired; drop it.
            room.deadline = None;
        }
        self.end_round(room_id);
    }

    /// Closes the current round. Players who never answered keep a
    /// zero score for the round and contribute no response time —
    /// identical to an incorrect answer. Schedules the next round
    /// after the pacing delay, or hands the room to settlement.
    pub(crate) fn end_round(&mut self, room_id: RoomId) {
        let pacing = self.config.next_round_delay;
        let tx = self.tx.clone();

        let settle = {
            let Some(room) = self.registry.find_mut(room_id) else {
                return;
            };
            room.cancel_deadline();
            room.transition(RoomState::Scoring);
            room.broadcast(ServerEvent::ScoreUpdate {
                scores: room.score_entries(),
            });

            let next = room.round + 1;
            if next < room.questions.len() {
                room.arm_deadline(DeadlineHandle::arm(
                    pacing,
                    tx,
                    EngineCommand::NextRoundDue {
                        room_id,
                        round: next,
                    },
                ));
                false
            } else {
                room.transition(RoomState::Settling);
                true
            }
        };

        if settle {
            self.settle(room_id);
        }
    }

    /// The pacing delay elapsed; enter the next round if the room is
    /// still where the timer left it.
    pub(crate) fn on_next_round_due(&mut self, room_id: RoomId, round: usize) {
        {
            let Some(room) = self.registry.find_mut(room_id) else {
                return;
            };
            if room.state != RoomState::Scoring || round != room.round + 1 {
                tracing::debug!(%room_id, round, state = %room.state, "stale pacing firing");
                return;
            }
            // The pacing handle that just fired.
            room.deadline = None;
        }
        self.enter_round(room_id, round);
    }
}

/// Absolute wall-clock timestamp `after` from now, in milliseconds
/// since the Unix epoch. Sent to clients so they can render countdowns
/// against their own clocks.
fn unix_ms_after(after: Duration) -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO);
    (now + after).as_millis() as u64
}

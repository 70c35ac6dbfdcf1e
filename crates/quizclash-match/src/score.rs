//! Scoring: pure logic over a round's answers.

use quizclash_protocol::{PlayerId, SubmitOutcome};
use serde::{Deserialize, Serialize};

use crate::RoomState;
use crate::room::Room;

/// How a correct answer is converted into points.
///
/// The repository historically mixed flat and time-decayed scoring;
/// here the rule is an explicit, selectable policy with time decay as
/// the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringRule {
    /// `max(10 - response_ms / 1000, 1)` points: a full 10 for an
    /// instant answer, decaying by one per second, floored at 1.
    #[default]
    TimeDecay,
    /// Flat 1 point per correct answer.
    Flat,
}

impl ScoringRule {
    /// Points awarded for a *correct* answer with the given response
    /// time. Incorrect and missing answers always score 0.
    pub fn points(self, response_ms: u64) -> u32 {
        match self {
            Self::TimeDecay => 10u64.saturating_sub(response_ms / 1000).max(1) as u32,
            Self::Flat => 1,
        }
    }
}

/// Records one answer submission against the room's current question.
///
/// Returns [`SubmitOutcome::Ignored`] without touching any state when
/// the room is not in a round, the player is not seated, or the player
/// already answered this round — duplicates have no effect beyond the
/// first. Response time accumulates whether or not the answer was
/// correct.
pub fn record(
    room: &mut Room,
    player_id: PlayerId,
    answer: usize,
    response_ms: u64,
    rule: ScoringRule,
) -> SubmitOutcome {
    if room.state != RoomState::InRound {
        tracing::debug!(room_id = %room.id, %player_id, state = %room.state,
            "answer ignored: round not open");
        return SubmitOutcome::Ignored;
    }
    let Some(correct) = room.current_question().map(|q| q.correct) else {
        return SubmitOutcome::Ignored;
    };
    let Some(player) = room.player_mut(player_id) else {
        tracing::debug!(room_id = %room.id, %player_id, "answer ignored: not seated");
        return SubmitOutcome::Ignored;
    };
    if player.answered {
        tracing::debug!(room_id = %room.id, %player_id, "duplicate answer ignored");
        return SubmitOutcome::Ignored;
    }

    player.total_response_ms += response_ms;
    if answer == correct {
        player.score += rule.points(response_ms);
        player.correct_answers += 1;
    }
    player.answered = true;
    SubmitOutcome::Accepted
}

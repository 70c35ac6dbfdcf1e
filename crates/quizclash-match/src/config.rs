//! Match configuration and the room state machine.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ScoringRule;

// ---------------------------------------------------------------------------
// MatchConfig
// ---------------------------------------------------------------------------

/// Tunables for a match engine instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// How many questions to request from the bank per match. The
    /// bank may return fewer; the match shortens accordingly.
    pub questions_per_match: usize,

    /// Time budget for both players to answer each round.
    pub round_duration: Duration,

    /// Pause between a round ending and the next one starting.
    /// Purely cosmetic pacing.
    pub next_round_delay: Duration,

    /// The winner is credited `stake × payout_multiplier`, rounded to
    /// the nearest whole unit.
    pub payout_multiplier: f64,

    /// How correct answers are converted into points.
    pub scoring: ScoringRule,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            questions_per_match: 7,
            round_duration: Duration::from_secs(10),
            next_round_delay: Duration::from_secs(1),
            payout_multiplier: 1.8,
            scoring: ScoringRule::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// RoomState
// ---------------------------------------------------------------------------

/// The lifecycle state of a room.
///
/// ```text
/// Waiting → Starting → InRound ⇄ Scoring → Settling → Settled
/// ```
///
/// - **Waiting**: fewer than 2 players seated; eligible for matchmaking.
/// - **Starting**: room is full, question fetch in flight.
/// - **InRound**: a question is open for answers under a deadline.
/// - **Scoring**: round closed; either pacing toward the next round
///   or about to settle.
/// - **Settling**: final round done, winner/payout being computed.
/// - **Settled**: terminal; the room is destroyed right after.
///
/// `Waiting` and `Settled` are the only states in which a room holds
/// no pending timer handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomState {
    Waiting,
    Starting,
    InRound,
    Scoring,
    Settling,
    Settled,
}

impl RoomState {
    /// Returns `true` if the room can accept another player.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::Waiting)
    }

    /// Returns `true` if transitioning to `target` is valid.
    ///
    /// `Scoring` branches: back into `InRound` while questions remain,
    /// or into `Settling` after the final round.
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Waiting, Self::Starting)
                | (Self::Starting, Self::InRound)
                | (Self::InRound, Self::Scoring)
                | (Self::Scoring, Self::InRound)
                | (Self::Scoring, Self::Settling)
                | (Self::Settling, Self::Settled)
        )
    }
}

impl std::fmt::Display for RoomState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "Waiting"),
            Self::Starting => write!(f, "Starting"),
            Self::InRound => write!(f, "InRound"),
            Self::Scoring => write!(f, "Scoring"),
            Self::Settling => write!(f, "Settling"),
            Self::Settled => write!(f, "Settled"),
        }
    }
}

//! Events emitted by the match core.
//!
//! Each connected player owns a channel of [`ServerEvent`]s; the
//! transport layer drains it and frames the events however it likes.
//! `#[serde(tag = "type")]` produces internally tagged JSON, which is
//! what web clients expect:
//!
//! ```json
//! { "type": "RoundStarted", "prompt": "...", "round": 0, ... }
//! ```

use serde::{Deserialize, Serialize};

use crate::{RoomId, ScoreEntry};

/// An event delivered to one player (or broadcast to a whole room).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    /// Sent to a player right after they are seated.
    RoomJoined { room_id: RoomId },

    /// Sent to the first seat when a second player fills the room.
    OpponentJoined { username: String },

    /// A new round is open for answers until `deadline_unix_ms`.
    RoundStarted {
        prompt: String,
        options: Vec<String>,
        /// Zero-based round index.
        round: usize,
        total_rounds: usize,
        /// Absolute deadline, milliseconds since the Unix epoch.
        deadline_unix_ms: u64,
    },

    /// Current standings, broadcast after each accepted answer and at
    /// the end of every round.
    ScoreUpdate { scores: Vec<ScoreEntry> },

    /// Terminal event: final standings, the winner, and the payout.
    /// Emitted exactly once per room, whether or not the ledger credit
    /// succeeded.
    MatchSettled {
        players: Vec<ScoreEntry>,
        winner: String,
        stake: u64,
        payout: u64,
    },

    /// The other player left or disconnected mid-match.
    OpponentLeft { username: String },

    /// The match could not start or continue; the room is gone.
    MatchError { reason: String },
}

/// The synchronous result of an answer submission.
///
/// `Ignored` covers every non-fatal rejection: unknown room, player
/// not seated, round not open, or a duplicate submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitOutcome {
    Accepted,
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_started_json_format() {
        let ev = ServerEvent::RoundStarted {
            prompt: "2 + 2?".into(),
            options: vec!["3".into(), "4".into()],
            round: 0,
            total_rounds: 7,
            deadline_unix_ms: 1_700_000_010_000,
        };
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();

        assert_eq!(json["type"], "RoundStarted");
        assert_eq!(json["round"], 0);
        assert_eq!(json["total_rounds"], 7);
        assert_eq!(json["deadline_unix_ms"], 1_700_000_010_000u64);
    }

    #[test]
    fn test_room_joined_json_format() {
        let ev = ServerEvent::RoomJoined { room_id: RoomId(5) };
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();

        assert_eq!(json["type"], "RoomJoined");
        assert_eq!(json["room_id"], 5);
    }

    #[test]
    fn test_match_settled_round_trip() {
        let ev = ServerEvent::MatchSettled {
            players: vec![
                ScoreEntry {
                    username: "alice".into(),
                    score: 27,
                    total_response_ms: 3000,
                },
                ScoreEntry {
                    username: "bob".into(),
                    score: 0,
                    total_response_ms: 0,
                },
            ],
            winner: "alice".into(),
            stake: 10,
            payout: 18,
        };
        let bytes = serde_json::to_vec(&ev).unwrap();
        let decoded: ServerEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(ev, decoded);
    }

    #[test]
    fn test_score_update_round_trip() {
        let ev = ServerEvent::ScoreUpdate {
            scores: vec![ScoreEntry {
                username: "bob".into(),
                score: 1,
                total_response_ms: 4200,
            }],
        };
        let bytes = serde_json::to_vec(&ev).unwrap();
        let decoded: ServerEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(ev, decoded);
    }

    #[test]
    fn test_match_error_json_format() {
        let ev = ServerEvent::MatchError {
            reason: "no questions available".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "MatchError");
        assert_eq!(json["reason"], "no questions available");
    }

    #[test]
    fn test_submit_outcome_round_trip() {
        for outcome in [SubmitOutcome::Accepted, SubmitOutcome::Ignored] {
            let bytes = serde_json::to_vec(&outcome).unwrap();
            let decoded: SubmitOutcome = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(outcome, decoded);
        }
    }

    #[test]
    fn test_unknown_event_type_fails_to_decode() {
        let unknown = r#"{"type": "TimeTravel", "year": 1985}"#;
        let result: Result<ServerEvent, _> = serde_json::from_str(unknown);
        assert!(result.is_err());
    }
}

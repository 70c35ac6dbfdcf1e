//! Identity newtypes and core data shapes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique identifier for a player, assigned by the transport layer
/// when the connection authenticates.
///
/// `#[serde(transparent)]` keeps the wire shape a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p-{}", self.0)
    }
}

/// A unique identifier for a match room.
///
/// Ids are handed out monotonically by the room registry, so a lower
/// id always means an older room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r-{}", self.0)
    }
}

/// One quiz question as frozen into a room at match start.
///
/// Owned by the external question bank; the core copies it once and
/// never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The prompt text shown to both players.
    pub prompt: String,
    /// Answer options, in display order.
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct: usize,
}

/// A per-player score snapshot, broadcast mid-match and at settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub username: String,
    pub score: u32,
    /// Cumulative response time across all answered rounds.
    pub total_response_ms: u64,
}

/// Aggregate statistics flushed to the ledger store when a match
/// settles. Fire-and-forget; the core never reads these back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub correct_answers: u32,
    pub total_points: u32,
    pub games_played: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_serializes_as_plain_number() {
        // `#[serde(transparent)]` means PlayerId(42) → `42`, not `{"0":42}`.
        let json = serde_json::to_string(&PlayerId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_player_id_display() {
        assert_eq!(PlayerId(7).to_string(), "p-7");
    }

    #[test]
    fn test_room_id_orders_by_creation() {
        assert!(RoomId(1) < RoomId(2));
        assert_eq!(RoomId(3).to_string(), "r-3");
    }

    #[test]
    fn test_question_round_trip() {
        let q = Question {
            prompt: "Largest planet?".into(),
            options: vec!["Mars".into(), "Jupiter".into()],
            correct: 1,
        };
        let bytes = serde_json::to_vec(&q).unwrap();
        let decoded: Question = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(q, decoded);
    }

    #[test]
    fn test_score_entry_json_fields() {
        let entry = ScoreEntry {
            username: "alice".into(),
            score: 9,
            total_response_ms: 1000,
        };
        let json: serde_json::Value = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["score"], 9);
        assert_eq!(json["total_response_ms"], 1000);
    }

    #[test]
    fn test_player_stats_default_is_zeroed() {
        let stats = PlayerStats::default();
        assert_eq!(stats.correct_answers, 0);
        assert_eq!(stats.total_points, 0);
        assert_eq!(stats.games_played, 0);
    }
}

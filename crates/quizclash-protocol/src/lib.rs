//! Shared types for Quizclash.
//!
//! Everything the match core exchanges with the outside world lives
//! here: identity newtypes, the frozen [`Question`] shape, per-player
//! score snapshots, and the [`ServerEvent`] enum that the transport
//! layer delivers to clients. All of it is serde-serializable; the
//! JSON shapes are part of the contract and are pinned by tests.
//!
//! The protocol layer knows nothing about rooms, timers, or ledgers —
//! it only defines what travels between the core and its callers.

mod events;
mod types;

pub use events::{ServerEvent, SubmitOutcome};
pub use types::{PlayerId, PlayerStats, Question, RoomId, ScoreEntry};

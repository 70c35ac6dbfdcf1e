//! The Quizclash match core.
//!
//! A single engine task owns every live room and processes inbound
//! player operations, deadline firings, and collaborator results as
//! run-to-completion commands — no locks, no partially applied state.
//!
//! # Key types
//!
//! - [`spawn_engine`] / [`EngineHandle`] — start the engine, talk to it
//! - [`MatchConfig`] — question count, deadlines, payout multiplier
//! - [`ScoringRule`] — time-decayed (default) or flat per-correct scoring
//! - [`RoomState`] — per-room lifecycle state machine
//! - [`RoomInfo`] — observability snapshot for callers and tests

mod config;
mod engine;
mod error;
mod matchmaker;
mod registry;
mod room;
mod scheduler;
mod score;
mod settlement;

pub use config::{MatchConfig, RoomState};
pub use engine::{EngineHandle, spawn_engine};
pub use error::MatchError;
pub use room::{PlayerSender, RoomInfo};
pub use score::ScoringRule;

//! Error types for the match core.

use quizclash_protocol::PlayerId;

/// Errors reported to callers of the match engine.
///
/// Everything here is a caller-level rejection; internal failures
/// (bank empty, ledger down) surface as broadcast events instead,
/// because by the time they happen there is no single caller to
/// report to.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// The player is already seated in a room; a second concurrent
    /// match is never allowed.
    #[error("player {0} is already in a match")]
    AlreadyInMatch(PlayerId),

    /// The engine task is gone (shut down or crashed).
    #[error("match engine is not running")]
    EngineClosed,
}

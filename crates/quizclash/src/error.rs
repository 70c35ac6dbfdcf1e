//! Top-level error type for embedders.

use quizclash_match::MatchError;
use quizclash_store::StoreError;
use thiserror::Error;

/// Any error the engine surface can return, unified so embedders can
/// hold one error type at the boundary.
#[derive(Debug, Error)]
pub enum QuizclashError {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

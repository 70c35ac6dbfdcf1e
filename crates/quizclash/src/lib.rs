//! Quizclash: a real-time, two-player, stake-matched quiz engine.
//!
//! Players queue with a stake; two players at the same stake share a
//! room and race through a fixed sequence of timed questions. Faster
//! correct answers earn more points, and the higher total score (ties
//! broken by cumulative response time) takes the pot.
//!
//! # Quick start
//!
//! ```no_run
//! use quizclash::prelude::*;
//! use tokio::sync::mpsc;
//!
//! # async fn run() -> Result<(), QuizclashError> {
//! let bank = MemoryBank::new(vec![Question {
//!     prompt: "2 + 2?".into(),
//!     options: vec!["3".into(), "4".into()],
//!     correct: 1,
//! }]);
//! let ledger = MemoryLedger::new();
//!
//! let engine = EngineBuilder::new().build(bank, ledger);
//!
//! let (tx, mut rx) = mpsc::unbounded_channel();
//! let room = engine.join_queue(PlayerId(1), "alice", 10, tx).await?;
//! println!("waiting in {room}");
//! while let Some(event) = rx.recv().await {
//!     println!("{event:?}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The engine never touches a socket: each player hands in an event
//! channel at join time and the transport layer drains it.

mod builder;
mod error;

pub use builder::EngineBuilder;
pub use error::QuizclashError;

pub mod prelude {
    pub use crate::builder::EngineBuilder;
    pub use crate::error::QuizclashError;
    pub use quizclash_match::{
        EngineHandle, MatchConfig, MatchError, PlayerSender, RoomInfo, RoomState, ScoringRule,
        spawn_engine,
    };
    pub use quizclash_protocol::{
        PlayerId, PlayerStats, Question, RoomId, ScoreEntry, ServerEvent, SubmitOutcome,
    };
    pub use quizclash_store::{Ledger, MemoryBank, MemoryLedger, QuestionBank, StoreError};
}

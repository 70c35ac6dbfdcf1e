//! Builder for wiring an engine to its collaborators.

use std::time::Duration;

use quizclash_match::{EngineHandle, MatchConfig, ScoringRule, spawn_engine};
use quizclash_store::{Ledger, QuestionBank};

/// Configures and spawns a match engine.
///
/// ```no_run
/// use quizclash::prelude::*;
/// use std::time::Duration;
///
/// let engine = EngineBuilder::new()
///     .questions_per_match(5)
///     .round_duration(Duration::from_secs(15))
///     .scoring(ScoringRule::Flat)
///     .build(MemoryBank::new(vec![]), MemoryLedger::new());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    config: MatchConfig,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration at once.
    pub fn match_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn questions_per_match(mut self, count: usize) -> Self {
        self.config.questions_per_match = count;
        self
    }

    pub fn round_duration(mut self, duration: Duration) -> Self {
        self.config.round_duration = duration;
        self
    }

    pub fn next_round_delay(mut self, delay: Duration) -> Self {
        self.config.next_round_delay = delay;
        self
    }

    pub fn payout_multiplier(mut self, multiplier: f64) -> Self {
        self.config.payout_multiplier = multiplier;
        self
    }

    pub fn scoring(mut self, rule: ScoringRule) -> Self {
        self.config.scoring = rule;
        self
    }

    /// Spawns the engine task on the current Tokio runtime and returns
    /// a handle to it.
    pub fn build<B: QuestionBank, L: Ledger>(self, bank: B, ledger: L) -> EngineHandle {
        spawn_engine(self.config, bank, ledger)
    }
}

//! The balance ledger seam and an in-memory implementation.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use quizclash_protocol::PlayerStats;

use crate::StoreError;

/// The external balance and statistics store.
///
/// The match core calls `credit` exactly once per settled room and
/// treats failures as best-effort: they are logged for reconciliation,
/// never retried, and never block room teardown. `record_stats` is
/// fire-and-forget.
pub trait Ledger: Send + Sync + 'static {
    /// Credits `amount` to the user's balance.
    fn credit(
        &self,
        username: &str,
        amount: u64,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Merges match statistics into the user's running totals.
    fn record_stats(
        &self,
        username: &str,
        stats: PlayerStats,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Ledgers are usually shared between the engine and the embedder.
impl<L: Ledger> Ledger for std::sync::Arc<L> {
    fn credit(
        &self,
        username: &str,
        amount: u64,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).credit(username, amount)
    }

    fn record_stats(
        &self,
        username: &str,
        stats: PlayerStats,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).record_stats(username, stats)
    }
}

#[derive(Default)]
struct LedgerInner {
    balances: HashMap<String, u64>,
    /// Every credit ever applied, in order. Lets tests assert the
    /// at-most-once settlement guarantee.
    credits: Vec<(String, u64)>,
    stats: HashMap<String, PlayerStats>,
}

/// An in-memory ledger for tests and the demo.
///
/// All operations complete immediately; a failure toggle makes
/// `credit` return errors so callers can exercise the best-effort
/// path.
#[derive(Default)]
pub struct MemoryLedger {
    inner: Mutex<LedgerInner>,
    fail_credits: AtomicBool,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a starting balance for a user.
    pub fn with_balance(self, username: &str, amount: u64) -> Self {
        self.inner
            .lock()
            .expect("ledger lock poisoned")
            .balances
            .insert(username.to_string(), amount);
        self
    }

    /// When set, every `credit` call fails with `CreditRejected`.
    pub fn set_fail_credits(&self, fail: bool) {
        self.fail_credits.store(fail, Ordering::Relaxed);
    }

    pub fn balance(&self, username: &str) -> Option<u64> {
        self.inner
            .lock()
            .expect("ledger lock poisoned")
            .balances
            .get(username)
            .copied()
    }

    /// All credits applied so far, in application order.
    pub fn credits(&self) -> Vec<(String, u64)> {
        self.inner
            .lock()
            .expect("ledger lock poisoned")
            .credits
            .clone()
    }

    pub fn stats_for(&self, username: &str) -> Option<PlayerStats> {
        self.inner
            .lock()
            .expect("ledger lock poisoned")
            .stats
            .get(username)
            .copied()
    }
}

impl Ledger for MemoryLedger {
    fn credit(
        &self,
        username: &str,
        amount: u64,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        let result = if self.fail_credits.load(Ordering::Relaxed) {
            Err(StoreError::CreditRejected {
                username: username.to_string(),
                reason: "ledger offline".into(),
            })
        } else {
            let mut inner = self.inner.lock().expect("ledger lock poisoned");
            *inner.balances.entry(username.to_string()).or_insert(0) += amount;
            inner.credits.push((username.to_string(), amount));
            Ok(())
        };
        async move { result }
    }

    fn record_stats(
        &self,
        username: &str,
        stats: PlayerStats,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        {
            let mut inner = self.inner.lock().expect("ledger lock poisoned");
            let entry = inner.stats.entry(username.to_string()).or_default();
            entry.correct_answers += stats.correct_answers;
            entry.total_points += stats.total_points;
            entry.games_played += stats.games_played;
        }
        async move { Ok(()) }
    }
}

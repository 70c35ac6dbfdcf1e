//! Error types for the store layer.

/// Errors surfaced by the external question bank and ledger.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The question bank could not serve a sample request.
    #[error("question bank unavailable: {0}")]
    BankUnavailable(String),

    /// The ledger refused or failed a credit. The match core logs
    /// this for reconciliation and moves on; it never retries.
    #[error("credit for {username} rejected: {reason}")]
    CreditRejected { username: String, reason: String },

    /// No account exists for the given username.
    #[error("unknown user {0}")]
    UnknownUser(String),
}

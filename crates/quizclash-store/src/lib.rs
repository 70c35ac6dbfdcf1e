//! External-collaborator seams for Quizclash.
//!
//! The match core never talks to a database directly; it reaches the
//! question bank and the balance ledger through the [`QuestionBank`]
//! and [`Ledger`] traits. Production deployments implement them over
//! whatever storage they run; [`MemoryBank`] and [`MemoryLedger`] back
//! the tests and the demo binary.

mod bank;
mod error;
mod ledger;

pub use bank::{MemoryBank, QuestionBank};
pub use error::StoreError;
pub use ledger::{Ledger, MemoryLedger};

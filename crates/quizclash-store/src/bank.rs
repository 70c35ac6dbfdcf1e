//! The question bank seam and an in-memory implementation.

use std::future::Future;

use quizclash_protocol::Question;
use rand::seq::IndexedRandom;

use crate::StoreError;

/// Source of quiz questions for new matches.
///
/// `sample(n)` returns an ordered sequence of *up to* `n` questions —
/// a short bank returns what it has, and the match core shortens the
/// match accordingly. The returned futures must be `Send` because the
/// core awaits them off the engine task.
pub trait QuestionBank: Send + Sync + 'static {
    /// Draws up to `n` questions.
    fn sample(
        &self,
        n: usize,
    ) -> impl Future<Output = Result<Vec<Question>, StoreError>> + Send;
}

/// Banks are usually shared between the engine and the embedder.
impl<B: QuestionBank> QuestionBank for std::sync::Arc<B> {
    fn sample(
        &self,
        n: usize,
    ) -> impl Future<Output = Result<Vec<Question>, StoreError>> + Send {
        (**self).sample(n)
    }
}

/// A fixed in-memory question pool, sampled without replacement.
///
/// Used by tests and the demo; a production bank would run the same
/// contract over its database.
pub struct MemoryBank {
    questions: Vec<Question>,
}

impl MemoryBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Number of questions in the pool.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl QuestionBank for MemoryBank {
    fn sample(
        &self,
        n: usize,
    ) -> impl Future<Output = Result<Vec<Question>, StoreError>> + Send {
        // Sample before entering the future so the rng never crosses
        // an await point.
        let picked: Vec<Question> = {
            let mut rng = rand::rng();
            self.questions
                .choose_multiple(&mut rng, n)
                .cloned()
                .collect()
        };
        async move { Ok(picked) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(prompt: &str) -> Question {
        Question {
            prompt: prompt.into(),
            options: vec!["a".into(), "b".into()],
            correct: 0,
        }
    }

    #[tokio::test]
    async fn test_sample_returns_requested_count() {
        let bank = MemoryBank::new((0..10).map(|i| question(&format!("q{i}"))).collect());
        let drawn = bank.sample(7).await.unwrap();
        assert_eq!(drawn.len(), 7);
    }

    #[tokio::test]
    async fn test_sample_without_replacement() {
        let bank = MemoryBank::new((0..10).map(|i| question(&format!("q{i}"))).collect());
        let drawn = bank.sample(10).await.unwrap();
        let mut prompts: Vec<_> = drawn.iter().map(|q| q.prompt.clone()).collect();
        prompts.sort();
        prompts.dedup();
        assert_eq!(prompts.len(), 10, "no question should repeat");
    }

    #[tokio::test]
    async fn test_short_bank_returns_fewer() {
        let bank = MemoryBank::new(vec![question("only one")]);
        let drawn = bank.sample(7).await.unwrap();
        assert_eq!(drawn.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_bank_returns_nothing() {
        let bank = MemoryBank::new(vec![]);
        let drawn = bank.sample(7).await.unwrap();
        assert!(drawn.is_empty());
    }
}

//! Two simulated players play one full match end to end.
//!
//! Run with `cargo run -p quiz-duel`; set `RUST_LOG=debug` for the
//! engine's internal transitions.

use std::sync::Arc;
use std::time::Duration;

use quizclash::prelude::*;
use rand::Rng;
use tokio::sync::mpsc;
use tracing::info;

fn question_pool() -> Vec<Question> {
    [
        ("What is the capital of France?", ["Lyon", "Paris", "Nice"], 1),
        ("Which planet is closest to the sun?", ["Mercury", "Venus", "Mars"], 0),
        ("How many sides does a hexagon have?", ["5", "6", "7"], 1),
        ("What is 12 × 12?", ["124", "142", "144"], 2),
        ("Which ocean is the largest?", ["Atlantic", "Indian", "Pacific"], 2),
        ("What gas do plants absorb?", ["Oxygen", "CO2", "Nitrogen"], 1),
        ("Who painted the Mona Lisa?", ["Da Vinci", "Monet", "Picasso"], 0),
    ]
    .into_iter()
    .map(|(prompt, options, correct)| Question {
        prompt: prompt.into(),
        options: options.into_iter().map(String::from).collect(),
        correct,
    })
    .collect()
}

/// Drives one player: answers each round with a random pick after a
/// random delay, and stops once the match settles.
async fn play(
    name: &'static str,
    id: PlayerId,
    engine: EngineHandle,
    mut rx: mpsc::UnboundedReceiver<ServerEvent>,
) {
    let mut room = None;

    while let Some(event) = rx.recv().await {
        match event {
            ServerEvent::RoomJoined { room_id } => {
                info!(player = name, %room_id, "seated");
                room = Some(room_id);
            }
            ServerEvent::OpponentJoined { username } => {
                info!(player = name, opponent = %username, "opponent arrived");
            }
            ServerEvent::RoundStarted {
                prompt,
                options,
                round,
                total_rounds,
                ..
            } => {
                info!(player = name, round, total_rounds, %prompt, "round open");
                let (choice, delay_ms) = {
                    let mut rng = rand::rng();
                    (
                        rng.random_range(0..options.len()),
                        rng.random_range(400..3000u64),
                    )
                };
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                if let Some(room_id) = room {
                    let _ = engine.submit_answer(room_id, id, choice, delay_ms).await;
                }
            }
            ServerEvent::ScoreUpdate { scores } => {
                for entry in &scores {
                    info!(
                        player = name,
                        username = %entry.username,
                        score = entry.score,
                        "standings"
                    );
                }
            }
            ServerEvent::MatchSettled {
                winner,
                payout,
                stake,
                ..
            } => {
                info!(player = name, %winner, stake, payout, "match settled");
                break;
            }
            ServerEvent::OpponentLeft { username } => {
                info!(player = name, opponent = %username, "opponent left");
            }
            ServerEvent::MatchError { reason } => {
                info!(player = name, %reason, "match failed");
                break;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), QuizclashError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let bank = MemoryBank::new(question_pool());
    let ledger = Arc::new(MemoryLedger::new().with_balance("alice", 100).with_balance("bob", 100));

    let engine = EngineBuilder::new()
        .questions_per_match(5)
        .round_duration(Duration::from_secs(10))
        .build(bank, Arc::clone(&ledger));

    let (alice_tx, alice_rx) = mpsc::unbounded_channel();
    let (bob_tx, bob_rx) = mpsc::unbounded_channel();

    engine.join_queue(PlayerId(1), "alice", 10, alice_tx).await?;
    engine.join_queue(PlayerId(2), "bob", 10, bob_tx).await?;

    let alice = tokio::spawn(play("alice", PlayerId(1), engine.clone(), alice_rx));
    let bob = tokio::spawn(play("bob", PlayerId(2), engine.clone(), bob_rx));
    let _ = tokio::join!(alice, bob);

    for name in ["alice", "bob"] {
        info!(
            player = name,
            balance = ledger.balance(name).unwrap_or(0),
            "final balance"
        );
    }
    Ok(())
}

//! Settlement: winner selection, payout, and the ledger flush.

use std::sync::Arc;

use quizclash_protocol::{PlayerStats, RoomId, ScoreEntry, ServerEvent};
use quizclash_store::{Ledger, QuestionBank};

use crate::RoomState;
use crate::engine::MatchEngine;

/// Index of the winning entry: highest score, ties broken by lower
/// total response time, remaining exact ties by seat order (the
/// earlier joiner wins).
///
/// The scan only replaces the current best on a strict improvement,
/// which is what makes the seat-order tie-break deterministic.
pub fn winner(entries: &[ScoreEntry]) -> usize {
    let mut best = 0;
    for (i, entry) in entries.iter().enumerate().skip(1) {
        let current = &entries[best];
        let better = entry.score > current.score
            || (entry.score == current.score
                && entry.total_response_ms < current.total_response_ms);
        if better {
            best = i;
        }
    }
    best
}

/// Winner's credit: `stake × multiplier`, rounded to the nearest
/// whole unit.
pub fn payout(stake: u64, multiplier: f64) -> u64 {
    (stake as f64 * multiplier).round() as u64
}

impl<B: QuestionBank, L: Ledger> MatchEngine<B, L> {
    /// Settles a room that finished its final round: broadcasts the
    /// terminal event, destroys the room, and flushes the payout and
    /// per-player stats to the ledger.
    ///
    /// The ledger calls run in a spawned task; a credit failure is
    /// logged but never rolls back the settlement the players already
    /// saw.
    pub(crate) fn settle(&mut self, room_id: RoomId) {
        let Some(room) = self.registry.find_mut(room_id) else {
            return;
        };
        if room.state != RoomState::Settling {
            tracing::debug!(%room_id, state = %room.state, "settle skipped: wrong state");
            return;
        }

        let entries = room.score_entries();
        let winner_name = entries[winner(&entries)].username.clone();
        let amount = payout(room.stake, self.config.payout_multiplier);

        room.broadcast(ServerEvent::MatchSettled {
            players: entries,
            winner: winner_name.clone(),
            stake: room.stake,
            payout: amount,
        });
        room.transition(RoomState::Settled);
        tracing::info!(%room_id, winner = %winner_name, payout = amount, "match settled");

        let stats: Vec<(String, PlayerStats)> = room
            .players
            .iter()
            .map(|p| {
                (
                    p.username.clone(),
                    PlayerStats {
                        correct_answers: p.correct_answers,
                        total_points: p.score,
                        games_played: 1,
                    },
                )
            })
            .collect();

        self.registry.destroy(room_id);

        let ledger = Arc::clone(&self.ledger);
        tokio::spawn(async move {
            if let Err(e) = ledger.credit(&winner_name, amount).await {
                tracing::warn!(%room_id, winner = %winner_name, error = %e,
                    "payout credit failed");
            }
            for (username, s) in stats {
                if let Err(e) = ledger.record_stats(&username, s).await {
                    tracing::warn!(%room_id, %username, error = %e, "stats flush failed");
                }
            }
        });
    }
}

//! Matchmaking: pairing waiting players into rooms by stake.

use quizclash_protocol::{PlayerId, RoomId, ServerEvent};
use quizclash_store::{Ledger, QuestionBank};

use crate::RoomState;
use crate::engine::MatchEngine;
use crate::room::{Player, PlayerSender};
use crate::MatchError;

impl<B: QuestionBank, L: Ledger> MatchEngine<B, L> {
    /// Seats a player into the oldest compatible waiting room, or a
    /// fresh room if none matches the stake.
    ///
    /// Returns the room id synchronously. When the second seat fills,
    /// the first player is told their opponent arrived and the room is
    /// handed to the round scheduler; the question fetch and round
    /// start are asynchronous side effects.
    pub(crate) fn handle_join_queue(
        &mut self,
        player_id: PlayerId,
        username: String,
        stake: u64,
        sender: PlayerSender,
    ) -> Result<RoomId, MatchError> {
        if self.registry.is_seated(player_id) {
            tracing::debug!(%player_id, "join rejected: already in a match");
            return Err(MatchError::AlreadyInMatch(player_id));
        }

        let room_id = match self.registry.find_waiting_with_stake(stake) {
            Some(existing) => existing,
            None => self.registry.create(stake),
        };

        let filled = {
            let room = self
                .registry
                .find_mut(room_id)
                .expect("room was just located or created");
            room.seat(Player::new(player_id, username.clone(), sender));
            room.send_to(player_id, ServerEvent::RoomJoined { room_id });

            if room.is_full() {
                let first_seat = room.players[0].id;
                room.send_to(first_seat, ServerEvent::OpponentJoined { username });
                room.transition(RoomState::Starting);
                true
            } else {
                false
            }
        };

        self.registry.seat_player(player_id, room_id);
        tracing::info!(%room_id, %player_id, stake, filled, "player seated");

        if filled {
            self.start_match(room_id);
        }
        Ok(room_id)
    }
}

//! The room registry: the single structure shared across rooms.
//!
//! Owns every live room and the player→room index. All operations are
//! synchronous single-step mutations on maps; the engine task is the
//! only caller, so no locking is involved.

use std::collections::{BTreeMap, HashMap};

use quizclash_protocol::{PlayerId, RoomId};

use crate::RoomState;
use crate::room::Room;

pub struct RoomRegistry {
    /// Live rooms keyed by id. A `BTreeMap` keeps iteration in id
    /// order, and ids are monotone, so matchmaking scans always visit
    /// the oldest room first.
    rooms: BTreeMap<RoomId, Room>,

    /// Which room each player is seated in. A player is in at most
    /// one room at a time.
    player_rooms: HashMap<PlayerId, RoomId>,

    next_room_id: u64,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: BTreeMap::new(),
            player_rooms: HashMap::new(),
            next_room_id: 1,
        }
    }

    /// Creates an empty waiting room for the given stake.
    pub fn create(&mut self, stake: u64) -> RoomId {
        let room_id = RoomId(self.next_room_id);
        self.next_room_id += 1;
        self.rooms.insert(room_id, Room::new(room_id, stake));
        tracing::info!(%room_id, stake, "room created");
        room_id
    }

    pub fn find(&self, room_id: RoomId) -> Option<&Room> {
        self.rooms.get(&room_id)
    }

    pub fn find_mut(&mut self, room_id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(&room_id)
    }

    /// Oldest waiting room with a free seat and an exactly matching
    /// stake, if any.
    pub fn find_waiting_with_stake(&self, stake: u64) -> Option<RoomId> {
        self.rooms
            .values()
            .find(|room| {
                room.state == RoomState::Waiting && !room.is_full() && room.stake == stake
            })
            .map(|room| room.id)
    }

    /// Removes a room, cancelling its pending timer and unseating its
    /// players. Returns the room so the caller can still inspect it.
    pub fn destroy(&mut self, room_id: RoomId) -> Option<Room> {
        let mut room = self.rooms.remove(&room_id)?;
        room.cancel_deadline();
        self.player_rooms.retain(|_, rid| *rid != room_id);
        tracing::info!(%room_id, "room destroyed");
        Some(room)
    }

    pub fn seat_player(&mut self, player_id: PlayerId, room_id: RoomId) {
        self.player_rooms.insert(player_id, room_id);
    }

    pub fn unseat_player(&mut self, player_id: PlayerId) {
        self.player_rooms.remove(&player_id);
    }

    pub fn room_of(&self, player_id: PlayerId) -> Option<RoomId> {
        self.player_rooms.get(&player_id).copied()
    }

    pub fn is_seated(&self, player_id: PlayerId) -> bool {
        self.player_rooms.contains_key(&player_id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::Player;
    use tokio::sync::mpsc;

    fn seat(registry: &mut RoomRegistry, room_id: RoomId, player_id: PlayerId) {
        let sender = mpsc::unbounded_channel().0;
        let room = registry.find_mut(room_id).unwrap();
        room.seat(Player::new(player_id, format!("user{}", player_id.0), sender));
        registry.seat_player(player_id, room_id);
    }

    #[test]
    fn test_create_hands_out_monotone_ids() {
        let mut registry = RoomRegistry::new();
        let r1 = registry.create(10);
        let r2 = registry.create(10);
        assert!(r1 < r2);
        assert_eq!(registry.room_count(), 2);
    }

    #[test]
    fn test_find_waiting_matches_stake_exactly() {
        let mut registry = RoomRegistry::new();
        registry.create(10);
        let r2 = registry.create(25);

        assert_eq!(registry.find_waiting_with_stake(25), Some(r2));
        assert_eq!(registry.find_waiting_with_stake(50), None);
    }

    #[test]
    fn test_find_waiting_prefers_oldest_room() {
        let mut registry = RoomRegistry::new();
        let r1 = registry.create(10);
        registry.create(10);

        assert_eq!(registry.find_waiting_with_stake(10), Some(r1));
    }

    #[test]
    fn test_find_waiting_skips_full_rooms() {
        let mut registry = RoomRegistry::new();
        let r1 = registry.create(10);
        seat(&mut registry, r1, PlayerId(1));
        seat(&mut registry, r1, PlayerId(2));
        let r2 = registry.create(10);

        assert_eq!(registry.find_waiting_with_stake(10), Some(r2));
    }

    #[test]
    fn test_find_waiting_skips_started_rooms() {
        let mut registry = RoomRegistry::new();
        let r1 = registry.create(10);
        registry.find_mut(r1).unwrap().transition(RoomState::Starting);

        assert_eq!(registry.find_waiting_with_stake(10), None);
    }

    #[test]
    fn test_destroy_unseats_players() {
        let mut registry = RoomRegistry::new();
        let r1 = registry.create(10);
        seat(&mut registry, r1, PlayerId(1));

        assert!(registry.is_seated(PlayerId(1)));
        registry.destroy(r1);

        assert!(!registry.is_seated(PlayerId(1)));
        assert!(registry.find(r1).is_none());
        assert_eq!(registry.room_count(), 0);
    }

    #[test]
    fn test_destroy_unknown_room_returns_none() {
        let mut registry = RoomRegistry::new();
        assert!(registry.destroy(RoomId(99)).is_none());
    }

    #[test]
    fn test_room_of_tracks_seating() {
        let mut registry = RoomRegistry::new();
        let r1 = registry.create(10);
        seat(&mut registry, r1, PlayerId(1));

        assert_eq!(registry.room_of(PlayerId(1)), Some(r1));
        registry.unseat_player(PlayerId(1));
        assert_eq!(registry.room_of(PlayerId(1)), None);
    }
}

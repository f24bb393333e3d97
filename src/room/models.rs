use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::membership::ParticipantModel;

/// A single queued item, identified by its URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongModel {
    pub url: String,
}

/// Persistence model for a room document
///
/// `songs` and `guests` keep insertion order; `created_at` drives the
/// insertion-ordered listing in the SQL store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomModel {
    pub id: String, // UUID v4 as string
    pub name: String,
    pub host: ParticipantModel,
    pub songs: Vec<SongModel>,
    pub guests: Vec<ParticipantModel>,
    pub created_at: DateTime<Utc>,
}

impl RoomModel {
    /// Creates a new room model with no songs and no guests
    pub fn new(id: String, name: String, host: ParticipantModel) -> Self {
        Self {
            id,
            name,
            host,
            songs: Vec::new(),
            guests: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Generates a fresh room identifier
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn song_count(&self) -> usize {
        self.songs.len()
    }

    pub fn guest_count(&self) -> usize {
        self.guests.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::Role;

    fn host() -> ParticipantModel {
        ParticipantModel {
            name: "test-host".to_string(),
            role: Role::Admin,
            token: "host-token".to_string(),
        }
    }

    #[test]
    fn test_new_room_starts_empty() {
        let room = RoomModel::new(RoomModel::generate_id(), "Red Rocks".to_string(), host());

        assert_eq!(room.name, "Red Rocks");
        assert_eq!(room.host.role, Role::Admin);
        assert!(room.songs.is_empty());
        assert!(room.guests.is_empty());
    }

    #[test]
    fn test_generated_id_is_uuid_shaped() {
        let id = RoomModel::generate_id();
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_room_round_trips_through_json() {
        let mut room = RoomModel::new(RoomModel::generate_id(), "Red Rocks".to_string(), host());
        room.songs.push(SongModel {
            url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
        });

        let json = serde_json::to_value(&room).unwrap();
        let back: RoomModel = serde_json::from_value(json).unwrap();

        assert_eq!(back.id, room.id);
        assert_eq!(back.song_count(), 1);
        assert_eq!(
            back.songs[0].url,
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }
}

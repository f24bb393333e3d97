use serde::{Deserialize, Serialize};

use super::models::{RoomModel, SongModel};
use crate::membership::{ParticipantModel, Role};

/// Request payload for creating a new room
///
/// The whole body is optional; a room created without one gets the
/// default (empty) name.
#[derive(Debug, Default, Deserialize)]
pub struct RoomCreateRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// Request payload for queueing a song
#[derive(Debug, Deserialize)]
pub struct QueueSongRequest {
    pub url: String,
}

/// Query parameters for the room listing
#[derive(Debug, Default, Deserialize)]
pub struct ListRoomsParams {
    pub page: Option<String>,
}

impl ListRoomsParams {
    /// Resolves the requested page leniently: anything that does not
    /// parse to a positive integer falls back to page 1.
    pub fn resolve_page(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1)
    }
}

/// A participant as returned to the participant themselves (token included)
#[derive(Debug, Serialize, Deserialize)]
pub struct ParticipantResponse {
    pub name: String,
    pub role: Role,
    pub token: String,
}

impl From<&ParticipantModel> for ParticipantResponse {
    fn from(participant: &ParticipantModel) -> Self {
        Self {
            name: participant.name.clone(),
            role: participant.role,
            token: participant.token.clone(),
        }
    }
}

/// A participant as embedded in room views handed to other participants.
/// Tokens never appear here.
#[derive(Debug, Serialize, Deserialize)]
pub struct GuestSummary {
    pub name: String,
    pub role: Role,
}

impl From<&ParticipantModel> for GuestSummary {
    fn from(participant: &ParticipantModel) -> Self {
        Self {
            name: participant.name.clone(),
            role: participant.role,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SongResponse {
    pub url: String,
}

impl From<&SongModel> for SongResponse {
    fn from(song: &SongModel) -> Self {
        Self {
            url: song.url.clone(),
        }
    }
}

/// Response for room creation: the host sees their own token
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomCreatedResponse {
    pub id: String,
    pub name: String,
    pub host: ParticipantResponse,
    pub songs: Vec<SongResponse>,
    pub guests: Vec<GuestSummary>,
}

impl From<&RoomModel> for RoomCreatedResponse {
    fn from(room: &RoomModel) -> Self {
        Self {
            id: room.id.clone(),
            name: room.name.clone(),
            host: ParticipantResponse::from(&room.host),
            songs: room.songs.iter().map(SongResponse::from).collect(),
            guests: room.guests.iter().map(GuestSummary::from).collect(),
        }
    }
}

/// One element of the room listing
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomSummary {
    pub id: String,
    pub name: String,
    pub song_count: usize,
    pub guest_count: usize,
}

impl From<&RoomModel> for RoomSummary {
    fn from(room: &RoomModel) -> Self {
        Self {
            id: room.id.clone(),
            name: room.name.clone(),
            song_count: room.song_count(),
            guest_count: room.guest_count(),
        }
    }
}

/// Room as seen by a participant who is not the host: no tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomView {
    pub id: String,
    pub name: String,
    pub songs: Vec<SongResponse>,
    pub guests: Vec<GuestSummary>,
}

impl From<&RoomModel> for RoomView {
    fn from(room: &RoomModel) -> Self {
        Self {
            id: room.id.clone(),
            name: room.name.clone(),
            songs: room.songs.iter().map(SongResponse::from).collect(),
            guests: room.guests.iter().map(GuestSummary::from).collect(),
        }
    }
}

/// Response for joining a room: the new guest plus the room they joined
#[derive(Debug, Serialize, Deserialize)]
pub struct JoinResponse {
    pub guest: ParticipantResponse,
    pub room: RoomView,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, 1)]
    #[case(Some("1"), 1)]
    #[case(Some("2"), 2)]
    #[case(Some("30"), 30)]
    #[case(Some("x"), 1)]
    #[case(Some(""), 1)]
    #[case(Some("0"), 1)]
    #[case(Some("-3"), 1)]
    #[case(Some("2.5"), 1)]
    #[case(Some(" 2 "), 2)]
    fn test_page_is_parsed_leniently(#[case] raw: Option<&str>, #[case] expected: u64) {
        let params = ListRoomsParams {
            page: raw.map(str::to_string),
        };
        assert_eq!(params.resolve_page(), expected);
    }

    #[test]
    fn test_guest_summary_has_no_token() {
        let participant = ParticipantModel {
            name: "quiet-heron".to_string(),
            role: Role::Guest,
            token: "secret".to_string(),
        };

        let json = serde_json::to_value(GuestSummary::from(&participant)).unwrap();
        assert!(json.get("token").is_none());
        assert_eq!(json["name"], "quiet-heron");
        assert_eq!(json["role"], "GUEST");
    }

    #[test]
    fn test_create_request_tolerates_missing_name() {
        let request: RoomCreateRequest = serde_json::from_str("{}").unwrap();
        assert!(request.name.is_none());

        let request: RoomCreateRequest =
            serde_json::from_str("{\"name\": \"Red Rocks\"}").unwrap();
        assert_eq!(request.name.as_deref(), Some("Red Rocks"));
    }
}

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Role of a participant inside a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Guest,
}

/// A person attached to a room: the host or a guest
///
/// Name and token are server-generated; the token is only ever shown to
/// the participant it was minted for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantModel {
    pub name: String,
    pub role: Role,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_screaming() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(serde_json::to_string(&Role::Guest).unwrap(), "\"GUEST\"");
    }

    #[test]
    fn test_role_display_matches_wire_format() {
        assert_eq!(Role::Admin.to_string(), "ADMIN");
        assert_eq!(Role::Guest.to_string(), "GUEST");
    }

    #[test]
    fn test_participant_round_trip() {
        let participant = ParticipantModel {
            name: "happy-otter".to_string(),
            role: Role::Guest,
            token: "opaque-token".to_string(),
        };

        let json = serde_json::to_string(&participant).unwrap();
        assert!(json.contains("\"GUEST\""));

        let back: ParticipantModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, participant.name);
        assert_eq!(back.role, Role::Guest);
    }
}

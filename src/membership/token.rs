use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, instrument};

use super::models::Role;
use super::types::MembershipClaims;
use crate::shared::AppError;

/// Configuration for JWT token operations
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    pub expiration_days: i64,
}

impl TokenConfig {
    pub fn new() -> Self {
        // Allow configuring expiration via env var, default to 30 days
        let expiration_days = std::env::var("TOKEN_EXPIRATION_DAYS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Self {
            secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            expiration_days,
        }
    }

    /// Creates a new JWT token binding a participant to a room
    #[instrument(skip(self, room_id, participant))]
    pub fn create_token(
        &self,
        room_id: &str,
        participant: &str,
        role: Role,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = (now + Duration::days(self.expiration_days)).timestamp() as usize;

        debug!(
            expiration_days = self.expiration_days,
            exp_timestamp = exp,
            "Creating participant token with expiration"
        );

        let claims = MembershipClaims {
            room_id: room_id.to_string(),
            participant: participant.to_string(),
            role,
            exp,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| {
            debug!(error = %e, "Failed to encode participant token");
            AppError::TokenError(e.to_string())
        })
    }

    /// Validates a token and returns the claims if valid
    #[instrument(skip(self, token))]
    pub fn validate_token(&self, token: &str) -> Result<MembershipClaims, AppError> {
        debug!("Decoding and validating participant token");

        decode::<MembershipClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| {
            debug!(
                participant = %data.claims.participant,
                room_id = %data.claims.room_id,
                exp = data.claims.exp,
                "Participant token decoded successfully"
            );
            data.claims
        })
        .map_err(|e| {
            debug!(error = %e, "Failed to decode participant token");
            AppError::TokenError(e.to_string())
        })
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_validate_token() {
        let config = TokenConfig::new();

        let token = config
            .create_token("room-under-test", "calm-finch", Role::Guest)
            .unwrap();
        assert!(!token.is_empty());

        let claims = config.validate_token(&token).unwrap();
        assert_eq!(claims.room_id, "room-under-test");
        assert_eq!(claims.participant, "calm-finch");
        assert_eq!(claims.role, Role::Guest);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_invalid_token() {
        let config = TokenConfig::new();
        let result = config.validate_token("invalid.token.here");
        assert!(matches!(result, Err(AppError::TokenError(_))));
    }

    #[test]
    fn test_host_token_carries_admin_role() {
        let config = TokenConfig::new();
        let token = config
            .create_token("room-under-test", "brave-moose", Role::Admin)
            .unwrap();

        let claims = config.validate_token(&token).unwrap();
        assert_eq!(claims.role, Role::Admin);
    }
}

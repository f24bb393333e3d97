use async_trait::async_trait;

use super::models::Role;
use super::token::TokenConfig;
use super::types::MembershipClaims;
use crate::shared::AppError;

/// Trait for generating participant display names
#[async_trait]
pub trait NameGenerator: Send + Sync {
    async fn generate(&self) -> String;
}

/// Pet name-based participant name generator
pub struct PetNameGenerator;

impl PetNameGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PetNameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NameGenerator for PetNameGenerator {
    async fn generate(&self) -> String {
        petname::Petnames::default().generate_one(2, "-")
    }
}

/// Trait for minting and checking participant access tokens
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, room_id: &str, participant: &str, role: Role) -> Result<String, AppError>;
    fn validate(&self, token: &str) -> Result<MembershipClaims, AppError>;
}

/// JWT-backed token issuer
pub struct JwtTokenIssuer {
    config: TokenConfig,
}

impl JwtTokenIssuer {
    pub fn new() -> Self {
        Self {
            config: TokenConfig::new(),
        }
    }
}

impl Default for JwtTokenIssuer {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, room_id: &str, participant: &str, role: Role) -> Result<String, AppError> {
        self.config.create_token(room_id, participant, role)
    }

    fn validate(&self, token: &str) -> Result<MembershipClaims, AppError> {
        self.config.validate_token(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_petname_generator() {
        let generator = PetNameGenerator::new();
        let name1 = generator.generate().await;
        let name2 = generator.generate().await;

        // Should generate non-empty names with dashes
        assert!(!name1.is_empty());
        assert!(name1.contains('-'));
        assert!(!name2.is_empty());
        assert!(name2.contains('-'));

        let parts1: Vec<&str> = name1.split('-').collect();
        assert_eq!(parts1.len(), 2);
    }

    #[test]
    fn test_jwt_issuer_round_trip() {
        let issuer = JwtTokenIssuer::new();
        let token = issuer
            .issue("some-room", "witty-crane", Role::Guest)
            .unwrap();

        let claims = issuer.validate(&token).unwrap();
        assert_eq!(claims.room_id, "some-room");
        assert_eq!(claims.participant, "witty-crane");
    }
}

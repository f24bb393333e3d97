use std::sync::Arc;
use tracing::{info, instrument};

use super::generators::{NameGenerator, TokenIssuer};
use super::models::{ParticipantModel, Role};
use super::types::MembershipClaims;
use crate::shared::AppError;

/// Mints participant records for rooms
///
/// Combines a name generator and a token issuer so handlers never deal
/// with either capability directly.
pub struct MembershipIssuer {
    name_generator: Arc<dyn NameGenerator>,
    token_issuer: Arc<dyn TokenIssuer>,
}

impl MembershipIssuer {
    pub fn new(name_generator: Arc<dyn NameGenerator>, token_issuer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            name_generator,
            token_issuer,
        }
    }

    /// Creates a participant with a generated name and a token bound to the room
    #[instrument(skip(self))]
    pub async fn issue(&self, room_id: &str, role: Role) -> Result<ParticipantModel, AppError> {
        let name = self.name_generator.generate().await;
        let token = self.token_issuer.issue(room_id, &name, role)?;

        info!(
            room_id = %room_id,
            participant = %name,
            role = %role,
            "Issued participant"
        );

        Ok(ParticipantModel { name, role, token })
    }

    /// Checks that a token belongs to a participant of the given room
    #[instrument(skip(self, token))]
    pub fn authorize(&self, token: &str, room_id: &str) -> Result<MembershipClaims, AppError> {
        let claims = self.token_issuer.validate(token)?;

        if claims.room_id != room_id {
            return Err(AppError::Unauthorized(
                "Token was issued for another room".to_string(),
            ));
        }

        Ok(claims)
    }
}

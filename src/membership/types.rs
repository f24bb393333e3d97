use serde::{Deserialize, Serialize};

use super::models::Role;

/// JWT claims carried by a participant token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MembershipClaims {
    pub room_id: String,
    pub participant: String,
    pub role: Role,
    pub exp: usize, // Expiration timestamp (standard JWT claim)
    pub iat: usize, // Issued at timestamp (standard JWT claim)
}

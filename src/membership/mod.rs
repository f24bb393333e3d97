// Public API - what other modules can use
pub use issuer::MembershipIssuer;
pub use models::{ParticipantModel, Role};
pub use types::MembershipClaims;

// Internal modules
pub mod generators;
mod issuer;
pub mod models;
pub mod token;
mod types;

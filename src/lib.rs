// Library crate for the song room server
// This file exposes the public API for integration tests

pub mod membership;
pub mod room;
pub mod shared;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

// Re-export commonly used types for easier access in tests
pub use membership::{MembershipIssuer, ParticipantModel, Role};
pub use room::{models::RoomModel, repository::RoomRepository};
pub use shared::{AppError, AppState};

/// Builds the application router over the given state
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/room", post(room::create_room).get(room::list_rooms))
        .route("/room/:room_id/songs", post(room::queue_song))
        .route("/join/:room_id", get(room::join_room))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

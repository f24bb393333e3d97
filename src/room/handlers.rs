use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    service::RoomService,
    types::{
        JoinResponse, ListRoomsParams, QueueSongRequest, RoomCreateRequest, RoomCreatedResponse,
        RoomSummary, RoomView,
    },
};
use crate::shared::{AppError, AppState};

fn service(state: &AppState) -> RoomService {
    RoomService::new(
        Arc::clone(&state.room_repository),
        Arc::clone(&state.membership),
    )
}

/// Extracts the bearer token from the Authorization header
fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing Authorization header in request");
            AppError::Unauthorized("Missing authorization header".to_string())
        })?;

    auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Invalid Authorization header format (expected Bearer token)");
        AppError::Unauthorized("Invalid authorization header format".to_string())
    })
}

/// HTTP handler for creating a new room
///
/// POST /room
/// The body is optional; returns the room with its freshly minted host.
#[instrument(name = "create_room", skip(state, request))]
pub async fn create_room(
    State(state): State<AppState>,
    request: Option<Json<RoomCreateRequest>>,
) -> Result<Json<RoomCreatedResponse>, AppError> {
    info!("Creating new room");

    let request = request.map(|Json(r)| r).unwrap_or_default();
    let room = service(&state).create_room(request).await?;

    info!(room_id = %room.id, host = %room.host.name, "Room created successfully");

    Ok(Json(room))
}

/// HTTP handler for listing rooms
///
/// GET /room?page=N
/// Returns one insertion-ordered page; a malformed page falls back to 1.
#[instrument(name = "list_rooms", skip(state))]
pub async fn list_rooms(
    State(state): State<AppState>,
    Query(params): Query<ListRoomsParams>,
) -> Result<Json<Vec<RoomSummary>>, AppError> {
    info!(page = ?params.page, "Listing rooms");

    let rooms = service(&state).list_rooms(params).await?;

    info!(room_count = rooms.len(), "Rooms listed successfully");

    Ok(Json(rooms))
}

/// HTTP handler for joining a room as a guest
///
/// GET /join/{room_id}
/// Returns the new guest (with their token) and the joined room.
#[instrument(name = "join_room", skip(state))]
pub async fn join_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<JoinResponse>, AppError> {
    info!(room_id = %room_id, "Joining room");

    let response = service(&state).join_room(&room_id).await?;

    info!(
        room_id = %room_id,
        guest = %response.guest.name,
        "Guest joined room successfully"
    );

    Ok(Json(response))
}

/// HTTP handler for queueing a song
///
/// POST /room/{room_id}/songs
/// Requires a bearer token issued for this room.
#[instrument(name = "queue_song", skip(state, headers, request))]
pub async fn queue_song(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<QueueSongRequest>,
) -> Result<Json<RoomView>, AppError> {
    info!(room_id = %room_id, "Queueing song");

    let token = bearer_token(&headers)?;
    let room = service(&state).queue_song(&room_id, token, request).await?;

    info!(
        room_id = %room_id,
        song_count = room.songs.len(),
        "Song queued successfully"
    );

    Ok(Json(room))
}

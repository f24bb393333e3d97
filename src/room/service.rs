use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::models::{RoomModel, SongModel};
use super::repository::{JoinRoomResult, QueueSongResult, RoomRepository};
use super::types::{
    JoinResponse, ListRoomsParams, ParticipantResponse, QueueSongRequest, RoomCreateRequest,
    RoomCreatedResponse, RoomSummary, RoomView,
};
use crate::membership::{MembershipIssuer, Role};
use crate::shared::AppError;

/// Rooms per listing page
pub const PAGE_SIZE: u64 = 30;

/// Service for room business logic
pub struct RoomService {
    repository: Arc<dyn RoomRepository + Send + Sync>,
    membership: Arc<MembershipIssuer>,
}

impl RoomService {
    pub fn new(
        repository: Arc<dyn RoomRepository + Send + Sync>,
        membership: Arc<MembershipIssuer>,
    ) -> Self {
        Self {
            repository,
            membership,
        }
    }

    /// Creates a new room with a generated id and a freshly minted host
    #[instrument(skip(self, request))]
    pub async fn create_room(
        &self,
        request: RoomCreateRequest,
    ) -> Result<RoomCreatedResponse, AppError> {
        let room_id = RoomModel::generate_id();
        let host = self.membership.issue(&room_id, Role::Admin).await?;

        let name = request.name.unwrap_or_default();
        let room = RoomModel::new(room_id, name, host);

        self.repository.create_room(&room).await?;

        info!(
            room_id = %room.id,
            name = %room.name,
            host = %room.host.name,
            "Room created successfully"
        );

        Ok(RoomCreatedResponse::from(&room))
    }

    /// Lists one page of rooms in insertion order
    #[instrument(skip(self))]
    pub async fn list_rooms(&self, params: ListRoomsParams) -> Result<Vec<RoomSummary>, AppError> {
        let page = params.resolve_page();
        debug!(page, "Listing rooms");

        let rooms = self.repository.list_rooms_page(page, PAGE_SIZE).await?;

        info!(page, room_count = rooms.len(), "Rooms listed successfully");

        Ok(rooms.iter().map(RoomSummary::from).collect())
    }

    /// Joins an existing room as a new guest
    ///
    /// The guest is minted first and appended atomically, so the returned
    /// room view already contains them.
    #[instrument(skip(self))]
    pub async fn join_room(&self, room_id: &str) -> Result<JoinResponse, AppError> {
        info!(room_id = %room_id, "Attempting to join room");

        let guest = self.membership.issue(room_id, Role::Guest).await?;

        match self.repository.add_guest(room_id, &guest).await? {
            JoinRoomResult::Success(room) => {
                info!(
                    room_id = %room_id,
                    guest = %guest.name,
                    guest_count = room.guest_count(),
                    "Guest joined room successfully"
                );

                Ok(JoinResponse {
                    guest: ParticipantResponse::from(&guest),
                    room: RoomView::from(&room),
                })
            }
            JoinRoomResult::RoomNotFound => Err(AppError::RoomNotFound(room_id.to_string())),
        }
    }

    /// Appends a song to a room's queue on behalf of one of its participants
    #[instrument(skip(self, token, request))]
    pub async fn queue_song(
        &self,
        room_id: &str,
        token: &str,
        request: QueueSongRequest,
    ) -> Result<RoomView, AppError> {
        let claims = self.membership.authorize(token, room_id)?;
        debug!(
            room_id = %room_id,
            participant = %claims.participant,
            "Participant authorized to queue song"
        );

        let song = SongModel { url: request.url };

        match self.repository.add_song(room_id, &song).await? {
            QueueSongResult::Success(room) => {
                info!(
                    room_id = %room_id,
                    participant = %claims.participant,
                    song_count = room.song_count(),
                    "Song queued successfully"
                );
                Ok(RoomView::from(&room))
            }
            QueueSongResult::RoomNotFound => Err(AppError::RoomNotFound(room_id.to_string())),
        }
    }
}

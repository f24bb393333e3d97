use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::models::{RoomModel, SongModel};
use crate::membership::ParticipantModel;
use crate::shared::AppError;

/// Result of attempting to join a room
#[derive(Debug, Clone)]
pub enum JoinRoomResult {
    /// Successfully joined the room, returns updated room data
    Success(RoomModel),
    /// Room does not exist
    RoomNotFound,
}

/// Result of attempting to queue a song
#[derive(Debug, Clone)]
pub enum QueueSongResult {
    /// Song was appended to the queue, returns updated room data
    Success(RoomModel),
    /// Room does not exist
    RoomNotFound,
}

/// Trait for room repository operations
#[async_trait]
pub trait RoomRepository {
    async fn create_room(&self, room: &RoomModel) -> Result<(), AppError>;
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError>;

    /// Returns one page of rooms in insertion order (first created first).
    /// `page` is 1-based.
    async fn list_rooms_page(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<Vec<RoomModel>, AppError>;

    /// Atomically appends a guest to the room's guest list
    /// This prevents race conditions when multiple guests join simultaneously
    async fn add_guest(
        &self,
        room_id: &str,
        guest: &ParticipantModel,
    ) -> Result<JoinRoomResult, AppError>;

    /// Atomically appends a song to the room's queue
    async fn add_song(
        &self,
        room_id: &str,
        song: &SongModel,
    ) -> Result<QueueSongResult, AppError>;
}

/// In-memory implementation of RoomRepository for development and testing
///
/// Rooms are kept in a Vec so listing order is insertion order by
/// construction, matching the ordering the SQL store gets from created_at.
pub struct InMemoryRoomRepository {
    rooms: Mutex<Vec<RoomModel>>,
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(Vec::new()),
        }
    }

    /// Returns the current number of rooms in the repository
    pub fn room_count(&self) -> usize {
        self.rooms.lock().unwrap().len()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    #[instrument(skip(self, room))]
    async fn create_room(&self, room: &RoomModel) -> Result<(), AppError> {
        debug!(room_id = %room.id, name = %room.name, "Creating room in memory");

        let mut rooms = self.rooms.lock().unwrap();
        if rooms.iter().any(|r| r.id == room.id) {
            warn!(room_id = %room.id, "Room already exists in memory");
            return Err(AppError::DatabaseError("Room already exists".to_string()));
        }
        rooms.push(room.clone());

        debug!(room_id = %room.id, "Room created successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError> {
        debug!(room_id = %room_id, "Fetching room from memory");

        let rooms = self.rooms.lock().unwrap();
        let room = rooms.iter().find(|r| r.id == room_id).cloned();

        match &room {
            Some(r) => debug!(room_id = %room_id, name = %r.name, "Room found in memory"),
            None => debug!(room_id = %room_id, "Room not found in memory"),
        }

        Ok(room)
    }

    #[instrument(skip(self))]
    async fn list_rooms_page(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<Vec<RoomModel>, AppError> {
        debug!(page, page_size, "Listing rooms page from memory");

        let rooms = self.rooms.lock().unwrap();
        let offset = page.saturating_sub(1).saturating_mul(page_size) as usize;
        let room_list = rooms
            .iter()
            .skip(offset)
            .take(page_size as usize)
            .cloned()
            .collect();

        Ok(room_list)
    }

    #[instrument(skip(self, guest))]
    async fn add_guest(
        &self,
        room_id: &str,
        guest: &ParticipantModel,
    ) -> Result<JoinRoomResult, AppError> {
        debug!(room_id = %room_id, guest = %guest.name, "Attempting to add guest atomically");

        let mut rooms = self.rooms.lock().unwrap();

        let room = match rooms.iter_mut().find(|r| r.id == room_id) {
            Some(room) => room,
            None => {
                debug!(room_id = %room_id, "Room not found");
                return Ok(JoinRoomResult::RoomNotFound);
            }
        };

        room.guests.push(guest.clone());
        let updated_room = room.clone();

        info!(
            room_id = %room_id,
            guest = %guest.name,
            guest_count = updated_room.guest_count(),
            "Guest joined room successfully (atomic)"
        );

        Ok(JoinRoomResult::Success(updated_room))
    }

    #[instrument(skip(self, song))]
    async fn add_song(
        &self,
        room_id: &str,
        song: &SongModel,
    ) -> Result<QueueSongResult, AppError> {
        debug!(room_id = %room_id, url = %song.url, "Attempting to queue song atomically");

        let mut rooms = self.rooms.lock().unwrap();

        let room = match rooms.iter_mut().find(|r| r.id == room_id) {
            Some(room) => room,
            None => {
                debug!(room_id = %room_id, "Room not found");
                return Ok(QueueSongResult::RoomNotFound);
            }
        };

        room.songs.push(song.clone());
        let updated_room = room.clone();

        info!(
            room_id = %room_id,
            url = %song.url,
            song_count = updated_room.song_count(),
            "Song queued successfully (atomic)"
        );

        Ok(QueueSongResult::Success(updated_room))
    }
}

/// PostgreSQL implementation of the room repository
///
/// Each room is stored as a single JSONB document per row; created_at is
/// duplicated into its own column for the insertion-ordered listing.
pub struct PostgresRoomRepository {
    pool: PgPool,
}

impl PostgresRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn decode_room(doc: serde_json::Value) -> Result<RoomModel, AppError> {
        serde_json::from_value(doc).map_err(|e| {
            warn!(error = %e, "Failed to decode room document");
            AppError::DatabaseError(e.to_string())
        })
    }
}

#[async_trait]
impl RoomRepository for PostgresRoomRepository {
    #[instrument(skip(self, room))]
    async fn create_room(&self, room: &RoomModel) -> Result<(), AppError> {
        debug!(room_id = %room.id, name = %room.name, "Creating room in database");

        let doc = serde_json::to_value(room)
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        sqlx::query("INSERT INTO rooms (id, doc, created_at) VALUES ($1, $2, $3)")
            .bind(&room.id)
            .bind(doc)
            .bind(room.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to create room in database");
                AppError::DatabaseError(e.to_string())
            })?;

        debug!(room_id = %room.id, "Room created successfully in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError> {
        debug!(room_id = %room_id, "Fetching room from database");

        let row = sqlx::query("SELECT doc FROM rooms WHERE id = $1")
            .bind(room_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, room_id = %room_id, "Failed to fetch room from database");
                AppError::DatabaseError(e.to_string())
            })?;

        match row {
            Some(row) => {
                let room = Self::decode_room(row.get("doc"))?;
                debug!(room_id = %room_id, name = %room.name, "Room found in database");
                Ok(Some(room))
            }
            None => {
                debug!(room_id = %room_id, "Room not found in database");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self))]
    async fn list_rooms_page(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<Vec<RoomModel>, AppError> {
        debug!(page, page_size, "Listing rooms page from database");

        let offset = page.saturating_sub(1).saturating_mul(page_size);

        let rows =
            sqlx::query("SELECT doc FROM rooms ORDER BY created_at ASC LIMIT $1 OFFSET $2")
                .bind(page_size as i64)
                .bind(offset as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    warn!(error = %e, "Failed to list rooms from database");
                    AppError::DatabaseError(e.to_string())
                })?;

        rows.into_iter()
            .map(|row| Self::decode_room(row.get("doc")))
            .collect()
    }

    #[instrument(skip(self, guest))]
    async fn add_guest(
        &self,
        room_id: &str,
        guest: &ParticipantModel,
    ) -> Result<JoinRoomResult, AppError> {
        debug!(room_id = %room_id, guest = %guest.name, "Appending guest in database");

        let guest_doc = serde_json::to_value(guest)
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        // Single UPDATE so concurrent joins both land
        let row = sqlx::query(
            "UPDATE rooms SET doc = jsonb_set(doc, '{guests}', (doc->'guests') || $2::jsonb) \
             WHERE id = $1 RETURNING doc",
        )
        .bind(room_id)
        .bind(guest_doc)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, room_id = %room_id, "Failed to append guest in database");
            AppError::DatabaseError(e.to_string())
        })?;

        match row {
            Some(row) => {
                let room = Self::decode_room(row.get("doc"))?;
                info!(
                    room_id = %room_id,
                    guest = %guest.name,
                    guest_count = room.guest_count(),
                    "Guest joined room successfully (atomic)"
                );
                Ok(JoinRoomResult::Success(room))
            }
            None => Ok(JoinRoomResult::RoomNotFound),
        }
    }

    #[instrument(skip(self, song))]
    async fn add_song(
        &self,
        room_id: &str,
        song: &SongModel,
    ) -> Result<QueueSongResult, AppError> {
        debug!(room_id = %room_id, url = %song.url, "Appending song in database");

        let song_doc = serde_json::to_value(song)
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let row = sqlx::query(
            "UPDATE rooms SET doc = jsonb_set(doc, '{songs}', (doc->'songs') || $2::jsonb) \
             WHERE id = $1 RETURNING doc",
        )
        .bind(room_id)
        .bind(song_doc)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, room_id = %room_id, "Failed to append song in database");
            AppError::DatabaseError(e.to_string())
        })?;

        match row {
            Some(row) => {
                let room = Self::decode_room(row.get("doc"))?;
                info!(
                    room_id = %room_id,
                    url = %song.url,
                    song_count = room.song_count(),
                    "Song queued successfully (atomic)"
                );
                Ok(QueueSongResult::Success(room))
            }
            None => Ok(QueueSongResult::RoomNotFound),
        }
    }
}

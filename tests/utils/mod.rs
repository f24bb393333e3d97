use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt; // for `oneshot`

use songroom::membership::generators::{JwtTokenIssuer, PetNameGenerator};
use songroom::membership::{MembershipIssuer, ParticipantModel, Role};
use songroom::room::models::{RoomModel, SongModel};
use songroom::room::repository::{InMemoryRoomRepository, RoomRepository};
use songroom::shared::AppState;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

/// One isolated application per test: each test gets its own router and
/// in-memory repository, so tests never share state and need no teardown.
pub struct TestApp {
    pub router: Router,
    pub repository: Arc<InMemoryRoomRepository>,
}

impl TestApp {
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryRoomRepository::new());
        let membership = Arc::new(MembershipIssuer::new(
            Arc::new(PetNameGenerator::new()),
            Arc::new(JwtTokenIssuer::new()),
        ));

        let state = AppState::new(repository.clone(), membership);

        Self {
            router: songroom::app(state),
            repository,
        }
    }

    /// Seeds a room directly through the repository, bypassing the API
    pub async fn store_room(&self, name: &str) -> RoomModel {
        self.store_room_with_songs(name, &[]).await
    }

    pub async fn store_room_with_songs(&self, name: &str, urls: &[&str]) -> RoomModel {
        let host = ParticipantModel {
            name: "seeded-host".to_string(),
            role: Role::Admin,
            token: "seeded-host-token".to_string(),
        };

        let mut room = RoomModel::new(RoomModel::generate_id(), name.to_string(), host);
        for url in urls {
            room.songs.push(SongModel {
                url: url.to_string(),
            });
        }

        self.repository.create_room(&room).await.unwrap();
        room
    }

    pub async fn store_rooms(&self, number_of_rooms: usize) {
        for i in 0..number_of_rooms {
            self.store_room(&i.to_string()).await;
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        body: serde_json::Value,
        bearer: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = bearer {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

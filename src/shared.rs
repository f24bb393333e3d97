use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::membership::MembershipIssuer;
use crate::room::repository::RoomRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub room_repository: Arc<dyn RoomRepository + Send + Sync>,
    pub membership: Arc<MembershipIssuer>,
}

impl AppState {
    pub fn new(
        room_repository: Arc<dyn RoomRepository + Send + Sync>,
        membership: Arc<MembershipIssuer>,
    ) -> Self {
        Self {
            room_repository,
            membership,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("The room {0} does not exist.")]
    RoomNotFound(String),

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title) = match self {
            AppError::RoomNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("The room {} does not exist.", id),
            ),
            AppError::TokenError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        // Every error renders as a problem document
        let body = Json(json!({
            "status": status.as_u16(),
            "title": title,
        }));

        (status, body).into_response()
    }
}

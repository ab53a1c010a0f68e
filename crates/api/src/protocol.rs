//! Wire protocol types
//!
//! Request and response bodies as the backend speaks them (camelCase JSON).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hearth_core::models::{
    Board, BoardRole, InvitationDecision, Rating, UserSummary,
};

/// `POST /api/auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}

/// `GET /api/boards`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardsResponse {
    pub boards: Vec<Board>,
    #[serde(default)]
    pub shared_boards: Vec<Board>,
}

/// `POST /api/properties/{id}/move` and `.../copy`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetBoardRequest {
    pub target_board_id: Uuid,
}

/// `POST /api/properties/{id}/rating`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingRequest {
    pub rating: Rating,
}

/// `POST /api/boards/{id}/properties` (scrape-and-extract from a URL)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
}

/// `POST /api/boards/{id}/invite`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteRequest {
    pub email: String,
    pub role: BoardRole,
}

/// `PUT /api/boards/{id}/invitation`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationStatusRequest {
    pub status: InvitationDecision,
}

/// Error payload the backend attaches to non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

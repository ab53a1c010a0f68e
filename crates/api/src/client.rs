//! HTTP client for the Hearth backend

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use hearth_core::models::{
    BoardRole, BoardSets, Coordinates, Invitation, InvitationDecision, PriceHistoryEntry,
    Property, PropertyUpdate, Rating, UserSummary,
};
use hearth_core::{AppConfig, Error, Result};

use crate::backend::Backend;
use crate::protocol::{
    BoardsResponse, ErrorBody, InvitationStatusRequest, InviteRequest, LoginRequest,
    LoginResponse, RatingRequest, ScrapeRequest, TargetBoardRequest,
};

/// Bearer-token HTTP client
///
/// The token is interior-mutable: the session layer arms it after login or
/// restore and clears it on logout, while components hold shared references.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Mutex<Option<String>>,
}

impl ApiClient {
    /// Build a client from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| Error::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: Mutex::new(None),
        })
    }

    /// Build a client against a specific base URL with default settings
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::new(&AppConfig {
            api_base_url: base_url.into(),
            ..AppConfig::default()
        })
    }

    /// Whether a bearer token is currently armed
    pub fn has_token(&self) -> bool {
        self.token.lock().unwrap().is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request with auth attached; uniform status handling.
    ///
    /// A 401 from any endpoint is session expiry; other non-2xx responses
    /// carry the backend's `{message}` body when it provides one.
    async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let token = self.token.lock().unwrap().clone();
        let builder = match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| Error::network(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.as_u16() == 401 {
            warn!("Received 401, treating as session expiry");
            return Err(Error::Auth);
        }
        if !status.is_success() {
            let message = response.json::<ErrorBody>().await.unwrap_or_default().message;
            return Err(error_for_status(status.as_u16(), message));
        }

        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.execute(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| Error::network(format!("Invalid response body: {}", e)))
    }

    async fn fetch_unit(&self, builder: RequestBuilder) -> Result<()> {
        self.execute(builder).await?;
        Ok(())
    }
}

/// Map a non-401 error status to the network error surfaced to the user
fn error_for_status(status: u16, message: Option<String>) -> Error {
    Error::Network {
        status: Some(status),
        message: message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_default(),
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<(String, UserSummary)> {
        debug!(email = %email, "Logging in");
        let response: LoginResponse = self
            .fetch(self.http.post(self.url("/api/auth/login")).json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            }))
            .await?;
        Ok((response.token, response.user))
    }

    fn set_token(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }

    async fn boards(&self) -> Result<BoardSets> {
        let response: BoardsResponse = self.fetch(self.http.get(self.url("/api/boards"))).await?;
        Ok(BoardSets {
            owned: response.boards,
            shared: response.shared_boards,
        })
    }

    async fn board_properties(&self, board_id: Uuid) -> Result<Vec<Property>> {
        self.fetch(
            self.http
                .get(self.url(&format!("/api/boards/{}/properties", board_id))),
        )
        .await
    }

    async fn create_from_url(&self, board_id: Uuid, url: &str) -> Result<Property> {
        self.fetch(
            self.http
                .post(self.url(&format!("/api/boards/{}/properties", board_id)))
                .json(&ScrapeRequest {
                    url: url.to_string(),
                }),
        )
        .await
    }

    async fn update_property(&self, id: Uuid, update: &PropertyUpdate) -> Result<Property> {
        self.fetch(
            self.http
                .put(self.url(&format!("/api/properties/{}", id)))
                .json(update),
        )
        .await
    }

    async fn delete_property(&self, id: Uuid) -> Result<()> {
        self.fetch_unit(self.http.delete(self.url(&format!("/api/properties/{}", id))))
            .await
    }

    async fn move_property(&self, id: Uuid, target_board_id: Uuid) -> Result<Property> {
        self.fetch(
            self.http
                .post(self.url(&format!("/api/properties/{}/move", id)))
                .json(&TargetBoardRequest { target_board_id }),
        )
        .await
    }

    async fn copy_property(&self, id: Uuid, target_board_id: Uuid) -> Result<Property> {
        self.fetch(
            self.http
                .post(self.url(&format!("/api/properties/{}/copy", id)))
                .json(&TargetBoardRequest { target_board_id }),
        )
        .await
    }

    async fn rate_property(&self, id: Uuid, rating: Rating) -> Result<Property> {
        self.fetch(
            self.http
                .post(self.url(&format!("/api/properties/{}/rating", id)))
                .json(&RatingRequest { rating }),
        )
        .await
    }

    async fn refresh_property(&self, id: Uuid) -> Result<Property> {
        self.fetch(
            self.http
                .post(self.url(&format!("/api/properties/{}/refresh", id))),
        )
        .await
    }

    async fn invite(&self, board_id: Uuid, email: &str, role: BoardRole) -> Result<()> {
        self.fetch_unit(
            self.http
                .post(self.url(&format!("/api/boards/{}/invite", board_id)))
                .json(&InviteRequest {
                    email: email.to_string(),
                    role,
                }),
        )
        .await
    }

    async fn invitations(&self) -> Result<Vec<Invitation>> {
        self.fetch(self.http.get(self.url("/api/invitations"))).await
    }

    async fn resolve_invitation(
        &self,
        board_id: Uuid,
        decision: InvitationDecision,
    ) -> Result<()> {
        self.fetch_unit(
            self.http
                .put(self.url(&format!("/api/boards/{}/invitation", board_id)))
                .json(&InvitationStatusRequest { status: decision }),
        )
        .await
    }

    async fn price_history(&self, property_id: Uuid) -> Result<Vec<PriceHistoryEntry>> {
        self.fetch(
            self.http
                .get(self.url(&format!("/api/properties/{}/price-history", property_id))),
        )
        .await
    }

    async fn geocode(&self, address: &str) -> Result<Coordinates> {
        let result: Result<Coordinates> = self
            .fetch(
                self.http
                    .get(self.url("/api/geocode"))
                    .query(&[("address", address)]),
            )
            .await;

        // Lookup failures keep their message but must not read as hard
        // network errors; they never block form submission.
        result.map_err(|e| match e {
            Error::Auth => Error::Auth,
            Error::Network { message, .. } if !message.trim().is_empty() => Error::Geocode(message),
            Error::Network { .. } => {
                Error::Geocode("Address could not be resolved".to_string())
            }
            other => other,
        })
    }
}

//! HTTP client for the Skillshare API, used by the CLI subcommands.
//!
//! Configuration is via environment variables:
//! - `SKILLSHARE_URL` - Base URL (default: `http://localhost:3000/api/v1`)
//! - `SKILLSHARE_API_KEY` - API key for authentication (optional for local)

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use crate::api::ACTOR_HEADER;
use crate::models::*;

/// Default URL for local development.
const DEFAULT_URL: &str = "http://localhost:3000/api/v1";

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: API key or user id missing or invalid")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Server error: {0}")]
    Server(String),
}

/// HTTP client acting on behalf of one user.
#[derive(Debug, Clone)]
pub struct SkillshareClient {
    base_url: String,
    api_key: Option<String>,
    user_id: Option<Uuid>,
    client: Client,
}

impl SkillshareClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("SKILLSHARE_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        let api_key = std::env::var("SKILLSHARE_API_KEY").ok();
        Self::new(base_url, api_key)
    }

    /// Create with explicit configuration.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            user_id: None,
            client: Client::new(),
        }
    }

    /// Act as `user_id` for subsequent calls.
    pub fn acting_as(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Build a request with optional auth and identity headers.
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }
        if let Some(user_id) = self.user_id {
            req = req.header(ACTOR_HEADER, user_id.to_string());
        }
        req
    }

    async fn error_for(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(body),
            StatusCode::BAD_REQUEST => ClientError::BadRequest(body),
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(body),
            _ => ClientError::Server(format!("{}: {}", status, body)),
        }
    }

    /// Handle response, converting HTTP errors to ClientError.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::error_for(response).await)
        }
    }

    /// Handle response that may return empty body (204 No Content).
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), ClientError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_for(response).await)
        }
    }

    pub async fn health(&self) -> Result<serde_json::Value, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/health")
            .send()
            .await?;
        self.handle_response(response).await
    }

    // ============================================================
    // Social graph
    // ============================================================

    pub async fn follow(&self, user_id: Uuid) -> Result<Interaction<FollowResult>, ClientError> {
        let response = self
            .request(reqwest::Method::POST, &format!("/users/{}/follow", user_id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub async fn unfollow(&self, user_id: Uuid) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/users/{}/follow", user_id))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    pub async fn feed(&self, page: PageRequest) -> Result<Page<Post>, ClientError> {
        let response = self
            .request(
                reqwest::Method::GET,
                &format!("/posts/feed?page={}&size={}", page.page, page.size),
            )
            .send()
            .await?;
        self.handle_response(response).await
    }

    // ============================================================
    // Notifications
    // ============================================================

    pub async fn notifications(
        &self,
        page: PageRequest,
    ) -> Result<Page<Notification>, ClientError> {
        let response = self
            .request(
                reqwest::Method::GET,
                &format!("/notifications?page={}&size={}", page.page, page.size),
            )
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub async fn unread_count(&self) -> Result<i64, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/notifications/unread-count")
            .send()
            .await?;
        let count: UnreadCount = self.handle_response(response).await?;
        Ok(count.count)
    }

    pub async fn mark_all_read(&self) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/notifications/mark-all-read")
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    pub async fn clear_read(&self) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::DELETE, "/notifications/clear-read")
            .send()
            .await?;
        self.handle_empty_response(response).await
    }
}

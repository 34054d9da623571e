//! Remote API clients
//!
//! This module provides the HTTP plumbing shared by the auth, notes and
//! labels clients: client construction, bearer-token attachment from the
//! session store, and mapping of non-success responses onto typed errors.

pub mod auth;
pub mod labels;
pub mod notes;

pub use auth::AuthClient;
pub use labels::LabelsClient;
pub use notes::NotesClient;

use crate::config::{ApiConfig, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::{AppError, Result};
use crate::services::SessionStore;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Error payload the server attaches to non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Shared transport for one API endpoint
#[derive(Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl Transport {
    pub(crate) fn new(config: &ApiConfig, session: SessionStore) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub(crate) fn session(&self) -> &SessionStore {
        &self.session
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.http.put(self.url(path))
    }

    pub(crate) fn patch(&self, path: &str) -> RequestBuilder {
        self.http.patch(self.url(path))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.http.delete(self.url(path))
    }

    /// Attach the bearer token when one is held. A missing token is not an
    /// error here; the server answers 401 and that is surfaced as
    /// `Unauthenticated`.
    pub(crate) async fn authorize(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match self.session.token().await? {
            Some(token) => Ok(req.bearer_auth(token)),
            None => Ok(req),
        }
    }

    /// Send an authenticated request and decode a JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let response = self.authorize(req).await?.send().await?;
        expect_json(response).await
    }

    /// Send an authenticated request expecting an empty success body
    pub(crate) async fn send_no_content(&self, req: RequestBuilder) -> Result<()> {
        let response = self.authorize(req).await?.send().await?;
        expect_success(response).await?;
        Ok(())
    }
}

/// Decode a 2xx JSON body, otherwise map the status onto a typed error
pub(crate) async fn expect_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = expect_success(response).await?;
    Ok(response.json().await?)
}

/// Pass 2xx responses through, map everything else onto a typed error
pub(crate) async fn expect_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = error_message(response).await;
    tracing::debug!("API call failed: {} {}", status, message);

    Err(match status {
        StatusCode::BAD_REQUEST => AppError::ValidationFailed(message),
        StatusCode::UNAUTHORIZED => AppError::Unauthenticated,
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        _ => AppError::Server {
            status: status.as_u16(),
            message,
        },
    })
}

/// Pull the server's message out of an error response body, falling back
/// to the raw text and then to a generic message
async fn error_message(response: Response) -> String {
    let raw = response.text().await.unwrap_or_default();

    if let Ok(body) = serde_json::from_str::<ErrorBody>(&raw) {
        if let Some(msg) = body.error.or(body.message) {
            return msg;
        }
    }

    if raw.is_empty() {
        "request failed".to_string()
    } else {
        raw
    }
}

//! Notes client
//!
//! Translates note operations into authenticated calls against the
//! remote note store. Field bounds and color tokens are checked before a
//! request body is serialized; the server remains the source of truth.

use super::Transport;
use crate::config::{
    is_valid_color, ApiConfig, DEFAULT_SEARCH_LIMIT, MAX_CONTENT_LEN, MAX_QUERY_LEN,
    MAX_SEARCH_LIMIT, MAX_TITLE_LEN,
};
use crate::error::{AppError, Result};
use crate::models::{CreateNoteRequest, Note, UpdateNoteRequest};
use crate::services::SessionStore;
use serde_json::json;

/// Client for the `/notes` endpoints
#[derive(Clone)]
pub struct NotesClient {
    transport: Transport,
}

impl NotesClient {
    pub fn new(config: &ApiConfig, session: SessionStore) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config, session)?,
        })
    }

    /// List the caller's notes in server order. Archived and trashed
    /// notes are excluded unless explicitly requested.
    pub async fn list(&self, include_archived: bool, include_deleted: bool) -> Result<Vec<Note>> {
        let req = self.transport.get("/notes").query(&[
            ("archived", include_archived),
            ("deleted", include_deleted),
        ]);

        self.transport.send_json(req).await
    }

    /// Create a note; the server assigns id and timestamps
    pub async fn create(&self, req: &CreateNoteRequest) -> Result<Note> {
        validate_create(req)?;

        tracing::info!("Creating note");
        self.transport
            .send_json(self.transport.post("/notes").json(req))
            .await
    }

    /// Fetch one note; `NotFound` when absent or not owned by the caller
    pub async fn get(&self, id: &str) -> Result<Note> {
        self.transport
            .send_json(self.transport.get(&format!("/notes/{}", id)))
            .await
    }

    /// Partial update; omitted fields are left unchanged. Returns the
    /// full post-update record.
    pub async fn update(&self, id: &str, req: &UpdateNoteRequest) -> Result<Note> {
        validate_update(req)?;

        tracing::debug!("Updating note {}", id);
        self.transport
            .send_json(self.transport.put(&format!("/notes/{}", id)).json(req))
            .await
    }

    /// Delete a note, soft by default. A soft-deleted note remains
    /// retrievable through the trash listing; a permanent delete is
    /// unrecoverable.
    pub async fn delete(&self, id: &str, permanent: bool) -> Result<()> {
        tracing::info!("Deleting note {} (permanent: {})", id, permanent);

        let req = self
            .transport
            .delete(&format!("/notes/{}", id))
            .query(&[("permanent", permanent)]);

        self.transport.send_no_content(req).await
    }

    /// Flip the pinned flag server-side, avoiding a read-modify-write
    /// race, and return the updated record
    pub async fn toggle_pin(&self, id: &str) -> Result<Note> {
        self.transport
            .send_json(self.transport.patch(&format!("/notes/{}/pin", id)))
            .await
    }

    /// Flip the archived flag server-side and return the updated record
    pub async fn toggle_archive(&self, id: &str) -> Result<Note> {
        self.transport
            .send_json(self.transport.patch(&format!("/notes/{}/archive", id)))
            .await
    }

    /// Set the note color to a palette token or hex literal
    pub async fn set_color(&self, id: &str, color: &str) -> Result<Note> {
        if !is_valid_color(color) {
            return Err(AppError::ValidationFailed(format!(
                "invalid color: {}",
                color
            )));
        }

        let req = self
            .transport
            .patch(&format!("/notes/{}/color", id))
            .json(&json!({ "color": color }));

        self.transport.send_json(req).await
    }

    /// Full-text search over title and content; offset pagination
    /// (`page` × `limit`)
    pub async fn search(&self, query: &str, limit: Option<u32>, page: u32) -> Result<Vec<Note>> {
        let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        validate_search(query, limit)?;

        let req = self.transport.get("/notes/search").query(&[
            ("q", query.to_string()),
            ("limit", limit.to_string()),
            ("page", page.to_string()),
        ]);

        self.transport.send_json(req).await
    }

    /// Server-side mirror of the pinned partition
    pub async fn pinned(&self) -> Result<Vec<Note>> {
        self.transport
            .send_json(self.transport.get("/notes/pinned"))
            .await
    }

    /// Server-side mirror of the archived view
    pub async fn archived(&self) -> Result<Vec<Note>> {
        self.transport
            .send_json(self.transport.get("/notes/archived"))
            .await
    }
}

fn validate_create(req: &CreateNoteRequest) -> Result<()> {
    let title = req.title.as_deref().unwrap_or("");
    let content = req.content.as_deref().unwrap_or("");

    if title.trim().is_empty() && content.trim().is_empty() {
        return Err(AppError::ValidationFailed(
            "either title or content must be provided".to_string(),
        ));
    }

    validate_bounds(Some(title), Some(content), req.color.as_deref())
}

fn validate_update(req: &UpdateNoteRequest) -> Result<()> {
    validate_bounds(req.title.as_deref(), req.content.as_deref(), req.color.as_deref())?;

    if let Some(position) = req.position {
        if position < 0 {
            return Err(AppError::ValidationFailed(
                "position must be non-negative".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_bounds(title: Option<&str>, content: Option<&str>, color: Option<&str>) -> Result<()> {
    if title.is_some_and(|t| t.len() > MAX_TITLE_LEN) {
        return Err(AppError::ValidationFailed(format!(
            "title must be less than {} characters",
            MAX_TITLE_LEN
        )));
    }

    if content.is_some_and(|c| c.len() > MAX_CONTENT_LEN) {
        return Err(AppError::ValidationFailed(format!(
            "content must be less than {} characters",
            MAX_CONTENT_LEN
        )));
    }

    if let Some(color) = color {
        // Empty resets to the default server-side
        if !color.is_empty() && !is_valid_color(color) {
            return Err(AppError::ValidationFailed(format!(
                "invalid color: {}",
                color
            )));
        }
    }

    Ok(())
}

fn validate_search(query: &str, limit: u32) -> Result<()> {
    if query.len() > MAX_QUERY_LEN {
        return Err(AppError::ValidationFailed(format!(
            "search query must be less than {} characters",
            MAX_QUERY_LEN
        )));
    }

    if limit > MAX_SEARCH_LIMIT {
        return Err(AppError::ValidationFailed(format!(
            "limit must be between 0 and {}",
            MAX_SEARCH_LIMIT
        )));
    }

    Ok(())
}

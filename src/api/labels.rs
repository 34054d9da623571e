//! Labels client
//!
//! Label CRUD and note attachment against the `/labels` endpoints.
//! Labels are many-to-many with notes and outlive any single note.

use super::Transport;
use crate::config::{ApiConfig, MAX_LABEL_NAME_LEN};
use crate::error::{AppError, Result};
use crate::models::{CreateLabelRequest, Label, Note, UpdateLabelRequest};
use crate::services::SessionStore;
use serde_json::json;

/// Client for the `/labels` endpoints
#[derive(Clone)]
pub struct LabelsClient {
    transport: Transport,
}

impl LabelsClient {
    pub fn new(config: &ApiConfig, session: SessionStore) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config, session)?,
        })
    }

    /// List the caller's labels
    pub async fn list(&self) -> Result<Vec<Label>> {
        self.transport.send_json(self.transport.get("/labels")).await
    }

    /// Create a label; the name is trimmed before it is sent
    pub async fn create(&self, name: &str, color: Option<&str>) -> Result<Label> {
        let name = validate_name(name)?;
        if let Some(color) = color {
            validate_hex_color(color)?;
        }

        let req = CreateLabelRequest {
            name,
            color: color.map(str::to_string),
        };

        tracing::info!("Creating label {}", req.name);
        self.transport
            .send_json(self.transport.post("/labels").json(&req))
            .await
    }

    /// Fetch one label
    pub async fn get(&self, id: &str) -> Result<Label> {
        self.transport
            .send_json(self.transport.get(&format!("/labels/{}", id)))
            .await
    }

    /// Partial update; omitted fields are left unchanged
    pub async fn update(&self, id: &str, req: &UpdateLabelRequest) -> Result<Label> {
        let req = UpdateLabelRequest {
            name: req.name.as_deref().map(validate_name).transpose()?,
            color: match req.color.as_deref() {
                Some(color) => {
                    validate_hex_color(color)?;
                    Some(color.to_string())
                }
                None => None,
            },
        };

        self.transport
            .send_json(self.transport.put(&format!("/labels/{}", id)).json(&req))
            .await
    }

    /// Delete a label everywhere; notes keep their other labels
    pub async fn delete(&self, id: &str) -> Result<()> {
        tracing::info!("Deleting label {}", id);
        self.transport
            .send_no_content(self.transport.delete(&format!("/labels/{}", id)))
            .await
    }

    /// Attach a label to a note
    pub async fn attach(&self, note_id: &str, label_id: &str) -> Result<()> {
        let req = self
            .transport
            .post(&format!("/notes/{}/labels", note_id))
            .json(&json!({ "label_id": label_id }));

        self.transport.send_no_content(req).await
    }

    /// Detach a label from a note
    pub async fn detach(&self, note_id: &str, label_id: &str) -> Result<()> {
        self.transport
            .send_no_content(
                self.transport
                    .delete(&format!("/notes/{}/labels/{}", note_id, label_id)),
            )
            .await
    }

    /// List the notes carrying a label
    pub async fn notes_with_label(&self, id: &str) -> Result<Vec<Note>> {
        self.transport
            .send_json(self.transport.get(&format!("/labels/{}/notes", id)))
            .await
    }
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(AppError::ValidationFailed("name cannot be empty".to_string()));
    }

    if trimmed.len() > MAX_LABEL_NAME_LEN {
        return Err(AppError::ValidationFailed(format!(
            "name cannot exceed {} characters",
            MAX_LABEL_NAME_LEN
        )));
    }

    Ok(trimmed.to_string())
}

fn validate_hex_color(color: &str) -> Result<()> {
    // Labels take `#rrggbb` only, unlike notes
    let ok = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());

    if ok {
        Ok(())
    } else {
        Err(AppError::ValidationFailed(
            "color must be a valid hex color".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_trimmed_and_bounded() {
        assert_eq!(validate_name("  Work  ").unwrap(), "Work");
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(MAX_LABEL_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_label_colors_are_full_hex_only() {
        assert!(validate_hex_color("#a7ffeb").is_ok());
        assert!(validate_hex_color("#fff").is_err());
        assert!(validate_hex_color("teal").is_err());
        assert!(validate_hex_color("#gggggg").is_err());
    }
}

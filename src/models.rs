//! Wire data model
//!
//! Rust structs mirroring the remote API's JSON records. Field names
//! follow the server's snake_case wire format; timestamps are RFC 3339.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sticky-note record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub color: String,
    pub is_pinned: bool,
    pub is_archived: bool,
    pub is_deleted: bool,
    /// Manual ordering slot among siblings; display order ignores it
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

impl Note {
    /// Not archived and not deleted
    pub fn is_active(&self) -> bool {
        !self.is_archived && !self.is_deleted
    }

    /// Eligible for the pinned partition of the active view
    pub fn in_pinned_partition(&self) -> bool {
        self.is_active() && self.is_pinned
    }

    /// Eligible for the unpinned partition of the active view
    pub fn in_unpinned_partition(&self) -> bool {
        self.is_active() && !self.is_pinned
    }
}

/// A user-defined label; many-to-many with notes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A file attached to a note; its lifetime is bound to the note's
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub note_id: String,
    pub filename: String,
    pub url: String,
    pub size: i64,
    pub mime_type: String,
    pub created_at: DateTime<Utc>,
}

/// Authentication provider that issued the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Local,
    Google,
}

/// An authenticated user record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub provider: AuthProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Successful authentication: the user plus the bearer token used for
/// every subsequent call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Create note request; the server assigns id and timestamps
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
}

/// Partial note update; omitted fields are left unchanged by the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
}

impl UpdateNoteRequest {
    /// True when no field is set; an empty update needs no request
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The fields of `next` that differ from `prev`
    pub fn diff(prev: &Note, next: &Note) -> Self {
        Self {
            title: (prev.title != next.title).then(|| next.title.clone()),
            content: (prev.content != next.content).then(|| next.content.clone()),
            color: (prev.color != next.color).then(|| next.color.clone()),
            is_pinned: (prev.is_pinned != next.is_pinned).then_some(next.is_pinned),
            is_archived: (prev.is_archived != next.is_archived).then_some(next.is_archived),
            position: (prev.position != next.position).then_some(next.position),
        }
    }
}

/// Create label request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLabelRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Partial label update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLabelRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Credential login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Account creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// OAuth token exchange request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleLoginRequest {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_note(pinned: bool, archived: bool, deleted: bool) -> Note {
        Note {
            id: "1".to_string(),
            user_id: "u1".to_string(),
            title: "A".to_string(),
            content: String::new(),
            color: "#ffffff".to_string(),
            is_pinned: pinned,
            is_archived: archived,
            is_deleted: deleted,
            position: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            labels: None,
            attachments: None,
        }
    }

    #[test]
    fn test_partition_predicates() {
        let active_pinned = sample_note(true, false, false);
        assert!(active_pinned.is_active());
        assert!(active_pinned.in_pinned_partition());
        assert!(!active_pinned.in_unpinned_partition());

        // Archived notes never reach the active partitions, pinned or not
        let archived_pinned = sample_note(true, true, false);
        assert!(!archived_pinned.is_active());
        assert!(!archived_pinned.in_pinned_partition());
        assert!(!archived_pinned.in_unpinned_partition());

        let deleted = sample_note(false, false, true);
        assert!(!deleted.is_active());
        assert!(!deleted.in_pinned_partition());
        assert!(!deleted.in_unpinned_partition());
    }

    #[test]
    fn test_update_request_diff_only_changed_fields() {
        let prev = sample_note(false, false, false);
        let mut next = prev.clone();
        next.title = "Renamed".to_string();
        next.is_pinned = true;

        let diff = UpdateNoteRequest::diff(&prev, &next);
        assert_eq!(diff.title.as_deref(), Some("Renamed"));
        assert_eq!(diff.is_pinned, Some(true));
        assert!(diff.content.is_none());
        assert!(diff.color.is_none());
        assert!(diff.is_archived.is_none());
        assert!(diff.position.is_none());
    }

    #[test]
    fn test_update_request_diff_identical_is_empty() {
        let note = sample_note(false, false, false);
        assert!(UpdateNoteRequest::diff(&note, &note.clone()).is_empty());
    }

    #[test]
    fn test_note_wire_format_round_trip() {
        let raw = r##"{
            "id": "5b9f",
            "user_id": "u7",
            "title": "Books to read",
            "content": "The 7 Habits",
            "color": "#a7ffeb",
            "is_pinned": false,
            "is_archived": false,
            "is_deleted": false,
            "position": 0,
            "created_at": "2026-01-15T10:30:00Z",
            "updated_at": "2026-01-15T10:30:00Z"
        }"##;

        let note: Note = serde_json::from_str(raw).unwrap();
        assert_eq!(note.color, "#a7ffeb");
        assert!(note.labels.is_none());

        // Optional collections stay off the wire when absent
        let out = serde_json::to_value(&note).unwrap();
        assert!(out.get("labels").is_none());
        assert!(out.get("attachments").is_none());
    }

    #[test]
    fn test_provider_tag_wire_format() {
        assert_eq!(
            serde_json::to_string(&AuthProvider::Google).unwrap(),
            "\"google\""
        );
        let p: AuthProvider = serde_json::from_str("\"local\"").unwrap();
        assert_eq!(p, AuthProvider::Local);
    }
}

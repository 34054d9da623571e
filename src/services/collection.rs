//! Note collection model
//!
//! The client's working set of notes, split into a pure collection
//! (`NoteSet`: ordered records plus derived views) and an effect layer
//! (`NoteCollection`: optimistic mutations issued through the notes
//! client and reconciled against its responses).
//!
//! Every mutation snapshots the affected record first. If the remote call
//! fails, the snapshot is restored and the typed error propagates, so the
//! visible list always matches the last known-good server state.

use crate::api::NotesClient;
use crate::config::is_valid_color;
use crate::error::{AppError, Result};
use crate::models::{CreateNoteRequest, Note, UpdateNoteRequest};
use std::collections::HashMap;

/// Ordered in-memory note collection with derived views.
///
/// Pure state: no I/O. Views are computed on demand from the current
/// records and can never go stale. Display order is the collection's
/// insertion order (most recent first), not the `position` field.
#[derive(Debug, Default, Clone)]
pub struct NoteSet {
    notes: Vec<Note>,
}

impl NoteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// All records in display order, partitions intermixed
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Swap in a freshly fetched working set
    pub fn replace_all(&mut self, notes: Vec<Note>) {
        self.notes = notes;
    }

    /// Insert a new record at the front (most-recent-first ordering)
    pub fn prepend(&mut self, note: Note) {
        self.notes.insert(0, note);
    }

    /// Replace the record with a matching id. Returns false when the id
    /// is not present.
    pub fn apply(&mut self, note: Note) -> bool {
        match self.notes.iter_mut().find(|n| n.id == note.id) {
            Some(slot) => {
                *slot = note;
                true
            }
            None => false,
        }
    }

    /// Remove a record, returning it with its former index so a failed
    /// remote delete can restore it in place
    pub fn remove(&mut self, id: &str) -> Option<(usize, Note)> {
        let index = self.notes.iter().position(|n| n.id == id)?;
        Some((index, self.notes.remove(index)))
    }

    /// Put a previously removed record back at its former index
    pub fn restore(&mut self, index: usize, note: Note) {
        let index = index.min(self.notes.len());
        self.notes.insert(index, note);
    }

    /// Notes that are neither archived nor deleted
    pub fn active_notes(&self) -> Vec<&Note> {
        self.notes.iter().filter(|n| n.is_active()).collect()
    }

    /// The pinned partition of the active view
    pub fn pinned_notes(&self) -> Vec<&Note> {
        self.notes.iter().filter(|n| n.in_pinned_partition()).collect()
    }

    /// The unpinned partition of the active view
    pub fn unpinned_notes(&self) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|n| n.in_unpinned_partition())
            .collect()
    }

    /// Archived, not trashed
    pub fn archived_notes(&self) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|n| n.is_archived && !n.is_deleted)
            .collect()
    }

    /// Soft-deleted notes awaiting permanent removal
    pub fn trashed_notes(&self) -> Vec<&Note> {
        self.notes.iter().filter(|n| n.is_deleted).collect()
    }
}

/// The effect layer over [`NoteSet`]: applies mutations optimistically,
/// issues the matching remote call, and reconciles the local record with
/// the server's authoritative response.
///
/// Each note carries a monotonic revision, bumped on every local
/// mutation. A server response is applied only while the revision it was
/// issued under is still current, so a late response from a superseded
/// request can never resurrect stale state.
pub struct NoteCollection {
    client: NotesClient,
    set: NoteSet,
    revisions: HashMap<String, u64>,
}

impl NoteCollection {
    pub fn new(client: NotesClient) -> Self {
        Self {
            client,
            set: NoteSet::new(),
            revisions: HashMap::new(),
        }
    }

    /// The current working set and its derived views
    pub fn set(&self) -> &NoteSet {
        &self.set
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.set.get(id)
    }

    pub fn active_notes(&self) -> Vec<&Note> {
        self.set.active_notes()
    }

    pub fn pinned_notes(&self) -> Vec<&Note> {
        self.set.pinned_notes()
    }

    pub fn unpinned_notes(&self) -> Vec<&Note> {
        self.set.unpinned_notes()
    }

    pub fn archived_notes(&self) -> Vec<&Note> {
        self.set.archived_notes()
    }

    pub fn trashed_notes(&self) -> Vec<&Note> {
        self.set.trashed_notes()
    }

    /// Replace the working set with a fresh server listing
    pub async fn refresh(&mut self, include_archived: bool, include_deleted: bool) -> Result<()> {
        let notes = self.client.list(include_archived, include_deleted).await?;
        tracing::info!("Refreshed collection: {} notes", notes.len());

        self.set.replace_all(notes);
        self.revisions.clear();
        Ok(())
    }

    /// Create a note from a draft. A draft whose title and content are
    /// both empty after trimming is a no-op: nothing is created, no
    /// request is issued. On success the server's authoritative record
    /// (id, timestamps) is prepended, not the draft.
    pub async fn create_note(&mut self, draft: CreateNoteRequest) -> Result<Option<Note>> {
        let title = draft.title.as_deref().unwrap_or("");
        let content = draft.content.as_deref().unwrap_or("");

        if title.trim().is_empty() && content.trim().is_empty() {
            tracing::debug!("Ignoring empty note draft");
            return Ok(None);
        }

        let note = self.client.create(&draft).await?;
        self.set.prepend(note.clone());

        Ok(Some(note))
    }

    /// Replace a record wholesale. The caller carries forward unchanged
    /// fields; only the fields that differ from the current record are
    /// sent. The server's full post-update record wins.
    pub async fn update_note(&mut self, note: Note) -> Result<Note> {
        let snapshot = self.snapshot(&note.id)?;

        let req = UpdateNoteRequest::diff(&snapshot, &note);
        if req.is_empty() {
            return Ok(snapshot);
        }

        let id = note.id.clone();
        let rev = self.bump(&id);
        self.set.apply(note);

        match self.client.update(&id, &req).await {
            Ok(server) => {
                self.reconcile(&id, rev, server.clone());
                Ok(server)
            }
            Err(err) => {
                self.revert(&id, rev, snapshot, &err);
                Err(err)
            }
        }
    }

    /// Delete a note. Soft delete marks the record locally so it leaves
    /// every active partition but stays visible in the trash view;
    /// permanent delete removes the record outright.
    pub async fn delete_note(&mut self, id: &str, permanent: bool) -> Result<()> {
        let snapshot = self.snapshot(id)?;
        let rev = self.bump(id);

        let removed_at = if permanent {
            self.set.remove(id).map(|(index, _)| index)
        } else {
            let mut trashed = snapshot.clone();
            trashed.is_deleted = true;
            self.set.apply(trashed);
            None
        };

        match self.client.delete(id, permanent).await {
            Ok(()) => Ok(()),
            Err(err) => {
                if self.is_current(id, rev) {
                    tracing::warn!("Delete failed for {}, reverting: {}", id, err);
                    match removed_at {
                        Some(index) => self.set.restore(index, snapshot),
                        None => {
                            self.set.apply(snapshot);
                        }
                    }
                }
                Err(err)
            }
        }
    }

    /// Flip the pinned flag, leaving every other field untouched
    pub async fn toggle_pin(&mut self, id: &str) -> Result<Note> {
        let snapshot = self.snapshot(id)?;
        let rev = self.bump(id);

        let mut optimistic = snapshot.clone();
        optimistic.is_pinned = !optimistic.is_pinned;
        self.set.apply(optimistic);

        match self.client.toggle_pin(id).await {
            Ok(server) => {
                self.reconcile(id, rev, server.clone());
                Ok(server)
            }
            Err(err) => {
                self.revert(id, rev, snapshot, &err);
                Err(err)
            }
        }
    }

    /// Flip the archived flag, leaving every other field untouched
    pub async fn toggle_archive(&mut self, id: &str) -> Result<Note> {
        let snapshot = self.snapshot(id)?;
        let rev = self.bump(id);

        let mut optimistic = snapshot.clone();
        optimistic.is_archived = !optimistic.is_archived;
        self.set.apply(optimistic);

        match self.client.toggle_archive(id).await {
            Ok(server) => {
                self.reconcile(id, rev, server.clone());
                Ok(server)
            }
            Err(err) => {
                self.revert(id, rev, snapshot, &err);
                Err(err)
            }
        }
    }

    /// Recolor a note. Unknown tokens are rejected before any request is
    /// issued.
    pub async fn set_color(&mut self, id: &str, color: &str) -> Result<Note> {
        if !is_valid_color(color) {
            return Err(AppError::ValidationFailed(format!(
                "invalid color: {}",
                color
            )));
        }

        let snapshot = self.snapshot(id)?;
        let rev = self.bump(id);

        let mut optimistic = snapshot.clone();
        optimistic.color = color.to_string();
        self.set.apply(optimistic);

        match self.client.set_color(id, color).await {
            Ok(server) => {
                self.reconcile(id, rev, server.clone());
                Ok(server)
            }
            Err(err) => {
                self.revert(id, rev, snapshot, &err);
                Err(err)
            }
        }
    }

    fn snapshot(&self, id: &str) -> Result<Note> {
        self.set
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    fn bump(&mut self, id: &str) -> u64 {
        let rev = self.revisions.entry(id.to_string()).or_insert(0);
        *rev += 1;
        *rev
    }

    fn is_current(&self, id: &str, rev: u64) -> bool {
        self.revisions.get(id).copied().unwrap_or(0) == rev
    }

    /// Apply the server's record unless a newer local mutation has
    /// already superseded the request
    fn reconcile(&mut self, id: &str, rev: u64, server: Note) {
        if self.is_current(id, rev) {
            self.set.apply(server);
        } else {
            tracing::debug!("Dropping stale response for {}", id);
        }
    }

    fn revert(&mut self, id: &str, rev: u64, snapshot: Note, err: &AppError) {
        if self.is_current(id, rev) {
            tracing::warn!("Mutation failed for {}, reverting: {}", id, err);
            self.set.apply(snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note(id: &str, pinned: bool, archived: bool, deleted: bool) -> Note {
        Note {
            id: id.to_string(),
            user_id: "u1".to_string(),
            title: format!("Note {}", id),
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

    fn ids(notes: &[&Note]) -> Vec<String> {
        notes.iter().map(|n| n.id.clone()).collect()
    }

    #[test]
    fn test_deleted_notes_leave_active_partitions() {
        let mut set = NoteSet::new();
        set.replace_all(vec![
            note("1", true, false, true),
            note("2", false, false, true),
        ]);

        assert!(set.active_notes().is_empty());
        assert!(set.pinned_notes().is_empty());
        assert!(set.unpinned_notes().is_empty());
        assert_eq!(set.trashed_notes().len(), 2);
    }

    #[test]
    fn test_archived_notes_leave_active_view_even_when_pinned() {
        let mut set = NoteSet::new();
        set.replace_all(vec![note("1", true, true, false)]);

        assert!(set.active_notes().is_empty());
        assert!(set.pinned_notes().is_empty());
        assert_eq!(set.archived_notes().len(), 1);
    }

    #[test]
    fn test_partitions_cover_active_and_are_disjoint() {
        let mut set = NoteSet::new();
        set.replace_all(vec![
            note("1", true, false, false),
            note("2", false, false, false),
            note("3", true, true, false),
            note("4", false, false, true),
            note("5", true, false, false),
        ]);

        let active = ids(&set.active_notes());
        let pinned = ids(&set.pinned_notes());
        let unpinned = ids(&set.unpinned_notes());

        let mut union = pinned.clone();
        union.extend(unpinned.clone());
        union.sort();
        let mut active_sorted = active.clone();
        active_sorted.sort();
        assert_eq!(union, active_sorted);

        for id in &pinned {
            assert!(!unpinned.contains(id));
        }
    }

    #[test]
    fn test_pin_flip_moves_note_between_partitions() {
        let mut set = NoteSet::new();
        set.replace_all(vec![note("1", false, false, false)]);

        let mut flipped = set.get("1").unwrap().clone();
        flipped.is_pinned = true;
        set.apply(flipped);

        assert_eq!(ids(&set.pinned_notes()), vec!["1"]);
        assert!(set.unpinned_notes().is_empty());
    }

    #[test]
    fn test_prepend_keeps_most_recent_first() {
        let mut set = NoteSet::new();
        set.replace_all(vec![note("1", false, false, false)]);
        set.prepend(note("2", false, false, false));

        assert_eq!(ids(&set.active_notes()), vec!["2", "1"]);
    }

    #[test]
    fn test_apply_unknown_id_is_rejected() {
        let mut set = NoteSet::new();
        assert!(!set.apply(note("ghost", false, false, false)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_and_restore_preserve_position() {
        let mut set = NoteSet::new();
        set.replace_all(vec![
            note("1", false, false, false),
            note("2", false, false, false),
            note("3", false, false, false),
        ]);

        let (index, removed) = set.remove("2").unwrap();
        assert_eq!(index, 1);
        assert_eq!(ids(&set.active_notes()), vec!["1", "3"]);

        set.restore(index, removed);
        assert_eq!(ids(&set.active_notes()), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_views_recompute_after_every_change() {
        let mut set = NoteSet::new();
        set.replace_all(vec![note("1", false, false, false)]);
        assert_eq!(set.active_notes().len(), 1);

        let mut archived = set.get("1").unwrap().clone();
        archived.is_archived = true;
        set.apply(archived);

        assert!(set.active_notes().is_empty());
        assert_eq!(set.archived_notes().len(), 1);

        let mut trashed = set.get("1").unwrap().clone();
        trashed.is_deleted = true;
        set.apply(trashed);

        assert!(set.archived_notes().is_empty());
        assert_eq!(set.trashed_notes().len(), 1);
    }
}

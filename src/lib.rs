//! keepnote library
//!
//! Client core for a sticky-notes application: the note collection model
//! with its derived views, the remote API clients, and the session store
//! they draw credentials from.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use api::{AuthClient, LabelsClient, NotesClient};
pub use error::{AppError, Result};
pub use services::{NoteCollection, NoteSet, SessionStore};

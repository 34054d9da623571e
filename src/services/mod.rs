//! Services module
//!
//! The session store and the note collection model that sit between the
//! API clients and a view layer.

pub mod collection;
pub mod session;

pub use collection::{NoteCollection, NoteSet};
pub use session::SessionStore;

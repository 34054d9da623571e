// keepnote - sticky-notes client core
// Smoke binary: wires storage, session, clients and the collection model
// together and runs one login + refresh round against the configured API.

use anyhow::Context;
use directories::ProjectDirs;
use keepnote::config::ApiConfig;
use keepnote::storage::FileStore;
use keepnote::{AuthClient, NoteCollection, NotesClient, SessionStore};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keepnote=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting keepnote client");

    let config = ApiConfig::from_env();
    tracing::info!("API base URL: {}", config.base_url);

    let dirs = ProjectDirs::from("com", "keepnote", "keepnote")
        .context("could not determine a data directory")?;
    let store = Arc::new(FileStore::new(dirs.data_dir().to_path_buf()));
    let session = SessionStore::new(store);

    let auth = AuthClient::new(&config, session.clone())?;
    let notes = NotesClient::new(&config, session.clone())?;
    let mut collection = NoteCollection::new(notes);

    if !session.is_authenticated().await? {
        let email = std::env::var("KEEPNOTE_EMAIL").context("KEEPNOTE_EMAIL not set")?;
        let password = std::env::var("KEEPNOTE_PASSWORD").context("KEEPNOTE_PASSWORD not set")?;
        auth.login(&email, &password).await?;
    }

    let user = auth.current_user().await?;
    tracing::info!("Authenticated as {}", user.email);

    collection.refresh(true, true).await?;

    println!(
        "{} pinned, {} other, {} archived, {} in trash",
        collection.pinned_notes().len(),
        collection.unpinned_notes().len(),
        collection.archived_notes().len(),
        collection.trashed_notes().len()
    );

    Ok(())
}

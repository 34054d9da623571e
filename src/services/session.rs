//! Session store
//!
//! Holds the bearer token and current user in durable key-value storage
//! under fixed keys. Token and user are independent values: the token can
//! be set before the user record is known, mid-OAuth-exchange.

use crate::config::{TOKEN_KEY, USER_KEY};
use crate::error::Result;
use crate::models::{Session, User};
use crate::storage::KeyValueStore;
use std::sync::Arc;

/// Durable holder for the current session
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The held bearer token, if any
    pub async fn token(&self) -> Result<Option<String>> {
        self.store.get(TOKEN_KEY).await
    }

    pub async fn set_token(&self, token: &str) -> Result<()> {
        self.store.set(TOKEN_KEY, token).await
    }

    /// The held user record, if any
    pub async fn user(&self) -> Result<Option<User>> {
        match self.store.get(USER_KEY).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn set_user(&self, user: &User) -> Result<()> {
        let raw = serde_json::to_string(user)?;
        self.store.set(USER_KEY, &raw).await
    }

    /// Store both halves of a fresh session
    pub async fn set_session(&self, session: &Session) -> Result<()> {
        self.set_token(&session.token).await?;
        self.set_user(&session.user).await?;
        tracing::info!("Session stored for {}", session.user.email);
        Ok(())
    }

    /// Drop token and user together; idempotent
    pub async fn clear(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY).await?;
        self.store.remove(USER_KEY).await?;
        tracing::info!("Session cleared");
        Ok(())
    }

    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.token().await?.is_some())
    }
}

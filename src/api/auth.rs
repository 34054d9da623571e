//! Auth client
//!
//! Exchanges credentials or OAuth tokens with the remote service and
//! persists the resulting session. Request bodies are validated at the
//! client boundary before anything is serialized.

use super::{expect_json, Transport};
use crate::config::{ApiConfig, MAX_NAME_LEN, MIN_NAME_LEN, MIN_PASSWORD_LEN};
use crate::error::{AppError, Result};
use crate::models::{GoogleLoginRequest, LoginRequest, RegisterRequest, Session, User};
use crate::services::SessionStore;

/// Client for the `/auth` endpoints
#[derive(Clone)]
pub struct AuthClient {
    transport: Transport,
}

impl AuthClient {
    pub fn new(config: &ApiConfig, session: SessionStore) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config, session)?,
        })
    }

    /// Log in with email and password. A refused login surfaces as
    /// `InvalidCredentials`; the session is persisted on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        validate_email(email)?;
        if password.is_empty() {
            return Err(AppError::ValidationFailed("password is required".to_string()));
        }

        tracing::info!("Logging in as {}", email);

        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .transport
            .post("/auth/login")
            .json(&req)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppError::InvalidCredentials);
        }

        let session: Session = expect_json(response).await?;
        self.transport.session().set_session(&session).await?;

        Ok(session)
    }

    /// Create an account. The server answers 400 on validation failures,
    /// including an already-registered email.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<Session> {
        validate_email(email)?;
        validate_password(password)?;
        validate_name(name)?;

        tracing::info!("Registering account for {}", email);

        let req = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        };

        let session: Session = self
            .transport
            .send_json(self.transport.post("/auth/register").json(&req))
            .await?;

        self.transport.session().set_session(&session).await?;

        Ok(session)
    }

    /// Exchange a Google ID token for a session. Any refusal from the
    /// exchange surfaces as `ProviderRejected`.
    pub async fn login_with_google(&self, token: &str) -> Result<Session> {
        if token.is_empty() {
            return Err(AppError::ValidationFailed("token is required".to_string()));
        }

        tracing::info!("Exchanging Google token");

        let req = GoogleLoginRequest {
            token: token.to_string(),
        };

        let response = self
            .transport
            .post("/auth/google")
            .json(&req)
            .send()
            .await?;

        let session: Session = expect_json(response).await.map_err(|err| match err {
            AppError::Network(e) => AppError::Network(e),
            other => AppError::ProviderRejected(other.to_string()),
        })?;

        self.transport.session().set_session(&session).await?;

        Ok(session)
    }

    /// Fetch the user record bound to the held token. Fails with
    /// `Unauthenticated` when no token is held or the server rejects it.
    pub async fn current_user(&self) -> Result<User> {
        if self.transport.session().token().await?.is_none() {
            return Err(AppError::Unauthenticated);
        }

        self.transport
            .send_json(self.transport.get("/auth/me"))
            .await
    }

    /// Drop the held session. Purely local and idempotent; bearer tokens
    /// are not revoked server-side.
    pub async fn logout(&self) -> Result<()> {
        self.transport.session().clear().await
    }
}

fn validate_email(email: &str) -> Result<()> {
    // Shape check only; the server owns real address validation
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    });

    if valid {
        Ok(())
    } else {
        Err(AppError::ValidationFailed("invalid email format".to_string()))
    }
}

fn validate_password(password: &str) -> Result<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::ValidationFailed(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.len() < MIN_NAME_LEN || trimmed.len() > MAX_NAME_LEN {
        return Err(AppError::ValidationFailed(format!(
            "name must be between {} and {} characters",
            MIN_NAME_LEN, MAX_NAME_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape_validation() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("a.b+c@mail.example.org").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ada@nodot").is_err());
        assert!(validate_email("ada@.com").is_err());
    }

    #[test]
    fn test_password_length_validation() {
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_name_bounds_validation() {
        assert!(validate_name("Ada").is_ok());
        assert!(validate_name("A").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
        assert!(validate_name("  A  ").is_err());
    }
}

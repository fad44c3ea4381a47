//! Console login: credentials, sessions, and the authentication gate.
//!
//! Credential verification sits behind the [`Authenticator`] capability so
//! the console never hard-codes a comparison. The default implementation
//! checks against the `[auth]` config section; a deployment wanting a real
//! identity backend swaps the implementation without touching the console.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// A username/password pair as captured from the login prompt.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Create credentials from prompt input.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// An authenticated console session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Username the session was opened for.
    pub username: String,
    /// Token identifying this session in logs.
    pub token: Uuid,
    /// When the session was opened.
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// Open a new session for the given username.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }
}

/// Verifies credentials and opens sessions.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Verify the credentials and open a session on success.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the pair is not
    /// accepted, without revealing which half was wrong.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError>;
}

/// Authenticator backed by the fixed pair from the `[auth]` config section.
#[derive(Debug, Clone)]
pub struct StaticAuthenticator {
    username: String,
    password: String,
}

impl StaticAuthenticator {
    /// Create an authenticator for a fixed username/password pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Build from the loaded `[auth]` config section.
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        if credentials.username == self.username && credentials.password == self.password {
            Ok(Session::new(credentials.username.clone()))
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// Two-state login gate guarding a console session.
///
/// Starts unauthenticated; a successful [`login`](Self::login) moves it to
/// the authenticated state, which is terminal for the session. There is no
/// logout: ending the session is the only way out.
pub struct SessionGate {
    authenticator: Box<dyn Authenticator>,
    session: Option<Session>,
}

impl SessionGate {
    /// Create a gate in the unauthenticated state.
    pub fn new(authenticator: Box<dyn Authenticator>) -> Self {
        Self {
            authenticator,
            session: None,
        }
    }

    /// Attempt to log in. On success the gate stays authenticated for the
    /// rest of the session; repeated calls return the existing session
    /// without re-verifying.
    ///
    /// # Errors
    ///
    /// Returns the authenticator's error on rejection; the gate remains
    /// unauthenticated and may be retried without limit.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<Session, AuthError> {
        if let Some(session) = &self.session {
            return Ok(session.clone());
        }
        let session = self.authenticator.authenticate(credentials).await?;
        self.session = Some(session.clone());
        Ok(session)
    }

    /// The current session, if authenticated.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Whether the gate has been passed.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

//! Session management
//!
//! Owns the auth token and user identity from login to logout. The session
//! gates everything else: no component issues authenticated calls without
//! it, and a 401 anywhere tears it down through [`SessionManager::logout`].

use std::sync::{Arc, Mutex};

use tracing::{info, warn};
use uuid::Uuid;

use hearth_api::Backend;
use hearth_core::models::{Credentials, UserSummary};
use hearth_core::{Database, Result};

/// An authenticated session
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: UserSummary,
}

/// Holds the current session and keeps it in sync with durable storage
pub struct SessionManager {
    api: Arc<dyn Backend>,
    db: Arc<Mutex<Database>>,
    current: Mutex<Option<Session>>,
}

impl SessionManager {
    pub fn new(api: Arc<dyn Backend>, db: Arc<Mutex<Database>>) -> Self {
        Self {
            api,
            db,
            current: Mutex::new(None),
        }
    }

    /// Exchange credentials for a session; persists it and arms the client
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        let (token, user) = self
            .api
            .login(&credentials.email, &credentials.password)
            .await?;

        {
            let db = self.db.lock().unwrap();
            db.credentials().save(&token, &user)?;
        }

        self.api.set_token(Some(token.clone()));
        let session = Session { token, user };
        *self.current.lock().unwrap() = Some(session.clone());

        info!(user = %session.user.email, "Logged in");
        Ok(session)
    }

    /// Read the persisted session at startup and re-arm the client token.
    ///
    /// The token is not validated here; the first 401 will tear it down.
    pub fn restore(&self) -> Result<Option<Session>> {
        let stored = {
            let db = self.db.lock().unwrap();
            db.credentials().load()?
        };

        let Some(stored) = stored else {
            return Ok(None);
        };

        self.api.set_token(Some(stored.token.clone()));
        let session = Session {
            token: stored.token,
            user: stored.user,
        };
        *self.current.lock().unwrap() = Some(session.clone());

        info!(user = %session.user.email, "Session restored");
        Ok(Some(session))
    }

    /// Clear persisted and in-memory session state. Idempotent.
    pub fn logout(&self) {
        let had_session = self.current.lock().unwrap().take().is_some();

        if let Err(e) = self.db.lock().unwrap().credentials().clear() {
            warn!(error = %e, "Failed to clear persisted session");
        }
        self.api.set_token(None);

        if had_session {
            info!("Logged out");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.lock().unwrap().is_some()
    }

    pub fn current(&self) -> Option<Session> {
        self.current.lock().unwrap().clone()
    }

    pub fn user(&self) -> Option<UserSummary> {
        self.current.lock().unwrap().as_ref().map(|s| s.user.clone())
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.current.lock().unwrap().as_ref().map(|s| s.user.id)
    }
}

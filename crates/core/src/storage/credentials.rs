//! Persisted session credentials
//!
//! One row holding the bearer token and the serialized user identity;
//! written on login, cleared on logout, read once at startup.

use chrono::Utc;
use rusqlite::{params, Connection};

use crate::error::Result;
use crate::models::UserSummary;

/// Token and identity as read back from storage
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub token: String,
    pub user: UserSummary,
}

/// Credential store
pub struct CredentialStore<'a> {
    conn: &'a Connection,
}

impl<'a> CredentialStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Persist the session; replaces any previous one
    pub fn save(&self, token: &str, user: &UserSummary) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO credentials (id, token, user_json, updated_at)
             VALUES (0, ?1, ?2, ?3)",
            params![
                token,
                serde_json::to_string(user)?,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Load the persisted session, if any
    pub fn load(&self) -> Result<Option<StoredCredentials>> {
        let result = self.conn.query_row(
            "SELECT token, user_json FROM credentials WHERE id = 0",
            [],
            |row| {
                let token: String = row.get(0)?;
                let user_json: String = row.get(1)?;
                Ok((token, user_json))
            },
        );

        match result {
            Ok((token, user_json)) => {
                let user: UserSummary = serde_json::from_str(&user_json)?;
                Ok(Some(StoredCredentials { token, user }))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove the persisted session (logout)
    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM credentials WHERE id = 0", [])?;
        Ok(())
    }
}

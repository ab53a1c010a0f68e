//! SQLite storage for Hearth
//!
//! Durable client-side state: the persisted session credentials read once
//! at startup. Lives in the platform data directory.

mod credentials;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::Connection;
use tracing::instrument;

use crate::error::{Error, Result};

pub use credentials::{CredentialStore, StoredCredentials};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS credentials (
    id INTEGER PRIMARY KEY CHECK (id = 0),
    token TEXT NOT NULL,
    user_json TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
";

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open at the default platform data path
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    fn init(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Default database location in the platform data directory
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "hearth", "hearth").ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine data directory",
            ))
        })?;
        Ok(dirs.data_dir().join("hearth.db"))
    }

    /// Get credential store for the persisted session
    pub fn credentials(&self) -> CredentialStore<'_> {
        CredentialStore::new(&self.conn)
    }
}

//! Hearth Core Library
//!
//! Domain models, pure derivations (filtering, sorting, price history),
//! error taxonomy, configuration, and local storage for the Hearth
//! board/property synchronization layer.

pub mod config;
pub mod error;
pub mod filter;
pub mod history;
pub mod models;
pub mod storage;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use filter::{FilterCriteria, SortKey};
pub use history::PricePoint;
pub use models::*;
pub use storage::{CredentialStore, Database, StoredCredentials};

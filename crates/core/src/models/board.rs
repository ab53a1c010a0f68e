//! Board model - a named collection of properties

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A board groups properties under one owner, with optional collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
}

impl Board {
    pub fn new(name: String, owner_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            owner_id,
        }
    }
}

/// The two disjoint board sets tracked per user
#[derive(Debug, Clone, Default)]
pub struct BoardSets {
    /// Boards owned by the current user
    pub owned: Vec<Board>,
    /// Boards shared with the current user via accepted invitation
    pub shared: Vec<Board>,
}

/// Role granted by a board invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardRole {
    /// Read and copy only
    Viewer,
    /// Read, copy, and edit
    Editor,
}

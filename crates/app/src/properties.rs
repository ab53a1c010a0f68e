//! Property repository
//!
//! Per-board cache of property records; source of truth for the active
//! board's list. Load failures keep the prior cached list so the view
//! degrades to stale-but-available instead of empty.

use std::collections::HashMap;

use uuid::Uuid;

use hearth_core::models::Property;

/// Per-board property cache
#[derive(Debug, Default)]
pub struct PropertyRepository {
    cache: HashMap<Uuid, Vec<Property>>,
    loading: bool,
}

impl PropertyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached list for a board, empty if never loaded
    pub fn board(&self, board_id: Uuid) -> &[Property] {
        self.cache.get(&board_id).map_or(&[], |list| list.as_slice())
    }

    /// Replace the cached list for a board with an authoritative load
    pub fn store(&mut self, board_id: Uuid, properties: Vec<Property>) {
        self.cache.insert(board_id, properties);
    }

    /// Look a property up across all cached boards
    pub fn find(&self, property_id: Uuid) -> Option<&Property> {
        self.cache
            .values()
            .flat_map(|list| list.iter())
            .find(|p| p.id == property_id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Drop every cached list (logout)
    pub fn clear(&mut self) {
        self.cache.clear();
        self.loading = false;
    }
}

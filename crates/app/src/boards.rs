//! Board registry
//!
//! Tracks the owned and shared board sets and the selected board. Selection
//! is a pure reassignment; every change bumps a monotonically increasing
//! epoch that in-flight property loads compare against on arrival.

use tracing::{debug, info};
use uuid::Uuid;

use hearth_core::models::{Board, BoardSets};
use hearth_core::{Error, Result};

/// Owned/shared board sets plus the current selection
#[derive(Debug, Default)]
pub struct BoardRegistry {
    owned: Vec<Board>,
    shared: Vec<Board>,
    selected: Option<Uuid>,
    epoch: u64,
}

impl BoardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace both sets with a fresh load from the backend.
    ///
    /// A still-present selection is kept; a vanished one is cleared. If
    /// nothing is selected afterwards and owned boards exist, the first
    /// owned board is selected - never one from the shared set. Returns
    /// whether the selection changed.
    pub fn apply(&mut self, sets: BoardSets) -> bool {
        self.owned = sets.owned;
        self.shared = sets.shared;

        let before = self.selected;

        if let Some(id) = self.selected {
            if self.find(id).is_none() {
                debug!(board = %id, "Selected board no longer present");
                self.selected = None;
            }
        }
        if self.selected.is_none() {
            if let Some(first) = self.owned.first() {
                info!(board = %first.id, name = %first.name, "Auto-selecting first owned board");
                self.selected = Some(first.id);
            }
        }

        let changed = self.selected != before;
        if changed {
            self.epoch += 1;
        }
        changed
    }

    /// Select a board. Pure reassignment, no network effect.
    pub fn select(&mut self, board_id: Uuid) -> Result<()> {
        if self.find(board_id).is_none() {
            return Err(Error::NotFound(format!("Board {}", board_id)));
        }
        if self.selected == Some(board_id) {
            return Ok(());
        }
        self.selected = Some(board_id);
        self.epoch += 1;
        debug!(board = %board_id, epoch = self.epoch, "Board selected");
        Ok(())
    }

    /// Current selection epoch; in-flight loads snapshot this at issue time
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn selected(&self) -> Option<&Board> {
        self.selected.and_then(|id| self.find(id))
    }

    pub fn find(&self, board_id: Uuid) -> Option<&Board> {
        self.owned
            .iter()
            .chain(self.shared.iter())
            .find(|b| b.id == board_id)
    }

    /// Whether the board belongs to someone other than `user_id`, searched
    /// across the union of owned and shared boards
    pub fn is_foreign(&self, board_id: Uuid, user_id: Uuid) -> bool {
        self.find(board_id)
            .map_or(false, |board| board.owner_id != user_id)
    }

    pub fn owned(&self) -> &[Board] {
        &self.owned
    }

    pub fn shared(&self) -> &[Board] {
        &self.shared
    }

    /// Drop all board state (logout)
    pub fn clear(&mut self) {
        self.owned.clear();
        self.shared.clear();
        if self.selected.take().is_some() {
            self.epoch += 1;
        }
    }
}

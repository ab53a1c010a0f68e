//! Invitation manager
//!
//! Holds the pending invitation list. Resolution removes the entry; an
//! acceptance is materialized by refreshing the Board Registry rather than
//! by mutating board membership here, so membership has a single owner.

use uuid::Uuid;

use hearth_core::models::Invitation;

/// Pending invitations for the current user
#[derive(Debug, Default)]
pub struct InvitationManager {
    pending: Vec<Invitation>,
}

impl InvitationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pending list with a fresh load
    pub fn store(&mut self, invitations: Vec<Invitation>) {
        self.pending = invitations;
    }

    /// Drop a resolved invitation from the pending list
    pub fn remove(&mut self, board_id: Uuid) -> Option<Invitation> {
        let index = self.pending.iter().position(|i| i.board_id == board_id)?;
        Some(self.pending.remove(index))
    }

    pub fn pending(&self) -> &[Invitation] {
        &self.pending
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

//! Invitation model - pending offers of shared board access

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of an invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
}

/// How the user resolved a pending invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationDecision {
    Accepted,
    Rejected,
}

/// A pending offer of shared access to a board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub board_id: Uuid,
    pub board_name: String,
    pub owner_email: String,
    #[serde(default = "default_status")]
    pub status: InvitationStatus,
}

fn default_status() -> InvitationStatus {
    InvitationStatus::Pending
}

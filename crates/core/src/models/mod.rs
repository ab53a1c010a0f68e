//! Domain models for boards, properties, and invitations

mod board;
mod invitation;
mod property;
mod user;

pub use board::{Board, BoardRole, BoardSets};
pub use invitation::{Invitation, InvitationDecision, InvitationStatus};
pub use property::{
    Capabilities, Coordinates, PriceHistoryEntry, Property, PropertyUpdate, Rating,
};
pub use user::{Credentials, UserSummary};

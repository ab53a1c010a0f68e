//! Hearth App Library
//!
//! The stateful synchronization layer: keeps the in-memory view of boards
//! and their properties consistent with the backend across authentication,
//! board switching, mutations, and invitation workflows. The UI layer sits
//! on top of [`AppState`] and never talks to the wire directly.

pub mod boards;
pub mod invitations;
pub mod mutations;
pub mod properties;
pub mod session;
pub mod state;

pub use boards::BoardRegistry;
pub use invitations::InvitationManager;
pub use mutations::MutationCoordinator;
pub use properties::PropertyRepository;
pub use session::{Session, SessionManager};
pub use state::AppState;

//! Backend trait - the seam between state components and the wire
//!
//! The app layer depends on this trait rather than on the HTTP client, so
//! every component can be exercised against an in-memory fake.

use async_trait::async_trait;
use uuid::Uuid;

use hearth_core::models::{
    BoardRole, BoardSets, Coordinates, Invitation, InvitationDecision, PriceHistoryEntry,
    Property, PropertyUpdate, Rating, UserSummary,
};
use hearth_core::Result;

/// Everything the Hearth backend can do for one client session
#[async_trait]
pub trait Backend: Send + Sync {
    /// Exchange credentials for a bearer token and identity
    async fn login(&self, email: &str, password: &str) -> Result<(String, UserSummary)>;

    /// Arm or clear the bearer token used by subsequent calls
    fn set_token(&self, token: Option<String>);

    /// Owned and shared board sets for the current user
    async fn boards(&self) -> Result<BoardSets>;

    /// All properties on one board
    async fn board_properties(&self, board_id: Uuid) -> Result<Vec<Property>>;

    /// Scrape a listing URL into a new property on the board
    async fn create_from_url(&self, board_id: Uuid, url: &str) -> Result<Property>;

    /// Full-field update; the payload carries the already-extended price history
    async fn update_property(&self, id: Uuid, update: &PropertyUpdate) -> Result<Property>;

    async fn delete_property(&self, id: Uuid) -> Result<()>;

    /// Reassign the property's owning board
    async fn move_property(&self, id: Uuid, target_board_id: Uuid) -> Result<Property>;

    /// Duplicate the property onto another board; source unaffected
    async fn copy_property(&self, id: Uuid, target_board_id: Uuid) -> Result<Property>;

    async fn rate_property(&self, id: Uuid, rating: Rating) -> Result<Property>;

    /// Re-run the scrape against the property's source URL
    async fn refresh_property(&self, id: Uuid) -> Result<Property>;

    /// Offer shared access to a board
    async fn invite(&self, board_id: Uuid, email: &str, role: BoardRole) -> Result<()>;

    /// Invitations pending for the current user
    async fn invitations(&self) -> Result<Vec<Invitation>>;

    async fn resolve_invitation(
        &self,
        board_id: Uuid,
        decision: InvitationDecision,
    ) -> Result<()>;

    async fn price_history(&self, property_id: Uuid) -> Result<Vec<PriceHistoryEntry>>;

    /// Resolve an address to coordinates; failures are `Error::Geocode`
    async fn geocode(&self, address: &str) -> Result<Coordinates>;
}

//! Application state and orchestration
//!
//! Wires the session, board registry, property repository, mutation
//! coordinator, and invitation manager together. Component state lives
//! behind short-lived `std::sync::Mutex` guards; no lock is ever held
//! across an await, so a board switch can genuinely race an in-flight
//! load and the epoch check is what settles it.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use hearth_api::{ApiClient, Backend};
use hearth_core::filter::{visible, FilterCriteria, SortKey};
use hearth_core::history::{canonicalize, trend, PricePoint};
use hearth_core::models::{
    BoardRole, Capabilities, Coordinates, Credentials, Invitation, InvitationDecision,
    Property, PropertyUpdate, Rating,
};
use hearth_core::{AppConfig, Database, Error, Result};

use crate::boards::BoardRegistry;
use crate::invitations::InvitationManager;
use crate::mutations::MutationCoordinator;
use crate::properties::PropertyRepository;
use crate::session::{Session, SessionManager};

/// Main application state
pub struct AppState {
    api: Arc<dyn Backend>,
    pub session: SessionManager,
    boards: Mutex<BoardRegistry>,
    properties: Mutex<PropertyRepository>,
    invitations: Mutex<InvitationManager>,
    mutations: MutationCoordinator,
}

impl AppState {
    /// Build against the real backend and the platform data directory
    pub fn new(config: &AppConfig) -> Result<Self> {
        let api: Arc<dyn Backend> = Arc::new(ApiClient::new(config)?);
        let db = Arc::new(Mutex::new(Database::open_default()?));
        Ok(Self::with_backend(api, db))
    }

    /// Build against any backend implementation (used by tests)
    pub fn with_backend(api: Arc<dyn Backend>, db: Arc<Mutex<Database>>) -> Self {
        Self {
            session: SessionManager::new(api.clone(), db),
            boards: Mutex::new(BoardRegistry::new()),
            properties: Mutex::new(PropertyRepository::new()),
            invitations: Mutex::new(InvitationManager::new()),
            mutations: MutationCoordinator::new(api.clone()),
            api,
        }
    }

    // ── Session ────────────────────────────────────────────────────────

    /// Log in and load the board sets.
    ///
    /// A failed board load after a successful login does not fail the
    /// login; the boards stay pending until the next explicit load.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        let session = self.session.login(credentials).await?;
        if let Err(e) = self.load_boards().await {
            if e.is_auth() {
                return Err(e);
            }
            warn!(error = %e, "Board load after login failed");
        }
        Ok(session)
    }

    /// Restore the persisted session at startup, if any, and load boards.
    ///
    /// A token the backend no longer accepts is torn down and reported as
    /// no session.
    pub async fn restore(&self) -> Result<Option<Session>> {
        let Some(session) = self.session.restore()? else {
            return Ok(None);
        };
        match self.load_boards().await {
            Ok(()) => Ok(Some(session)),
            Err(e) if e.is_auth() => Ok(None),
            Err(e) => {
                warn!(error = %e, "Board load after restore failed");
                Ok(Some(session))
            }
        }
    }

    /// Tear down the session and every cache derived from it
    pub fn logout(&self) {
        self.session.logout();
        self.boards.lock().unwrap().clear();
        self.properties.lock().unwrap().clear();
        self.invitations.lock().unwrap().clear();
    }

    fn require_auth(&self) -> Result<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(Error::Auth)
        }
    }

    /// Centralized expiry handling: any auth failure from any call site
    /// tears the session down here and nowhere else.
    fn guard<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            if err.is_auth() && self.session.is_authenticated() {
                warn!("Session expired, logging out");
                self.logout();
            }
        }
        result
    }

    // ── Boards ─────────────────────────────────────────────────────────

    /// Load the owned/shared board sets; reloads properties if the
    /// selection moved (including the initial auto-select)
    pub async fn load_boards(&self) -> Result<()> {
        self.require_auth()?;
        let sets = self.guard(self.api.boards().await)?;

        let selection_changed = self.boards.lock().unwrap().apply(sets);
        if selection_changed {
            self.load_properties().await?;
        }
        Ok(())
    }

    /// Select a board and reload its property list
    pub async fn select_board(&self, board_id: Uuid) -> Result<()> {
        self.require_auth()?;
        self.boards.lock().unwrap().select(board_id)?;
        self.load_properties().await
    }

    pub fn selected_board_id(&self) -> Option<Uuid> {
        self.boards.lock().unwrap().selected().map(|b| b.id)
    }

    pub fn owned_boards(&self) -> Vec<hearth_core::models::Board> {
        self.boards.lock().unwrap().owned().to_vec()
    }

    pub fn shared_boards(&self) -> Vec<hearth_core::models::Board> {
        self.boards.lock().unwrap().shared().to_vec()
    }

    // ── Properties ─────────────────────────────────────────────────────

    /// Load the active board's property list.
    ///
    /// The load snapshots the selection epoch at issue time; if the user
    /// switches boards while the request is in flight, the late response
    /// is discarded rather than overwriting the repository.
    pub async fn load_properties(&self) -> Result<()> {
        self.require_auth()?;
        let (board_id, epoch) = {
            let boards = self.boards.lock().unwrap();
            match boards.selected() {
                Some(board) => (board.id, boards.epoch()),
                None => return Ok(()),
            }
        };

        self.properties.lock().unwrap().set_loading(true);
        let result = self.api.board_properties(board_id).await;
        // Cleared on success and failure alike
        self.properties.lock().unwrap().set_loading(false);

        if self.boards.lock().unwrap().epoch() != epoch {
            debug!(board = %board_id, "Discarding stale property response");
            return Ok(());
        }

        match self.guard(result) {
            Ok(list) => {
                debug!(board = %board_id, count = list.len(), "Properties loaded");
                self.properties.lock().unwrap().store(board_id, list);
                Ok(())
            }
            Err(err) => {
                // Prior cached list stays available
                warn!(board = %board_id, error = %err, "Property load failed");
                Err(err)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.properties.lock().unwrap().is_loading()
    }

    /// Visible subset of the active board under the given criteria
    pub fn visible_properties(&self, criteria: &FilterCriteria, sort: SortKey) -> Vec<Property> {
        let Some(board_id) = self.selected_board_id() else {
            return Vec::new();
        };
        let properties = self.properties.lock().unwrap();
        visible(properties.board(board_id), criteria, sort)
    }

    /// Cached list for any board (stale-but-available view)
    pub fn cached_properties(&self, board_id: Uuid) -> Vec<Property> {
        self.properties.lock().unwrap().board(board_id).to_vec()
    }

    pub fn property(&self, property_id: Uuid) -> Option<Property> {
        self.properties.lock().unwrap().find(property_id).cloned()
    }

    /// Whether the property sits on a board the current user does not own
    pub fn is_shared(&self, property: &Property) -> bool {
        let Some(user_id) = self.session.user_id() else {
            return false;
        };
        self.boards
            .lock()
            .unwrap()
            .is_foreign(property.board_id, user_id)
    }

    /// Capability set gating the mutating actions for one property view
    pub fn capabilities(&self, property: &Property) -> Capabilities {
        Capabilities::for_property(property, self.is_shared(property))
    }

    fn cached_property(&self, property_id: Uuid) -> Result<Property> {
        self.property(property_id)
            .ok_or_else(|| Error::NotFound(format!("Property {}", property_id)))
    }

    // ── Mutations ──────────────────────────────────────────────────────

    /// Move a property to another board; it disappears from the active
    /// view once the authoritative reload lands
    pub async fn move_property(&self, property_id: Uuid, target_board_id: Uuid) -> Result<()> {
        self.require_auth()?;
        let property = self.cached_property(property_id)?;
        let caps = self.capabilities(&property);
        let result = self
            .mutations
            .move_property(&property, caps, target_board_id)
            .await;
        self.guard(result)?;
        self.load_properties().await
    }

    /// Copy a property to another board; the source is unaffected
    pub async fn copy_property(&self, property_id: Uuid, target_board_id: Uuid) -> Result<()> {
        self.require_auth()?;
        let property = self.cached_property(property_id)?;
        let result = self
            .mutations
            .copy_property(&property, target_board_id)
            .await;
        self.guard(result)?;
        // No visible change expected on the source board, but reload for freshness
        if self.selected_board_id() == Some(property.board_id) {
            self.load_properties().await?;
        }
        Ok(())
    }

    pub async fn rate_property(&self, property_id: Uuid, rating: Rating) -> Result<()> {
        self.require_auth()?;
        let property = self.cached_property(property_id)?;
        let caps = self.capabilities(&property);
        let result = self.mutations.rate(&property, caps, rating).await;
        self.guard(result)?;
        self.load_properties().await
    }

    pub async fn refresh_property(&self, property_id: Uuid) -> Result<()> {
        self.require_auth()?;
        let property = self.cached_property(property_id)?;
        let caps = self.capabilities(&property);
        let result = self.mutations.refresh(&property, caps).await;
        self.guard(result)?;
        self.load_properties().await
    }

    pub async fn delete_property(&self, property_id: Uuid) -> Result<()> {
        self.require_auth()?;
        let property = self.cached_property(property_id)?;
        let caps = self.capabilities(&property);
        let result = self.mutations.delete(&property, caps).await;
        self.guard(result)?;
        self.load_properties().await
    }

    pub async fn edit_property(&self, property_id: Uuid, update: PropertyUpdate) -> Result<()> {
        self.require_auth()?;
        let property = self.cached_property(property_id)?;
        let result = self.mutations.edit(&property, update).await;
        self.guard(result)?;
        self.load_properties().await
    }

    /// Scrape a listing URL into a new property on a board
    pub async fn add_property_from_url(&self, board_id: Uuid, url: &str) -> Result<Property> {
        self.require_auth()?;
        if url.trim().is_empty() {
            return Err(Error::Validation("Listing URL is required".to_string()));
        }
        let result = self.api.create_from_url(board_id, url).await;
        let property = self.guard(result)?;
        if self.selected_board_id() == Some(board_id) {
            self.load_properties().await?;
        }
        Ok(property)
    }

    // ── Invitations ────────────────────────────────────────────────────

    /// Offer shared access to one of the user's boards
    pub async fn invite(&self, board_id: Uuid, email: &str, role: BoardRole) -> Result<()> {
        self.require_auth()?;
        if email.trim().is_empty() {
            return Err(Error::Validation("Email is required".to_string()));
        }
        let result = self.api.invite(board_id, email, role).await;
        self.guard(result)
    }

    pub async fn load_invitations(&self) -> Result<()> {
        self.require_auth()?;
        let list = self.guard(self.api.invitations().await)?;
        self.invitations.lock().unwrap().store(list);
        Ok(())
    }

    pub fn pending_invitations(&self) -> Vec<Invitation> {
        self.invitations.lock().unwrap().pending().to_vec()
    }

    /// Resolve a pending invitation. Acceptance shows up as a shared board
    /// through a registry refresh; membership is never mutated directly.
    pub async fn resolve_invitation(
        &self,
        board_id: Uuid,
        decision: InvitationDecision,
    ) -> Result<()> {
        self.require_auth()?;
        let result = self.api.resolve_invitation(board_id, decision).await;
        self.guard(result)?;

        self.invitations.lock().unwrap().remove(board_id);
        if decision == InvitationDecision::Accepted {
            self.load_boards().await?;
        }
        Ok(())
    }

    // ── Price history & geocoding ──────────────────────────────────────

    /// Fetch a property's price history and derive the display trajectory:
    /// chronological points with per-entry deltas, the live price last
    pub async fn price_trend(&self, property_id: Uuid) -> Result<Vec<PricePoint>> {
        self.require_auth()?;
        let entries = self.guard(self.api.price_history(property_id).await)?;
        let entries = canonicalize(entries);
        let current_price = self.property(property_id).and_then(|p| p.price);
        Ok(trend(&entries, current_price, Utc::now()))
    }

    /// Resolve an address for the manual-entry form. Failure carries a
    /// message but never blocks submission.
    pub async fn geocode(&self, address: &str) -> Result<Coordinates> {
        self.require_auth()?;
        let result = self.api.geocode(address).await;
        self.guard(result)
    }
}

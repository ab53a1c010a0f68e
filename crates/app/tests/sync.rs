//! End-to-end scenarios for the synchronization layer, driven through an
//! in-memory backend fake.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Notify;
use uuid::Uuid;

use hearth_api::Backend;
use hearth_app::AppState;
use hearth_core::filter::{FilterCriteria, SortKey};
use hearth_core::models::{
    Board, BoardRole, BoardSets, Coordinates, Credentials, Invitation, InvitationDecision,
    InvitationStatus, PriceHistoryEntry, Property, PropertyUpdate, Rating, UserSummary,
};
use hearth_core::{Database, Error, Result};

// ── Fake backend ──────────────────────────────────────────────────────

struct FakeWorld {
    boards: Vec<Board>,
    shared_with_me: Vec<Uuid>,
    properties: Vec<Property>,
    invitations: Vec<Invitation>,
    sent_invites: Vec<(Uuid, String)>,
}

struct FakeBackend {
    me: UserSummary,
    world: Mutex<FakeWorld>,
    token: Mutex<Option<String>>,
    expired: AtomicBool,
    fail_next: Mutex<Option<Error>>,
    holds: Mutex<HashMap<Uuid, Arc<Notify>>>,
}

impl FakeBackend {
    fn new(me: UserSummary, world: FakeWorld) -> Self {
        Self {
            me,
            world: Mutex::new(world),
            token: Mutex::new(None),
            expired: AtomicBool::new(false),
            fail_next: Mutex::new(None),
            holds: Mutex::new(HashMap::new()),
        }
    }

    fn set_expired(&self, expired: bool) {
        self.expired.store(expired, Ordering::SeqCst);
    }

    fn fail_next_with(&self, error: Error) {
        *self.fail_next.lock().unwrap() = Some(error);
    }

    /// Gate the next property load for `board_id` until the returned
    /// handle is notified
    fn hold_board(&self, board_id: Uuid) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.holds.lock().unwrap().insert(board_id, gate.clone());
        gate
    }

    fn check(&self) -> Result<()> {
        if self.token.lock().unwrap().is_none() || self.expired.load(Ordering::SeqCst) {
            return Err(Error::Auth);
        }
        if let Some(error) = self.fail_next.lock().unwrap().take() {
            return Err(error);
        }
        Ok(())
    }

    fn world_properties(&self, board_id: Uuid) -> Vec<Property> {
        self.world
            .lock()
            .unwrap()
            .properties
            .iter()
            .filter(|p| p.board_id == board_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn login(&self, email: &str, _password: &str) -> Result<(String, UserSummary)> {
        if email != self.me.email {
            return Err(Error::Network {
                status: Some(403),
                message: "Unknown account".to_string(),
            });
        }
        Ok((format!("tok-{}", Uuid::new_v4()), self.me.clone()))
    }

    fn set_token(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }

    async fn boards(&self) -> Result<BoardSets> {
        self.check()?;
        let world = self.world.lock().unwrap();
        Ok(BoardSets {
            owned: world
                .boards
                .iter()
                .filter(|b| b.owner_id == self.me.id)
                .cloned()
                .collect(),
            shared: world
                .boards
                .iter()
                .filter(|b| world.shared_with_me.contains(&b.id))
                .cloned()
                .collect(),
        })
    }

    async fn board_properties(&self, board_id: Uuid) -> Result<Vec<Property>> {
        self.check()?;
        let gate = self.holds.lock().unwrap().remove(&board_id);
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(self.world_properties(board_id))
    }

    async fn create_from_url(&self, board_id: Uuid, url: &str) -> Result<Property> {
        self.check()?;
        let mut property = make_property(board_id, "Scraped listing", Some(275_000.0));
        property.source_url = Some(url.to_string());
        self.world.lock().unwrap().properties.push(property.clone());
        Ok(property)
    }

    async fn update_property(&self, id: Uuid, update: &PropertyUpdate) -> Result<Property> {
        self.check()?;
        let mut world = self.world.lock().unwrap();
        let property = world
            .properties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(format!("Property {}", id)))?;
        property.title = update.title.clone();
        property.location = update.location.clone();
        property.price = update.price;
        property.area = update.area;
        property.rooms = update.rooms;
        property.status = update.status.clone();
        property.description = update.description.clone();
        property.source_url = update.source_url.clone();
        property.is_active = update.is_active;
        property.coordinates = update.coordinates;
        property.price_history = update.price_history.clone();
        Ok(property.clone())
    }

    async fn delete_property(&self, id: Uuid) -> Result<()> {
        self.check()?;
        self.world.lock().unwrap().properties.retain(|p| p.id != id);
        Ok(())
    }

    async fn move_property(&self, id: Uuid, target_board_id: Uuid) -> Result<Property> {
        self.check()?;
        let mut world = self.world.lock().unwrap();
        let property = world
            .properties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(format!("Property {}", id)))?;
        property.board_id = target_board_id;
        Ok(property.clone())
    }

    async fn copy_property(&self, id: Uuid, target_board_id: Uuid) -> Result<Property> {
        self.check()?;
        let mut world = self.world.lock().unwrap();
        let mut copy = world
            .properties
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Property {}", id)))?;
        copy.id = Uuid::new_v4();
        copy.board_id = target_board_id;
        world.properties.push(copy.clone());
        Ok(copy)
    }

    async fn rate_property(&self, id: Uuid, rating: Rating) -> Result<Property> {
        self.check()?;
        let mut world = self.world.lock().unwrap();
        let property = world
            .properties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(format!("Property {}", id)))?;
        property.rating = rating;
        Ok(property.clone())
    }

    async fn refresh_property(&self, id: Uuid) -> Result<Property> {
        self.check()?;
        let mut world = self.world.lock().unwrap();
        let property = world
            .properties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(format!("Property {}", id)))?;
        property.status = "refreshed".to_string();
        Ok(property.clone())
    }

    async fn invite(&self, board_id: Uuid, email: &str, _role: BoardRole) -> Result<()> {
        self.check()?;
        self.world
            .lock()
            .unwrap()
            .sent_invites
            .push((board_id, email.to_string()));
        Ok(())
    }

    async fn invitations(&self) -> Result<Vec<Invitation>> {
        self.check()?;
        Ok(self.world.lock().unwrap().invitations.clone())
    }

    async fn resolve_invitation(
        &self,
        board_id: Uuid,
        decision: InvitationDecision,
    ) -> Result<()> {
        self.check()?;
        let mut world = self.world.lock().unwrap();
        world.invitations.retain(|i| i.board_id != board_id);
        if decision == InvitationDecision::Accepted {
            world.shared_with_me.push(board_id);
        }
        Ok(())
    }

    async fn price_history(&self, property_id: Uuid) -> Result<Vec<PriceHistoryEntry>> {
        self.check()?;
        let world = self.world.lock().unwrap();
        let property = world
            .properties
            .iter()
            .find(|p| p.id == property_id)
            .ok_or_else(|| Error::NotFound(format!("Property {}", property_id)))?;
        Ok(property.price_history.clone())
    }

    async fn geocode(&self, address: &str) -> Result<Coordinates> {
        self.check()?;
        if address.contains("nowhere") {
            return Err(Error::Geocode("No match for address".to_string()));
        }
        Ok(Coordinates { lat: 38.7, lng: -9.1 })
    }
}

// ── Fixtures ──────────────────────────────────────────────────────────

fn make_property(board_id: Uuid, title: &str, price: Option<f64>) -> Property {
    Property {
        id: Uuid::new_v4(),
        board_id,
        title: title.to_string(),
        location: "Lisbon".to_string(),
        price,
        area: Some(90.0),
        rooms: Some(3),
        status: "available".to_string(),
        description: String::new(),
        source_url: None,
        is_active: true,
        rating: Rating::None,
        owner: None,
        coordinates: None,
        price_history: Vec::new(),
        created_at: Utc::now(),
    }
}

struct Fixture {
    fake: Arc<FakeBackend>,
    app: AppState,
    db: Arc<Mutex<Database>>,
    board_a: Uuid,
    board_b: Uuid,
    shared_board: Uuid,
    invited_board: Uuid,
    prop_flat: Uuid,
    prop_cottage: Uuid,
    prop_foreign: Uuid,
}

fn fixture() -> Fixture {
    let me = UserSummary {
        id: Uuid::new_v4(),
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
    };
    let friend = Uuid::new_v4();

    let board_a = Board::new("Lisbon flats".to_string(), me.id);
    let board_b = Board::new("Porto houses".to_string(), me.id);
    let shared_board = Board::new("Coast picks".to_string(), friend);
    let invited_board = Board::new("City center".to_string(), friend);

    let mut flat = make_property(board_a.id, "Sunny flat", Some(500_000.0));
    flat.source_url = Some("https://listings.example/42".to_string());
    let cottage = make_property(board_a.id, "Old cottage", Some(150_000.0));
    let house = make_property(board_b.id, "River house", Some(320_000.0));
    let foreign = make_property(shared_board.id, "Beach villa", Some(900_000.0));

    let world = FakeWorld {
        shared_with_me: vec![shared_board.id],
        invitations: vec![Invitation {
            board_id: invited_board.id,
            board_name: invited_board.name.clone(),
            owner_email: "friend@example.com".to_string(),
            status: InvitationStatus::Pending,
        }],
        boards: vec![
            board_a.clone(),
            board_b.clone(),
            shared_board.clone(),
            invited_board.clone(),
        ],
        properties: vec![flat.clone(), cottage.clone(), house, foreign.clone()],
        sent_invites: Vec::new(),
    };

    let fake = Arc::new(FakeBackend::new(me, world));
    let db = Arc::new(Mutex::new(Database::open_in_memory().unwrap()));
    let app = AppState::with_backend(fake.clone(), db.clone());

    Fixture {
        fake,
        app,
        db,
        board_a: board_a.id,
        board_b: board_b.id,
        shared_board: shared_board.id,
        invited_board: invited_board.id,
        prop_flat: flat.id,
        prop_cottage: cottage.id,
        prop_foreign: foreign.id,
    }
}

fn credentials() -> Credentials {
    Credentials::new("ana@example.com", "hunter2")
}

async fn logged_in() -> Fixture {
    let fx = fixture();
    fx.app.login(&credentials()).await.unwrap();
    fx
}

// ── Session ───────────────────────────────────────────────────────────

#[tokio::test]
async fn login_selects_first_owned_board_and_loads_it() {
    let fx = logged_in().await;

    assert!(fx.app.session.is_authenticated());
    assert_eq!(fx.app.selected_board_id(), Some(fx.board_a));
    assert_eq!(fx.app.cached_properties(fx.board_a).len(), 2);
    assert_eq!(fx.app.owned_boards().len(), 2);
    assert_eq!(fx.app.shared_boards().len(), 1);
}

#[tokio::test]
async fn login_persists_credentials() {
    let fx = logged_in().await;

    let stored = fx.db.lock().unwrap().credentials().load().unwrap().unwrap();
    assert_eq!(stored.user.email, "ana@example.com");
    assert!(stored.token.starts_with("tok-"));
}

#[tokio::test]
async fn restore_rearms_the_persisted_session() {
    let fx = logged_in().await;
    let db = fx.db.clone();

    // A fresh state over the same storage, as after a restart
    let app = AppState::with_backend(fx.fake.clone(), db);
    let session = app.restore().await.unwrap().unwrap();

    assert_eq!(session.user.email, "ana@example.com");
    assert!(app.session.is_authenticated());
    assert_eq!(app.selected_board_id(), Some(fx.board_a));
}

#[tokio::test]
async fn restore_without_persisted_session_is_none() {
    let fx = fixture();
    assert!(fx.app.restore().await.unwrap().is_none());
    assert!(!fx.app.session.is_authenticated());
}

#[tokio::test]
async fn restore_with_rejected_token_tears_down() {
    let fx = logged_in().await;
    fx.fake.set_expired(true);

    let app = AppState::with_backend(fx.fake.clone(), fx.db.clone());
    assert!(app.restore().await.unwrap().is_none());
    assert!(!app.session.is_authenticated());
    assert!(fx.db.lock().unwrap().credentials().load().unwrap().is_none());
}

#[tokio::test]
async fn expiry_anywhere_clears_the_session_until_relogin() {
    let fx = logged_in().await;
    fx.fake.set_expired(true);

    let err = fx.app.load_properties().await.unwrap_err();
    assert!(err.is_auth());
    assert!(!fx.app.session.is_authenticated());
    assert!(fx.db.lock().unwrap().credentials().load().unwrap().is_none());
    assert!(fx.app.cached_properties(fx.board_a).is_empty());

    // Every authenticated entry point now refuses up front
    assert!(fx.app.load_boards().await.unwrap_err().is_auth());
    assert!(fx
        .app
        .rate_property(fx.prop_flat, Rating::Favorite)
        .await
        .unwrap_err()
        .is_auth());

    // Re-login works once the backend accepts us again
    fx.fake.set_expired(false);
    fx.app.login(&credentials()).await.unwrap();
    assert!(fx.app.session.is_authenticated());
    assert_eq!(fx.app.cached_properties(fx.board_a).len(), 2);
}

#[tokio::test]
async fn logout_clears_all_derived_state() {
    let fx = logged_in().await;
    fx.app.load_invitations().await.unwrap();

    fx.app.logout();

    assert!(!fx.app.session.is_authenticated());
    assert!(fx.app.selected_board_id().is_none());
    assert!(fx.app.owned_boards().is_empty());
    assert!(fx.app.pending_invitations().is_empty());
    assert!(fx
        .app
        .visible_properties(&FilterCriteria::default(), SortKey::default())
        .is_empty());
}

// ── Board switching & stale responses ─────────────────────────────────

#[tokio::test]
async fn selecting_a_board_loads_its_properties() {
    let fx = logged_in().await;

    fx.app.select_board(fx.board_b).await.unwrap();

    assert_eq!(fx.app.selected_board_id(), Some(fx.board_b));
    assert_eq!(fx.app.cached_properties(fx.board_b).len(), 1);
    assert!(!fx.app.is_loading());
}

#[tokio::test]
async fn late_response_for_a_previous_board_is_discarded() {
    let fx = Arc::new(logged_in().await);

    // Gate the next load for board A, then start it
    let gate = fx.fake.hold_board(fx.board_a);
    let pending = tokio::spawn({
        let fx = fx.clone();
        async move { fx.app.load_properties().await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Switch boards while the load is in flight
    fx.app.select_board(fx.board_b).await.unwrap();

    // Board A's listings change server-side; a committed stale response
    // would overwrite the cache with this new state
    fx.fake
        .world
        .lock()
        .unwrap()
        .properties
        .retain(|p| p.board_id != fx.board_a);
    gate.notify_one();
    pending.await.unwrap().unwrap();

    assert_eq!(fx.app.selected_board_id(), Some(fx.board_b));
    // Cache for board A still holds the list from before the switch
    assert_eq!(fx.app.cached_properties(fx.board_a).len(), 2);
    assert!(!fx.app.is_loading());
}

#[tokio::test]
async fn failed_load_preserves_the_stale_cache() {
    let fx = logged_in().await;

    fx.fake.fail_next_with(Error::Network {
        status: Some(500),
        message: "boom".to_string(),
    });
    let err = fx.app.load_properties().await.unwrap_err();

    assert_eq!(err.user_message(), "boom");
    assert_eq!(fx.app.cached_properties(fx.board_a).len(), 2);
    assert!(fx.app.session.is_authenticated());
    assert!(!fx.app.is_loading());
}

// ── Filtering ─────────────────────────────────────────────────────────

#[tokio::test]
async fn visible_properties_filter_and_sort_the_active_board() {
    let fx = logged_in().await;

    let all = fx
        .app
        .visible_properties(&FilterCriteria::default(), SortKey::PriceAsc);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].title, "Old cottage");

    let expensive = fx.app.visible_properties(
        &FilterCriteria {
            price_min: Some(400_000.0),
            ..Default::default()
        },
        SortKey::PriceAsc,
    );
    assert_eq!(expensive.len(), 1);
    assert_eq!(expensive[0].title, "Sunny flat");
}

// ── Mutations ─────────────────────────────────────────────────────────

#[tokio::test]
async fn moved_property_leaves_the_source_and_reaches_the_target() {
    let fx = logged_in().await;

    fx.app.move_property(fx.prop_flat, fx.board_b).await.unwrap();

    // Gone from the active (source) board after the authoritative reload
    assert!(!fx
        .app
        .cached_properties(fx.board_a)
        .iter()
        .any(|p| p.id == fx.prop_flat));

    fx.app.select_board(fx.board_b).await.unwrap();
    assert!(fx
        .app
        .cached_properties(fx.board_b)
        .iter()
        .any(|p| p.id == fx.prop_flat));
}

#[tokio::test]
async fn copy_keeps_the_source_and_grows_the_target_by_one() {
    let fx = logged_in().await;
    let source_before = fx.app.cached_properties(fx.board_a).len();
    let target_before = fx.fake.world_properties(fx.board_b).len();

    fx.app.copy_property(fx.prop_flat, fx.board_b).await.unwrap();

    assert_eq!(fx.app.cached_properties(fx.board_a).len(), source_before);
    assert_eq!(fx.fake.world_properties(fx.board_b).len(), target_before + 1);
}

#[tokio::test]
async fn copying_a_shared_property_into_an_owned_board_is_allowed() {
    let fx = logged_in().await;
    fx.app.select_board(fx.shared_board).await.unwrap();
    let before = fx.fake.world_properties(fx.board_a).len();

    fx.app
        .copy_property(fx.prop_foreign, fx.board_a)
        .await
        .unwrap();

    assert_eq!(fx.fake.world_properties(fx.board_a).len(), before + 1);
    // Source board untouched
    assert_eq!(fx.fake.world_properties(fx.shared_board).len(), 1);
}

#[tokio::test]
async fn destructive_operations_are_refused_on_shared_properties() {
    let fx = logged_in().await;
    fx.app.select_board(fx.shared_board).await.unwrap();

    let property = fx.app.property(fx.prop_foreign).unwrap();
    assert!(fx.app.is_shared(&property));
    let caps = fx.app.capabilities(&property);
    assert!(!caps.can_delete && !caps.can_move && !caps.can_rate && !caps.can_refresh);

    assert!(matches!(
        fx.app.delete_property(fx.prop_foreign).await,
        Err(Error::InvalidOperation(_))
    ));
    assert!(matches!(
        fx.app.move_property(fx.prop_foreign, fx.board_a).await,
        Err(Error::InvalidOperation(_))
    ));
    assert!(matches!(
        fx.app.rate_property(fx.prop_foreign, Rating::Favorite).await,
        Err(Error::InvalidOperation(_))
    ));
    // Nothing reached the backend
    assert_eq!(fx.fake.world_properties(fx.shared_board).len(), 1);
}

#[tokio::test]
async fn rating_cannot_be_cleared_back_to_none() {
    let fx = logged_in().await;

    assert!(matches!(
        fx.app.rate_property(fx.prop_flat, Rating::None).await,
        Err(Error::InvalidOperation(_))
    ));

    fx.app
        .rate_property(fx.prop_flat, Rating::Interested)
        .await
        .unwrap();
    assert_eq!(
        fx.app.property(fx.prop_flat).unwrap().rating,
        Rating::Interested
    );
}

#[tokio::test]
async fn refresh_requires_a_source_listing() {
    let fx = logged_in().await;

    // The cottage was entered manually; nothing to re-scrape
    assert!(matches!(
        fx.app.refresh_property(fx.prop_cottage).await,
        Err(Error::InvalidOperation(_))
    ));

    fx.app.refresh_property(fx.prop_flat).await.unwrap();
    assert_eq!(fx.app.property(fx.prop_flat).unwrap().status, "refreshed");
}

#[tokio::test]
async fn delete_removes_the_property_permanently() {
    let fx = logged_in().await;

    fx.app.delete_property(fx.prop_cottage).await.unwrap();

    assert!(fx.app.property(fx.prop_cottage).is_none());
    assert_eq!(fx.fake.world_properties(fx.board_a).len(), 1);
}

#[tokio::test]
async fn failed_mutation_leaves_everything_untouched() {
    let fx = logged_in().await;

    fx.fake.fail_next_with(Error::Network {
        status: Some(500),
        message: "backend unavailable".to_string(),
    });
    let err = fx
        .app
        .move_property(fx.prop_flat, fx.board_b)
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "backend unavailable");
    let cached = fx.app.property(fx.prop_flat).unwrap();
    assert_eq!(cached.board_id, fx.board_a);
    assert_eq!(fx.fake.world_properties(fx.board_b).len(), 1);
}

#[tokio::test]
async fn edit_validation_rejects_before_any_network_call() {
    let fx = logged_in().await;
    let property = fx.app.property(fx.prop_flat).unwrap();

    let mut update = PropertyUpdate::from_property(&property);
    update.price = Some(-5.0);

    assert!(matches!(
        fx.app.edit_property(fx.prop_flat, update).await,
        Err(Error::Validation(_))
    ));
    assert_eq!(
        fx.app.property(fx.prop_flat).unwrap().price,
        Some(500_000.0)
    );
}

#[tokio::test]
async fn price_edit_records_the_old_price_and_its_delta() {
    let fx = logged_in().await;
    let property = fx.app.property(fx.prop_flat).unwrap();

    let mut update = PropertyUpdate::from_property(&property);
    update.price = Some(480_000.0);
    fx.app.edit_property(fx.prop_flat, update).await.unwrap();

    let edited = fx.app.property(fx.prop_flat).unwrap();
    assert_eq!(edited.price, Some(480_000.0));
    assert_eq!(edited.price_history.len(), 1);
    assert_eq!(edited.price_history[0].price, 500_000.0);

    let points = fx.app.price_trend(fx.prop_flat).await.unwrap();
    let live = points.last().unwrap();
    assert_eq!(live.price, 480_000.0);
    assert_eq!(live.delta, Some(-20_000.0));
    assert_eq!(live.percent, Some(-4.0));
}

#[tokio::test]
async fn edit_without_price_change_adds_no_history() {
    let fx = logged_in().await;
    let property = fx.app.property(fx.prop_flat).unwrap();

    let mut update = PropertyUpdate::from_property(&property);
    update.description = "South-facing, needs paint".to_string();
    fx.app.edit_property(fx.prop_flat, update).await.unwrap();

    assert!(fx.app.property(fx.prop_flat).unwrap().price_history.is_empty());
}

#[tokio::test]
async fn adding_a_property_from_a_url_refreshes_the_active_board() {
    let fx = logged_in().await;

    let created = fx
        .app
        .add_property_from_url(fx.board_a, "https://listings.example/77")
        .await
        .unwrap();

    assert_eq!(created.board_id, fx.board_a);
    assert_eq!(fx.app.cached_properties(fx.board_a).len(), 3);

    assert!(matches!(
        fx.app.add_property_from_url(fx.board_a, "  ").await,
        Err(Error::Validation(_))
    ));
}

// ── Invitations ───────────────────────────────────────────────────────

#[tokio::test]
async fn rejected_invitation_disappears_without_adding_a_board() {
    let fx = logged_in().await;
    fx.app.load_invitations().await.unwrap();
    assert_eq!(fx.app.pending_invitations().len(), 1);
    let shared_before = fx.app.shared_boards().len();

    fx.app
        .resolve_invitation(fx.invited_board, InvitationDecision::Rejected)
        .await
        .unwrap();

    assert!(fx.app.pending_invitations().is_empty());
    assert_eq!(fx.app.shared_boards().len(), shared_before);
}

#[tokio::test]
async fn accepted_invitation_adds_exactly_one_shared_board() {
    let fx = logged_in().await;
    fx.app.load_invitations().await.unwrap();
    let shared_before = fx.app.shared_boards().len();

    fx.app
        .resolve_invitation(fx.invited_board, InvitationDecision::Accepted)
        .await
        .unwrap();

    assert!(fx.app.pending_invitations().is_empty());
    let shared = fx.app.shared_boards();
    assert_eq!(shared.len(), shared_before + 1);
    assert!(shared.iter().any(|b| b.id == fx.invited_board));
    // Acceptance must not steal the selection
    assert_eq!(fx.app.selected_board_id(), Some(fx.board_a));
}

#[tokio::test]
async fn inviting_a_collaborator_reaches_the_backend() {
    let fx = logged_in().await;

    fx.app
        .invite(fx.board_a, "bob@example.com", BoardRole::Viewer)
        .await
        .unwrap();
    let sent = fx.fake.world.lock().unwrap().sent_invites.clone();
    assert_eq!(sent, vec![(fx.board_a, "bob@example.com".to_string())]);

    assert!(matches!(
        fx.app.invite(fx.board_a, "  ", BoardRole::Viewer).await,
        Err(Error::Validation(_))
    ));
}

// ── Geocoding ─────────────────────────────────────────────────────────

#[tokio::test]
async fn geocode_failure_is_a_message_not_a_teardown() {
    let fx = logged_in().await;

    let spot = fx.app.geocode("Rua Augusta, Lisboa").await.unwrap();
    assert!((spot.lat - 38.7).abs() < f64::EPSILON);

    let err = fx.app.geocode("nowhere at all").await.unwrap_err();
    assert!(matches!(err, Error::Geocode(_)));
    assert!(fx.app.session.is_authenticated());
}

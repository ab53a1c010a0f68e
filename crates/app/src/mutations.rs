//! Mutation coordinator
//!
//! Executes property mutations against the backend. Every operation issues
//! its network call first; the caller refreshes from the authoritative list
//! only on success, so a failure never partially applies. Capability checks
//! happen here, uniformly, before anything goes on the wire.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use hearth_api::Backend;
use hearth_core::history::record_price_change;
use hearth_core::models::{Capabilities, Property, PropertyUpdate, Rating};
use hearth_core::{Error, Result};

/// Coordinates all property mutations
pub struct MutationCoordinator {
    api: Arc<dyn Backend>,
}

impl MutationCoordinator {
    pub fn new(api: Arc<dyn Backend>) -> Self {
        Self { api }
    }

    /// Reassign the property's owning board
    pub async fn move_property(
        &self,
        property: &Property,
        caps: Capabilities,
        target_board_id: Uuid,
    ) -> Result<Property> {
        if !caps.can_move {
            return Err(Error::InvalidOperation(
                "Shared properties cannot be moved".to_string(),
            ));
        }
        if property.board_id == target_board_id {
            return Err(Error::InvalidOperation(
                "Property is already on this board".to_string(),
            ));
        }
        let moved = self.api.move_property(property.id, target_board_id).await?;
        info!(property = %property.id, target = %target_board_id, "Property moved");
        Ok(moved)
    }

    /// Duplicate the property onto another board; the source is unaffected.
    /// Allowed on shared properties - copying is how collaborators take
    /// an item into their own board.
    pub async fn copy_property(
        &self,
        property: &Property,
        target_board_id: Uuid,
    ) -> Result<Property> {
        let copy = self.api.copy_property(property.id, target_board_id).await?;
        info!(property = %property.id, target = %target_board_id, "Property copied");
        Ok(copy)
    }

    /// Set the rating. There is no way to clear a rating back to none.
    pub async fn rate(
        &self,
        property: &Property,
        caps: Capabilities,
        rating: Rating,
    ) -> Result<Property> {
        if !caps.can_rate {
            return Err(Error::InvalidOperation(
                "Shared properties cannot be rated".to_string(),
            ));
        }
        if rating == Rating::None {
            return Err(Error::InvalidOperation(
                "A rating cannot be cleared".to_string(),
            ));
        }
        self.api.rate_property(property.id, rating).await
    }

    /// Re-run the scrape against the property's source URL
    pub async fn refresh(&self, property: &Property, caps: Capabilities) -> Result<Property> {
        if !caps.can_refresh {
            return Err(Error::InvalidOperation(
                "Property has no source listing to refresh from".to_string(),
            ));
        }
        let refreshed = self.api.refresh_property(property.id).await?;
        info!(property = %property.id, "Property refreshed from source");
        Ok(refreshed)
    }

    /// Remove the property permanently
    pub async fn delete(&self, property: &Property, caps: Capabilities) -> Result<()> {
        if !caps.can_delete {
            return Err(Error::InvalidOperation(
                "Shared properties cannot be deleted".to_string(),
            ));
        }
        self.api.delete_property(property.id).await?;
        info!(property = %property.id, "Property deleted");
        Ok(())
    }

    /// Full-field update.
    ///
    /// When the edit changes the price, the *old* price is recorded in the
    /// history carried by the payload - history tracks what the price was,
    /// not what it becomes. The authoritative history from the cached
    /// property is the base; whatever the form held is discarded.
    pub async fn edit(&self, property: &Property, update: PropertyUpdate) -> Result<Property> {
        update.validate()?;

        let mut update = update;
        update.price_history = property.price_history.clone();
        if update.price != property.price {
            if let Some(old_price) = property.price {
                record_price_change(&mut update.price_history, old_price, Utc::now());
                info!(
                    property = %property.id,
                    old = old_price,
                    new = ?update.price,
                    "Price change recorded"
                );
            }
        }

        self.api.update_property(property.id, &update).await
    }
}

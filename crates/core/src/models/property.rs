//! Property model - one real-estate listing record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

use super::UserSummary;

/// User-assigned rating for a property
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    #[default]
    None,
    Favorite,
    Interested,
    NotInterested,
}

/// Geographic position resolved for a property's address
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A single point in a property's price history.
///
/// Entries are immutable once created. Canonical storage order is
/// chronological ascending; display orders are derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistoryEntry {
    pub price: f64,
    pub date: DateTime<Utc>,
}

impl PriceHistoryEntry {
    pub fn new(price: f64, date: DateTime<Utc>) -> Self {
        Self { price, date }
    }
}

/// One real-estate listing, belonging to exactly one board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: Uuid,
    pub board_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub rooms: Option<u32>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default)]
    pub owner: Option<UserSummary>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub price_history: Vec<PriceHistoryEntry>,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl Property {
    /// Whether the refresh operation is available at all
    pub fn has_source(&self) -> bool {
        self.source_url
            .as_deref()
            .map_or(false, |url| !url.trim().is_empty())
    }
}

/// Full-field edit payload for a property.
///
/// The price history travels with the update: when the edit changes the
/// price, the caller records the old price before submitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyUpdate {
    pub title: String,
    pub location: String,
    pub price: Option<f64>,
    pub area: Option<f64>,
    pub rooms: Option<u32>,
    pub status: String,
    pub description: String,
    pub source_url: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub price_history: Vec<PriceHistoryEntry>,
}

impl PropertyUpdate {
    /// Start an edit from the property's current field values
    pub fn from_property(property: &Property) -> Self {
        Self {
            title: property.title.clone(),
            location: property.location.clone(),
            price: property.price,
            area: property.area,
            rooms: property.rooms,
            status: property.status.clone(),
            description: property.description.clone(),
            source_url: property.source_url.clone(),
            is_active: property.is_active,
            coordinates: property.coordinates,
            price_history: property.price_history.clone(),
        }
    }

    /// Client-side form constraints, checked before any network call
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("Title is required".to_string()));
        }
        if self.location.trim().is_empty() {
            return Err(Error::Validation("Location is required".to_string()));
        }
        if let Some(price) = self.price {
            if price <= 0.0 {
                return Err(Error::Validation("Price must be positive".to_string()));
            }
        }
        if let Some(area) = self.area {
            if area <= 0.0 {
                return Err(Error::Validation("Area must be positive".to_string()));
            }
        }
        Ok(())
    }
}

/// Mutating actions available on one property view.
///
/// Computed once from ownership and consumed uniformly by every mutating
/// action; shared properties are read-mostly (view and copy only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub can_delete: bool,
    pub can_move: bool,
    pub can_rate: bool,
    pub can_refresh: bool,
}

impl Capabilities {
    /// Capabilities for a property, given whether it lives on a foreign board
    pub fn for_property(property: &Property, shared: bool) -> Self {
        Self {
            can_delete: !shared,
            can_move: !shared,
            can_rate: !shared,
            can_refresh: !shared && property.has_source(),
        }
    }
}

//! Filter/sort engine
//!
//! Pure derivation from (property list, criteria, sort key) to the visible
//! ordered subset. Calling it twice with identical inputs yields identical
//! output; nothing here touches shared state.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{Property, Rating};

/// Conjunctive filter bounds; an unset bound imposes no constraint.
///
/// A bound constrains only properties that carry the value: a property
/// without a price passes price bounds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub area_min: Option<f64>,
    pub area_max: Option<f64>,
    pub status: Option<String>,
    pub rating: Option<Rating>,
}

impl FilterCriteria {
    /// Whether the property satisfies every set bound
    pub fn matches(&self, property: &Property) -> bool {
        if let (Some(min), Some(price)) = (self.price_min, property.price) {
            if price < min {
                return false;
            }
        }
        if let (Some(max), Some(price)) = (self.price_max, property.price) {
            if price > max {
                return false;
            }
        }
        if let (Some(min), Some(area)) = (self.area_min, property.area) {
            if area < min {
                return false;
            }
        }
        if let (Some(max), Some(area)) = (self.area_max, property.area) {
            if area > max {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if &property.status != status {
                return false;
            }
        }
        if let Some(rating) = self.rating {
            if property.rating != rating {
                return false;
            }
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.price_min.is_none()
            && self.price_max.is_none()
            && self.area_min.is_none()
            && self.area_max.is_none()
            && self.status.is_none()
            && self.rating.is_none()
    }
}

/// Sort orders for the visible list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    AreaAsc,
    AreaDesc,
    CreatedAsc,
    #[default]
    CreatedDesc,
}

/// Compute the visible ordered subset of a board's properties.
///
/// The sort is stable: ties and properties missing the sort key keep their
/// input order, and missing-key properties go last in either direction.
pub fn visible(
    properties: &[Property],
    criteria: &FilterCriteria,
    sort: SortKey,
) -> Vec<Property> {
    let mut result: Vec<Property> = properties
        .iter()
        .filter(|p| criteria.matches(p))
        .cloned()
        .collect();

    result.sort_by(|a, b| compare(a, b, sort));
    result
}

fn compare(a: &Property, b: &Property, sort: SortKey) -> Ordering {
    match sort {
        SortKey::PriceAsc => compare_optional(a.price, b.price, false),
        SortKey::PriceDesc => compare_optional(a.price, b.price, true),
        SortKey::AreaAsc => compare_optional(a.area, b.area, false),
        SortKey::AreaDesc => compare_optional(a.area, b.area, true),
        SortKey::CreatedAsc => a.created_at.cmp(&b.created_at),
        SortKey::CreatedDesc => b.created_at.cmp(&a.created_at),
    }
}

/// Missing values sort last regardless of direction
fn compare_optional(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            if descending {
                b.total_cmp(&a)
            } else {
                a.total_cmp(&b)
            }
        }
    }
}

//! Price history tracking
//!
//! The canonical storage order for a property's price history is
//! chronological ascending; both display orders (timeline charts and
//! newest-first lists) are derived from it here rather than mutated at
//! call sites.

use chrono::{DateTime, Utc};

use crate::models::PriceHistoryEntry;

/// A history entry enriched with the change versus its predecessor
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub price: f64,
    pub date: DateTime<Utc>,
    /// Signed difference to the immediately preceding price
    pub delta: Option<f64>,
    /// Percentage change versus the preceding price, rounded to one decimal
    pub percent: Option<f64>,
}

/// Percentage change from `previous` to `current`, rounded to one decimal.
///
/// A zero previous price yields no comparison rather than a numeric error.
pub fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    let raw = (current - previous) / previous * 100.0;
    Some((raw * 10.0).round() / 10.0)
}

/// Sort wire entries into the canonical ascending order
pub fn canonicalize(mut entries: Vec<PriceHistoryEntry>) -> Vec<PriceHistoryEntry> {
    entries.sort_by_key(|e| e.date);
    entries
}

/// Record that an edit is about to change the price away from `old_price`.
///
/// History records what the price *was*, not what it becomes: the old
/// price is appended as the most recent historical entry.
pub fn record_price_change(
    history: &mut Vec<PriceHistoryEntry>,
    old_price: f64,
    at: DateTime<Utc>,
) {
    history.push(PriceHistoryEntry::new(old_price, at));
}

/// Derive per-entry deltas over the ascending history.
///
/// The chronologically earliest entry has no comparison available.
pub fn with_deltas(entries: &[PriceHistoryEntry]) -> Vec<PricePoint> {
    let mut points = Vec::with_capacity(entries.len());
    let mut previous: Option<f64> = None;

    for entry in entries {
        let (delta, percent) = match previous {
            Some(prev) => (
                Some(entry.price - prev),
                percent_change(prev, entry.price),
            ),
            None => (None, None),
        };
        points.push(PricePoint {
            price: entry.price,
            date: entry.date,
            delta,
            percent,
        });
        previous = Some(entry.price);
    }

    points
}

/// Full trajectory: history plus the live price as the final point
pub fn trend(
    entries: &[PriceHistoryEntry],
    current_price: Option<f64>,
    now: DateTime<Utc>,
) -> Vec<PricePoint> {
    let mut all = entries.to_vec();
    if let Some(price) = current_price {
        all.push(PriceHistoryEntry::new(price, now));
    }
    with_deltas(&all)
}

/// Display order for history lists (most recent change first)
pub fn newest_first(points: Vec<PricePoint>) -> Vec<PricePoint> {
    let mut points = points;
    points.reverse();
    points
}

//! Data models for dayrate
//!
//! A `RatingItem` is a named thing with a history of `RatingEntry` values,
//! at most one per calendar day.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest accepted rating
pub const MIN_RATING: i64 = 0;

/// Highest accepted rating
pub const MAX_RATING: i64 = 5;

/// One day's rating for one item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatingEntry {
    /// When the rating was recorded
    pub date: DateTime<Utc>,
    /// The score
    pub value: i64,
}

impl RatingEntry {
    pub fn new(date: DateTime<Utc>, value: i64) -> Self {
        Self { date, value }
    }
}

/// A rated item and its history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingItem {
    /// Sanitized name, also the record filename
    pub id: String,
    /// Display name (same as `id`)
    pub name: String,
    /// Entries, ascending by date
    pub ratings: Vec<RatingEntry>,
}

impl RatingItem {
    /// Create an item from a sanitized id and its entries
    ///
    /// Entries are sorted ascending by date.
    pub fn new(id: impl Into<String>, ratings: Vec<RatingEntry>) -> Self {
        let id = id.into();
        let mut item = Self {
            name: id.clone(),
            id,
            ratings,
        };
        item.sort_ratings();
        item
    }

    /// Date of the most recent entry, or the earliest representable instant
    pub fn last_rated(&self) -> DateTime<Utc> {
        self.ratings
            .last()
            .map(|entry| entry.date)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Mean of all entry values, 0 when there are none
    pub fn average_rating(&self) -> f64 {
        if self.ratings.is_empty() {
            return 0.0;
        }
        // Summed as f64: records may hold any i64
        let sum: f64 = self.ratings.iter().map(|entry| entry.value as f64).sum();
        sum / self.ratings.len() as f64
    }

    /// Append an entry and restore ascending date order
    pub fn push(&mut self, entry: RatingEntry) {
        self.ratings.push(entry);
        self.sort_ratings();
    }

    fn sort_ratings(&mut self) {
        self.ratings.sort_by_key(|entry| entry.date);
    }
}

/// Sort items newest activity first
///
/// The sort is stable, so items rated at the same instant keep their order.
pub fn sort_by_recent(items: &mut [RatingItem]) {
    items.sort_by(|a, b| b.last_rated().cmp(&a.last_rated()));
}

//! Rating store
//!
//! The `RatingStore` owns every rated item for the life of the process. It
//! loads all records once when opened and afterwards only writes:
//!
//! - `add_rating` appends at most one entry per item per calendar day and
//!   rewrites that item's record
//! - `delete_item` removes the record and the in-memory item
//!
//! Storage failures never reach the caller. They are logged, and the most
//! recent one is kept in `last_storage_error` so a front end can warn that a
//! change was not saved.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = RatingStore::open(&config)?;
//!
//! if !store.add_rating("Coffee", 4)? {
//!     println!("Already rated today");
//! }
//!
//! for item in store.list_items() {
//!     println!("{} {:.1}", item.name, item.average_rating());
//! }
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, SubsecRound, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calendar::Calendar;
use crate::config::Config;
use crate::models::{sort_by_recent, RatingEntry, RatingItem, MAX_RATING, MIN_RATING};
use crate::sanitize::sanitize_name;
use crate::storage::{RecordPersistence, StorageError};

/// Rejections reported to the caller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// Value outside the accepted scale
    #[error("Rating {value} is out of range. Use a whole number from {min} to {max}.")]
    ValueOutOfRange { value: i64, min: i64, max: i64 },
}

/// In-memory collection of rated items backed by one record per item
pub struct RatingStore {
    /// Items, newest activity first
    items: Vec<RatingItem>,
    /// Record persistence handler
    persistence: RecordPersistence,
    /// Day boundary for the one-per-day rule
    calendar: Calendar,
    /// Most recent swallowed storage failure
    last_storage_error: Option<StorageError>,
}

impl RatingStore {
    /// Open the store described by the configuration
    ///
    /// Fails only when the configured calendar is invalid. Storage problems
    /// are logged and leave the affected records out.
    pub fn open(config: &Config) -> Result<Self> {
        let calendar = config
            .calendar()
            .context("Failed to resolve calendar for ratings")?;
        Ok(Self::open_in(config.ratings_dir(), calendar))
    }

    /// Open a store on a specific ratings directory
    ///
    /// Creates the directory if needed and loads every valid record. Never
    /// fails: an unusable directory yields an empty store.
    pub fn open_in(dir: impl Into<std::path::PathBuf>, calendar: Calendar) -> Self {
        let persistence = RecordPersistence::new(dir);
        let mut last_storage_error = None;

        if let Err(e) = persistence.ensure_dir() {
            warn!("{}", e);
            last_storage_error = Some(e);
        }

        let mut items = match persistence.load_all() {
            Ok(items) => items,
            Err(e) => {
                warn!("Could not load ratings from {:?}: {}", persistence.dir(), e);
                last_storage_error = Some(e);
                Vec::new()
            }
        };
        sort_by_recent(&mut items);

        info!(
            "Loaded {} rated item(s) from {:?}",
            items.len(),
            persistence.dir()
        );

        Self {
            items,
            persistence,
            calendar,
            last_storage_error,
        }
    }

    /// Items sorted by most recent rating first
    pub fn list_items(&self) -> &[RatingItem] {
        &self.items
    }

    /// Look up an item by name (sanitized before lookup)
    pub fn get_item(&self, name: &str) -> Option<&RatingItem> {
        let id = sanitize_name(name);
        self.items.iter().find(|item| item.id == id)
    }

    /// Rate an item now
    ///
    /// Returns `Ok(false)` when the item already has a rating today.
    pub fn add_rating(&mut self, name: &str, value: i64) -> Result<bool, RatingError> {
        self.add_rating_at(name, value, Utc::now().trunc_subsecs(0))
    }

    /// Rate an item at a given instant
    ///
    /// `now` is both the stored timestamp and the day checked against
    /// existing entries. Returns `Ok(false)` without touching memory or disk
    /// when an entry already falls on that day.
    pub fn add_rating_at(
        &mut self,
        name: &str,
        value: i64,
        now: DateTime<Utc>,
    ) -> Result<bool, RatingError> {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(RatingError::ValueOutOfRange {
                value,
                min: MIN_RATING,
                max: MAX_RATING,
            });
        }

        let id = sanitize_name(name);
        let entry = RatingEntry::new(now, value);
        let calendar = self.calendar;

        let index = match self.items.iter().position(|item| item.id == id) {
            Some(index) => {
                let item = &mut self.items[index];
                if item
                    .ratings
                    .iter()
                    .any(|existing| calendar.same_day(existing.date, now))
                {
                    debug!("{:?} already rated on {}", id, calendar.day_of(now));
                    return Ok(false);
                }
                item.push(entry);
                index
            }
            None => {
                self.items.push(RatingItem::new(id.clone(), vec![entry]));
                self.items.len() - 1
            }
        };

        let item = &self.items[index];
        match self.persistence.save(item) {
            Ok(()) => {
                debug!("Saved {} entries for {:?}", item.ratings.len(), item.id);
                self.last_storage_error = None;
            }
            Err(e) => {
                warn!("Rating for {:?} kept in memory only: {}", item.id, e);
                self.last_storage_error = Some(e);
            }
        }

        sort_by_recent(&mut self.items);
        Ok(true)
    }

    /// Delete an item and its record
    ///
    /// A missing record or unknown name is not an error.
    pub fn delete_item(&mut self, name: &str) {
        let id = sanitize_name(name);

        match self.persistence.delete(&id) {
            Ok(()) => {
                debug!("Deleted record {:?}", id);
                self.last_storage_error = None;
            }
            Err(StorageError::NotFound { .. }) => {}
            Err(e) => {
                warn!("Could not delete record {:?}: {}", id, e);
                self.last_storage_error = Some(e);
            }
        }

        self.items.retain(|item| item.id != id);
    }

    /// The calendar used for same-day checks
    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// Directory holding the records
    pub fn ratings_dir(&self) -> &std::path::Path {
        self.persistence.dir()
    }

    /// Most recent storage failure, cleared by the next successful write
    pub fn last_storage_error(&self) -> Option<&StorageError> {
        self.last_storage_error.as_ref()
    }

    /// Number of rated items
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of entries across all items
    pub fn entry_count(&self) -> usize {
        self.items.iter().map(|item| item.ratings.len()).sum()
    }
}

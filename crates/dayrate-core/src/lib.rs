//! dayrate Core Library
//!
//! This crate provides the core functionality for dayrate, a personal
//! tracker that records one 0-5 rating per item per calendar day.
//!
//! # Architecture
//!
//! - **Plain-text records**: one file per item, the source of truth on disk
//! - **RatingStore**: loads every record once and keeps the collection in
//!   memory, newest activity first
//!
//! # Quick Start
//!
//! ```text
//! let mut store = RatingStore::open(&Config::load()?)?;
//!
//! // Rate something (false means it was already rated today)
//! store.add_rating("Coffee", 4)?;
//!
//! // Read the list
//! for item in store.list_items() { ... }
//! ```
//!
//! # Modules
//!
//! - `store`: Rating store (main entry point)
//! - `models`: Rating entries and items
//! - `sanitize`: Name to id canonicalization
//! - `calendar`: Day boundary for the one-rating-per-day rule
//! - `storage`: Record format and persistence
//! - `config`: Application configuration

pub mod calendar;
pub mod config;
pub mod models;
pub mod sanitize;
pub mod storage;
pub mod store;

pub use calendar::{Calendar, InvalidOffset};
pub use config::Config;
pub use models::{RatingEntry, RatingItem, MAX_RATING, MIN_RATING};
pub use sanitize::sanitize_name;
pub use storage::{RecordPersistence, StorageError, StorageResult};
pub use store::{RatingError, RatingStore};

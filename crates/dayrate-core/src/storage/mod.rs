//! Storage layer
//!
//! Handles plain-text rating records.
//!
//! ## Layout
//!
//! - One directory, one file per item, named by the item's sanitized id
//! - Each line is `<RFC 3339 timestamp>\t<integer>`
//!
//! No index file, header or schema version. The directory listing is the index.

pub mod error;
pub mod persistence;
pub mod record;

pub use error::{StorageError, StorageResult};
pub use persistence::RecordPersistence;
pub use record::{format_record, parse_record};

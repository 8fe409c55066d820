//! Rating record persistence
//!
//! Handles saving and loading per-item records to/from the filesystem.
//! Uses atomic writes (write to a temp file, then rename) to prevent corruption.
//!
//! Storage location: `~/.local/share/dayrate/ratings/` (configurable via `Config`)
//!
//! Files:
//! - `<id>` - one record per item, named by its sanitized id

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::error::{StorageError, StorageResult};
use super::record::{format_record, parse_record};
use crate::models::{RatingEntry, RatingItem};
use crate::sanitize::sanitize_name;

/// Persistence layer for rating records
///
/// One plain-text file per item inside a single directory.
#[derive(Debug, Clone)]
pub struct RecordPersistence {
    dir: PathBuf,
}

impl RecordPersistence {
    /// Create a persistence handler for the given ratings directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The ratings directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record for `id`
    pub fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(id)
    }

    /// Create the ratings directory if it is missing
    pub fn ensure_dir(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::CreateDirectory {
            path: self.dir.clone(),
            source,
        })
    }

    /// Load every record in the directory
    ///
    /// Hidden files, directories and records without a single valid entry are
    /// skipped. Unreadable records and files whose name is not a sanitized id
    /// are logged and skipped.
    pub fn load_all(&self) -> StorageResult<Vec<RatingItem>> {
        let entries =
            fs::read_dir(&self.dir).map_err(|e| StorageError::from_read(e, self.dir.clone()))?;

        let mut items = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable directory entry in {:?}: {}", self.dir, e);
                    continue;
                }
            };

            let Some(id) = entry.file_name().to_str().map(str::to_owned) else {
                debug!("Skipping non UTF-8 filename {:?}", entry.file_name());
                continue;
            };
            if id.starts_with('.') {
                continue;
            }
            match entry.file_type() {
                Ok(kind) if !kind.is_dir() => {}
                _ => continue,
            }
            if sanitize_name(&id) != id {
                warn!("Skipping record {:?}: not a valid item name", id);
                continue;
            }

            match self.load(&id) {
                Ok(ratings) if ratings.is_empty() => {
                    debug!("Skipping record {:?} with no valid entries", id);
                }
                Ok(ratings) => items.push(RatingItem::new(id, ratings)),
                Err(e) => warn!("Skipping record {:?}: {}", id, e),
            }
        }

        Ok(items)
    }

    /// Load the entries of one record, in file order
    pub fn load(&self, id: &str) -> StorageResult<Vec<RatingEntry>> {
        let path = self.record_path(id);
        let text = fs::read_to_string(&path).map_err(|e| StorageError::from_read(e, path))?;
        Ok(parse_record(&text))
    }

    /// Save an item's full record using atomic write
    pub fn save(&self, item: &RatingItem) -> StorageResult<()> {
        let content = format_record(&item.ratings);
        atomic_write(&self.record_path(&item.id), content.as_bytes())
    }

    /// Delete the record for `id`
    pub fn delete(&self, id: &str) -> StorageResult<()> {
        let path = self.record_path(id);
        fs::remove_file(&path).map_err(|e| StorageError::from_io(e, path))
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// Temp names are short and hidden, so any id that fits in a filename can be
/// written and a crash never leaves something the loader would read.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
        path: parent.to_path_buf(),
        source,
    })?;

    let mut temp =
        NamedTempFile::new_in(parent).map_err(|e| StorageError::from_io(e, parent.to_path_buf()))?;

    temp.as_file_mut()
        .write_all(data)
        .map_err(|e| StorageError::from_io(e, temp.path().to_path_buf()))?;

    temp.as_file()
        .sync_all()
        .map_err(|e| StorageError::from_io(e, temp.path().to_path_buf()))?;

    // The temp file is removed when a failed persist drops it
    temp.persist(path)
        .map_err(|e| StorageError::AtomicWriteFailed {
            from: e.file.path().to_path_buf(),
            to: path.to_path_buf(),
            source: e.error,
        })?;

    Ok(())
}

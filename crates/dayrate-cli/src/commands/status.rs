//! Status command handler

use anyhow::Result;

use dayrate_core::{Config, RatingStore};

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(store: &RatingStore, config: &Config, output: &Output) -> Result<()> {
    let last_rated = store
        .list_items()
        .first()
        .and_then(|item| item.ratings.last())
        .map(|entry| entry.date);
    let storage_error = store.last_storage_error().map(|e| {
        serde_json::json!({
            "message": e.to_string(),
            "recoverable": e.is_recoverable(),
        })
    });

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "ratings_dir": store.ratings_dir(),
                    "calendar": store.calendar().to_string(),
                    "log_file": config.log_file,
                    "counts": {
                        "items": store.item_count(),
                        "entries": store.entry_count()
                    },
                    "last_rated": last_rated,
                    "storage_error": storage_error
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", store.item_count());
        }
        OutputFormat::Human => {
            println!("dayrate Status");
            println!("==============");
            println!();
            println!("Storage:");
            println!("  Location: {}", store.ratings_dir().display());
            println!("  Day boundary: {}", store.calendar());
            println!();
            println!("Contents:");
            println!("  Items:   {}", store.item_count());
            println!("  Ratings: {}", store.entry_count());
            if let Some(date) = last_rated {
                println!(
                    "  Last:    {}",
                    date.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")
                );
            }
            if let Some(e) = store.last_storage_error() {
                println!();
                println!("⚠ {}", e);
                if let Some(hint) = e.recovery_suggestion() {
                    println!("  {}", hint);
                }
            }
        }
    }

    Ok(())
}

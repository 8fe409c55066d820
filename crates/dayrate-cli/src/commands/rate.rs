//! Rate command handler

use anyhow::Result;

use dayrate_core::{sanitize_name, RatingStore};

use crate::output::{Output, OutputFormat};

/// Record today's rating for an item
pub fn rate(store: &mut RatingStore, name: String, value: i64, output: &Output) -> Result<()> {
    let id = sanitize_name(&name);
    let recorded = store.add_rating(&name, value)?;

    if let Some(e) = store.last_storage_error().filter(|_| recorded) {
        output.warn(&format!("Rating kept for this session only: {}", e));
        if let Some(hint) = e.recovery_suggestion() {
            output.warn(hint);
        }
    }

    match output.format {
        OutputFormat::Json => {
            let item = store.get_item(&id);
            println!(
                "{}",
                serde_json::json!({
                    "id": id,
                    "recorded": recorded,
                    "saved": recorded && store.last_storage_error().is_none(),
                    "average_rating": item.map(|i| i.average_rating()),
                    "count": item.map(|i| i.ratings.len()),
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", if recorded { "recorded" } else { "already-rated" });
        }
        OutputFormat::Human => {
            if recorded {
                output.success(&format!("Rated {} {}", id, value));
                if let Some(item) = store.get_item(&id) {
                    println!(
                        "  average {:.2} over {} day(s)",
                        item.average_rating(),
                        item.ratings.len()
                    );
                }
            } else {
                println!("{} was already rated today.", id);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayrate_core::Calendar;
    use tempfile::TempDir;

    #[test]
    fn test_rate_then_repeat() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = RatingStore::open_in(temp_dir.path(), Calendar::Local);
        let output = Output::new(OutputFormat::Quiet);

        rate(&mut store, "Coffee☕".to_string(), 4, &output).unwrap();
        rate(&mut store, "Coffee☕".to_string(), 1, &output).unwrap();

        let item = store.get_item("Coffee-").unwrap();
        assert_eq!(item.ratings.len(), 1);
        assert_eq!(item.ratings[0].value, 4);
    }

    #[test]
    fn test_rate_out_of_range_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = RatingStore::open_in(temp_dir.path(), Calendar::Local);
        let output = Output::new(OutputFormat::Quiet);

        let err = rate(&mut store, "tea".to_string(), 7, &output).unwrap_err();
        assert!(err.to_string().contains("out of range"));
        assert!(store.list_items().is_empty());
    }
}

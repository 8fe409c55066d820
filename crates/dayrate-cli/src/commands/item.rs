//! Item command handlers

use anyhow::{bail, Result};

use dayrate_core::{sanitize_name, RatingStore};

use crate::output::Output;
use crate::prompt::confirm;

/// List all items, most recently rated first
pub fn list(store: &RatingStore, output: &Output) -> Result<()> {
    output.print_items(store.list_items());
    Ok(())
}

/// Show one item's history
pub fn show(store: &RatingStore, name: String, output: &Output) -> Result<()> {
    let Some(item) = store.get_item(&name) else {
        bail!("Nothing rated as: {}", sanitize_name(&name));
    };

    output.print_item(item);
    Ok(())
}

/// Delete an item and its history
pub fn delete(store: &mut RatingStore, name: String, output: &Output) -> Result<()> {
    let id = sanitize_name(&name);

    let Some(item) = store.get_item(&name) else {
        output.message(&format!("Nothing rated as: {}", id));
        return Ok(());
    };

    // Confirm deletion
    if output.should_prompt() {
        println!(
            "Delete {} and its {} rating(s)?",
            item.name,
            item.ratings.len()
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.delete_item(&name);

    if let Some(e) = store.last_storage_error() {
        output.warn(&format!("Record could not be removed and may reappear: {}", e));
    }
    output.success(&format!("Deleted {}", id));

    Ok(())
}

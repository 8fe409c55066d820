//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use dayrate_core::{RatingEntry, RatingItem};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// JSON view of an item, including derived fields
#[derive(Debug, Serialize)]
struct ItemView<'a> {
    id: &'a str,
    name: &'a str,
    average_rating: f64,
    last_rated: Option<DateTime<Utc>>,
    ratings: &'a [RatingEntry],
}

impl<'a> From<&'a RatingItem> for ItemView<'a> {
    fn from(item: &'a RatingItem) -> Self {
        Self {
            id: &item.id,
            name: &item.name,
            average_rating: item.average_rating(),
            last_rated: item.ratings.last().map(|entry| entry.date),
            ratings: &item.ratings,
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a single item with its full history
    pub fn print_item(&self, item: &RatingItem) {
        match self.format {
            OutputFormat::Human => {
                println!("Name:     {}", item.name);
                println!("Average:  {:.2}", item.average_rating());
                println!("Ratings:  {}", item.ratings.len());
                if let Some(entry) = item.ratings.last() {
                    println!("Last:     {}", format_local(entry.date));
                }
                println!();
                println!("── History ──");
                for entry in item.ratings.iter().rev() {
                    println!(
                        "{}  {}  {}",
                        format_local(entry.date),
                        entry.value,
                        stars(entry.value)
                    );
                }
            }
            OutputFormat::Json => {
                print_json(&ItemView::from(item));
            }
            OutputFormat::Quiet => {
                println!("{}", item.id);
            }
        }
    }

    /// Print a list of items
    pub fn print_items(&self, items: &[RatingItem]) {
        match self.format {
            OutputFormat::Human => {
                if items.is_empty() {
                    println!("Nothing rated yet.");
                    return;
                }
                for item in items {
                    let last = item
                        .ratings
                        .last()
                        .map(|entry| format_local_date(entry.date))
                        .unwrap_or_else(|| "never".to_string());
                    println!(
                        "{:<30} | {:>4.1} {} | {:>3}x | {}",
                        truncate(&item.name, 30),
                        item.average_rating(),
                        stars(item.average_rating().round() as i64),
                        item.ratings.len(),
                        last
                    );
                }
                println!("\n{} item(s)", items.len());
            }
            OutputFormat::Json => {
                let views: Vec<ItemView> = items.iter().map(ItemView::from).collect();
                print_json(&views);
            }
            OutputFormat::Quiet => {
                for item in items {
                    println!("{}", item.id);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a warning to stderr (suppressed in quiet mode)
    pub fn warn(&self, message: &str) {
        if !self.is_quiet() {
            eprintln!("⚠ {}", message);
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

fn format_local(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn format_local_date(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// Five-slot bar, filled up to `value`
fn stars(value: i64) -> String {
    let filled = value.clamp(0, 5) as usize;
    format!("{}{}", "●".repeat(filled), "○".repeat(5 - filled))
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

//! Table and JSON output helpers.

use anyhow::Result;
use serde::Serialize;

use crate::content::Post;

/// Truncate to `max` characters, marking the cut with "..."
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }

    let keep = max.saturating_sub(3);
    let head: String = s.chars().take(keep).collect();
    format!("{}...", head)
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print posts as a fixed-width table
pub fn print_post_table(posts: &[Post]) {
    println!("{:<12} {:<10} {:<28} {:<40}", "DATE", "CATEGORY", "SLUG", "TITLE");
    println!("{}", "-".repeat(92));

    for post in posts {
        println!(
            "{:<12} {:<10} {:<28} {:<40}",
            truncate(&post.date, 12),
            truncate(&post.category, 10),
            truncate(post.slug.as_str(), 28),
            truncate(&post.title, 40)
        );
    }
}

//! Ad command handlers: offline preview and read-only listing.

use museboard_db::{AdListFilters, AdRow};
use sqlx::SqlitePool;

/// Longest title shown in the listing before it is cut with an ellipsis.
const TITLE_WIDTH: usize = 48;

pub(crate) fn run_preview(category: &str, description: &str) {
    let copy = museboard_core::generate_ad_copy(category, description);
    println!("{}", copy.title);
    println!();
    println!("{}", copy.content);
}

/// Print stored ads, newest first. Never counts as a view.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_list(
    pool: &SqlitePool,
    category: Option<&str>,
    limit: i64,
) -> anyhow::Result<()> {
    let rows = museboard_db::list_ads(pool, AdListFilters { category, limit }).await?;

    if rows.is_empty() {
        println!(
            "no ads found{}",
            category
                .map(|c| format!(" in category '{c}'"))
                .unwrap_or_default()
        );
        return Ok(());
    }

    println!(
        "{:<8}{:<14}{:<18}{:<8}{:<8}TITLE",
        "ID", "CATEGORY", "CREATED", "VIEWS", "LIKES"
    );
    for row in &rows {
        println!("{}", format_row(row));
    }

    Ok(())
}

fn format_row(row: &AdRow) -> String {
    format!(
        "{:<8}{:<14}{:<18}{:<8}{:<8}{}",
        row.id,
        row.category,
        row.created_at.format("%Y-%m-%d %H:%M"),
        row.views,
        row.likes,
        truncate_title(&row.title, TITLE_WIDTH)
    )
}

fn truncate_title(title: &str, width: usize) -> String {
    if title.chars().count() <= width {
        return title.to_string();
    }
    let kept: String = title.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}\u{2026}")
}

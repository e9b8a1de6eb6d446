//! Database operations for the `ads` table.
//!
//! Every function issues exactly one statement, so each call is atomic on its
//! own and holds a pooled connection only for that statement.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::DbError;

/// Category filter value meaning "no filter".
pub const ALL_CATEGORIES: &str = "all";

const AD_COLUMNS: &str = "id, title, content, category, format, tone, created_at, views, likes";

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `ads` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AdRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
    pub format: String,
    pub tone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub views: i64,
    pub likes: i64,
}

/// Column values for a new ad. `id`, counters, and `created_at` are assigned on insert.
#[derive(Debug, Clone, Copy)]
pub struct NewAd<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub category: &'a str,
    pub format: &'a str,
    pub tone: Option<&'a str>,
}

#[derive(Debug, Clone, Copy)]
pub struct AdListFilters<'a> {
    /// Exact category match. `None`, empty, or [`ALL_CATEGORIES`] disables the filter.
    pub category: Option<&'a str>,
    pub limit: i64,
}

impl AdListFilters<'_> {
    fn category_filter(&self) -> Option<&str> {
        self.category
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
    }
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Inserts a new ad with zeroed counters and `created_at = now`.
///
/// The returned row comes from `RETURNING`, so it is never counted as a view.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn create_ad(pool: &SqlitePool, ad: NewAd<'_>) -> Result<AdRow, DbError> {
    let row = sqlx::query_as::<_, AdRow>(&format!(
        "INSERT INTO ads (title, content, category, format, tone, created_at, views, likes) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, 0) \
         RETURNING {AD_COLUMNS}"
    ))
    .bind(ad.title)
    .bind(ad.content)
    .bind(ad.category)
    .bind(ad.format)
    .bind(ad.tone)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Increments `views` and returns the row with the post-increment count.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no ad has this `id`, or [`DbError::Sqlx`]
/// if the update fails.
pub async fn record_view(pool: &SqlitePool, id: i64) -> Result<AdRow, DbError> {
    let row = sqlx::query_as::<_, AdRow>(&format!(
        "UPDATE ads SET views = views + 1 WHERE id = ?1 RETURNING {AD_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    Ok(row)
}

/// Increments `likes` and returns the new count.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no ad has this `id`, or [`DbError::Sqlx`]
/// if the update fails.
pub async fn like_ad(pool: &SqlitePool, id: i64) -> Result<i64, DbError> {
    let likes = sqlx::query_scalar::<_, i64>(
        "UPDATE ads SET likes = likes + 1 WHERE id = ?1 RETURNING likes",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    Ok(likes)
}

/// Permanently removes an ad. Its id is never handed out again.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no ad has this `id`, or [`DbError::Sqlx`]
/// if the delete fails.
pub async fn delete_ad(pool: &SqlitePool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM ads WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Fetches a single ad without touching its counters.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no ad has this `id`, or [`DbError::Sqlx`]
/// if the query fails.
pub async fn find_ad(pool: &SqlitePool, id: i64) -> Result<AdRow, DbError> {
    let row = sqlx::query_as::<_, AdRow>(&format!("SELECT {AD_COLUMNS} FROM ads WHERE id = ?1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound)?;

    Ok(row)
}

/// Returns up to `limit` ads, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_ads(
    pool: &SqlitePool,
    filters: AdListFilters<'_>,
) -> Result<Vec<AdRow>, DbError> {
    let rows = sqlx::query_as::<_, AdRow>(&format!(
        "SELECT {AD_COLUMNS} FROM ads \
         WHERE (?1 IS NULL OR category = ?1) \
         ORDER BY created_at DESC, id DESC \
         LIMIT ?2"
    ))
    .bind(filters.category_filter())
    .bind(filters.limit.max(0))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

//! Repository tests for museboard-db.
//!
//! Each test opens its own in-memory SQLite database, so no external
//! database or environment setup is needed.

use museboard_core::{AppConfig, Environment};
use museboard_db::{
    connect_in_memory, connect_pool, create_ad, delete_ad, find_ad, init_schema, like_ad,
    list_ads, record_view, AdListFilters, AdRow, DbError, NewAd, PoolConfig, ALL_CATEGORIES,
};
use sqlx::SqlitePool;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn fresh_pool() -> SqlitePool {
    let pool = connect_in_memory().await.expect("open in-memory database");
    init_schema(&pool).await.expect("init schema");
    pool
}

async fn insert_ad(pool: &SqlitePool, title: &str, category: &str) -> AdRow {
    create_ad(
        pool,
        NewAd {
            title,
            content: "Body copy",
            category,
            format: "social_media",
            tone: Some("persuasive"),
        },
    )
    .await
    .unwrap_or_else(|e| panic!("create_ad failed for '{title}': {e}"))
}

// ---------------------------------------------------------------------------
// Pool configuration
// ---------------------------------------------------------------------------

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "sqlite://museboard.db".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8000),
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        max_list_limit: 200,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

// ---------------------------------------------------------------------------
// create / find
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_ad_returns_populated_row_with_zero_counters() {
    let pool = fresh_pool().await;
    let row = insert_ad(&pool, "Step Into Style: candles", "fashion").await;

    assert!(row.id > 0);
    assert_eq!(row.title, "Step Into Style: candles");
    assert_eq!(row.content, "Body copy");
    assert_eq!(row.category, "fashion");
    assert_eq!(row.format, "social_media");
    assert_eq!(row.tone.as_deref(), Some("persuasive"));
    assert_eq!(row.views, 0);
    assert_eq!(row.likes, 0);
}

#[tokio::test]
async fn create_ad_accepts_missing_tone() {
    let pool = fresh_pool().await;
    let row = create_ad(
        &pool,
        NewAd {
            title: "t",
            content: "c",
            category: "general",
            format: "banner",
            tone: None,
        },
    )
    .await
    .expect("create without tone");
    assert!(row.tone.is_none());
}

#[tokio::test]
async fn find_ad_does_not_increment_views() {
    let pool = fresh_pool().await;
    let created = insert_ad(&pool, "quiet read", "tech").await;

    let first = find_ad(&pool, created.id).await.expect("find");
    let second = find_ad(&pool, created.id).await.expect("find again");
    assert_eq!(first, created);
    assert_eq!(second.views, 0);
}

#[tokio::test]
async fn find_ad_missing_is_not_found() {
    let pool = fresh_pool().await;
    assert!(matches!(find_ad(&pool, 404).await, Err(DbError::NotFound)));
}

// ---------------------------------------------------------------------------
// counters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn record_view_increments_once_per_call() {
    let pool = fresh_pool().await;
    let created = insert_ad(&pool, "viewed", "tech").await;

    for expected in 1..=3 {
        let row = record_view(&pool, created.id).await.expect("record view");
        assert_eq!(row.views, expected);
        assert_eq!(row.title, created.title);
        assert_eq!(row.created_at, created.created_at);
    }
}

#[tokio::test]
async fn record_view_missing_is_not_found() {
    let pool = fresh_pool().await;
    assert!(matches!(
        record_view(&pool, 999_999).await,
        Err(DbError::NotFound)
    ));
}

#[tokio::test]
async fn like_ad_returns_running_total() {
    let pool = fresh_pool().await;
    let created = insert_ad(&pool, "liked", "courses").await;

    assert_eq!(like_ad(&pool, created.id).await.expect("like"), 1);
    assert_eq!(like_ad(&pool, created.id).await.expect("like"), 2);

    let row = find_ad(&pool, created.id).await.expect("find");
    assert_eq!(row.likes, 2);
    assert_eq!(row.views, 0, "likes must not touch views");
}

#[tokio::test]
async fn like_ad_missing_is_not_found() {
    let pool = fresh_pool().await;
    assert!(matches!(like_ad(&pool, 999_999).await, Err(DbError::NotFound)));
}

// ---------------------------------------------------------------------------
// delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_ad_is_terminal() {
    let pool = fresh_pool().await;
    let created = insert_ad(&pool, "doomed", "fashion").await;

    delete_ad(&pool, created.id).await.expect("delete");

    assert!(matches!(find_ad(&pool, created.id).await, Err(DbError::NotFound)));
    assert!(matches!(like_ad(&pool, created.id).await, Err(DbError::NotFound)));
    assert!(matches!(
        delete_ad(&pool, created.id).await,
        Err(DbError::NotFound)
    ));
}

#[tokio::test]
async fn deleted_ids_are_never_reused() {
    let pool = fresh_pool().await;
    let first = insert_ad(&pool, "first", "tech").await;
    delete_ad(&pool, first.id).await.expect("delete");

    let second = insert_ad(&pool, "second", "tech").await;
    assert!(second.id > first.id, "id {} was reused", second.id);
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_ads_is_newest_first_and_respects_limit() {
    let pool = fresh_pool().await;
    let a = insert_ad(&pool, "a", "tech").await;
    let b = insert_ad(&pool, "b", "fashion").await;
    let c = insert_ad(&pool, "c", "tech").await;

    let all = list_ads(
        &pool,
        AdListFilters {
            category: None,
            limit: 50,
        },
    )
    .await
    .expect("list");
    let ids: Vec<i64> = all.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![c.id, b.id, a.id]);

    let limited = list_ads(
        &pool,
        AdListFilters {
            category: None,
            limit: 2,
        },
    )
    .await
    .expect("list limited");
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].id, c.id);
}

#[tokio::test]
async fn list_ads_filters_by_exact_category() {
    let pool = fresh_pool().await;
    insert_ad(&pool, "t1", "tech").await;
    insert_ad(&pool, "f1", "fashion").await;
    insert_ad(&pool, "t2", "tech").await;
    insert_ad(&pool, "T3", "Tech").await;

    let tech = list_ads(
        &pool,
        AdListFilters {
            category: Some("tech"),
            limit: 50,
        },
    )
    .await
    .expect("list tech");
    assert_eq!(tech.len(), 2);
    assert!(tech.iter().all(|r| r.category == "tech"));

    let everything = list_ads(
        &pool,
        AdListFilters {
            category: Some(ALL_CATEGORIES),
            limit: 50,
        },
    )
    .await
    .expect("list all");
    assert_eq!(everything.len(), 4);
}

#[tokio::test]
async fn list_ads_with_zero_limit_is_empty() {
    let pool = fresh_pool().await;
    insert_ad(&pool, "only", "tech").await;

    let rows = list_ads(
        &pool,
        AdListFilters {
            category: None,
            limit: 0,
        },
    )
    .await
    .expect("list");
    assert!(rows.is_empty());
}

// ---------------------------------------------------------------------------
// file-backed pool
// ---------------------------------------------------------------------------

#[tokio::test]
async fn file_pool_keeps_every_concurrent_increment() {
    let dir = tempfile::tempdir().expect("temp dir");
    let url = format!("sqlite://{}", dir.path().join("ads.db").display());
    let config = PoolConfig {
        max_connections: 4,
        min_connections: 0,
        acquire_timeout_secs: 10,
    };

    let pool = connect_pool(&url, config)
        .await
        .expect("open file database (created if missing)");
    init_schema(&pool).await.expect("init schema");
    let created = insert_ad(&pool, "busy ad", "tech").await;

    let likes = (0..20).map(|_| {
        let pool = pool.clone();
        tokio::spawn(async move { like_ad(&pool, created.id).await })
    });
    let views = (0..5).map(|_| {
        let pool = pool.clone();
        tokio::spawn(async move {
            record_view(&pool, created.id)
                .await
                .map(|row| row.views)
        })
    });
    let handles: Vec<_> = likes.chain(views).collect();
    for handle in handles {
        handle.await.expect("task join").expect("counter update");
    }
    pool.close().await;

    let reopened = connect_pool(&url, config).await.expect("reopen database");
    let row = find_ad(&reopened, created.id).await.expect("find after reopen");
    assert_eq!(row.likes, 20);
    assert_eq!(row.views, 5);
    assert_eq!(row.title, "busy ad");
}

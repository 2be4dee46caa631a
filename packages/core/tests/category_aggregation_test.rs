//! Integration tests for category aggregation and listing queries
//!
//! Tests cover:
//! - Aggregation with the built-in catalog and with a configured one
//! - Cache refresh after store writes and explicit invalidation
//! - Concurrent readers sharing one cached list
//! - Quick access, recent updates and search through ContentService

use anyhow::Result;
use chrono::{TimeZone, Utc};
use courseway_core::{
    CategoryCatalog, ContentService, CourseConfig, InMemoryPageStore, Page, CATEGORY_KEY,
    QUICK_ACCESS_KEY, READ_TIME_KEY,
};
use futures::future::join_all;
use std::sync::Arc;
use tempfile::TempDir;

fn docs_pages() -> Vec<Page> {
    let at = |day| Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap();
    vec![
        Page::new_with_id("install", "docs", "start", "Installing", 1)
            .with_metadata(CATEGORY_KEY, "Getting Started")
            .with_metadata(READ_TIME_KEY, "4")
            .with_metadata(QUICK_ACCESS_KEY, "1")
            .with_published_at(at(1)),
        Page::new_with_id("first-site", "docs", "start", "Your first site", 2)
            .with_metadata(CATEGORY_KEY, "  getting started ")
            .with_metadata(READ_TIME_KEY, "ten")
            .with_published_at(at(3)),
        Page::new_with_id("azure", "docs", "deploy", "Deploying to Azure", 1)
            .with_metadata(CATEGORY_KEY, "Deploying")
            .with_metadata(QUICK_ACCESS_KEY, "2")
            .with_tag("cloud")
            .with_content("Push the **site** to [Azure](https://azure.microsoft.com).")
            .with_published_at(at(9)),
        Page::new_with_id("roadmap", "docs", "meta", "Roadmap", 1)
            .with_metadata(CATEGORY_KEY, "Roadmap")
            .with_published_at(at(5)),
        Page::new_with_id("draft", "docs", "meta", "Draft", 2).with_published_at(at(7)),
    ]
}

fn create_service(config: CourseConfig) -> (Arc<InMemoryPageStore>, ContentService) {
    let store = Arc::new(InMemoryPageStore::new(docs_pages()));
    let service = ContentService::new(store.clone(), config);
    (store, service)
}

// =========================================================================
// Aggregation Tests
// =========================================================================

#[tokio::test]
async fn test_categories_with_builtin_catalog() -> Result<()> {
    let (_store, service) = create_service(CourseConfig::default());

    let categories = service.categories().await?;
    let titles: Vec<&str> = categories.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Getting Started", "Deploying", "Roadmap"]);

    let started = &categories[0];
    assert_eq!(started.article_count, 2);
    // "ten" counts as 0 but the category still has a defined read time
    assert_eq!(started.read_time, Some(4));
    assert_eq!(started.icon, "rocket");
    assert_eq!(started.link, "/categories/getting started");

    let deploying = &categories[1];
    assert_eq!(deploying.icon, "cloud-arrow-up");
    assert_eq!(deploying.read_time, None);

    // Unknown title falls back
    assert_eq!(categories[2].icon, "link");
    assert_eq!(
        categories[2].description,
        "Explore our documentation for more information."
    );
    Ok(())
}

#[tokio::test]
async fn test_categories_with_configured_catalog() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("config.json");
    tokio::fs::write(
        &path,
        r#"{
            "category_link_prefix": "/topics/",
            "category_catalog": {
                "presets": { "Roadmap": { "icon": "map", "description": "Where we are headed." } },
                "fallbackIcon": "file"
            }
        }"#,
    )
    .await?;

    let config = CourseConfig::load(&path).await?;
    assert_eq!(config.category_catalog, {
        let mut expected = CategoryCatalog::empty().with_preset(
            "Roadmap",
            Some("map"),
            Some("Where we are headed."),
        );
        expected.fallback_icon = "file".to_string();
        expected
    });

    let (_store, service) = create_service(config);
    let categories = service.categories().await?;

    let roadmap = categories
        .iter()
        .find(|c| c.title == "Roadmap")
        .expect("Roadmap category");
    assert_eq!(roadmap.icon, "map");
    assert_eq!(roadmap.link, "/topics/roadmap");
    assert_eq!(categories[0].icon, "file");
    Ok(())
}

// =========================================================================
// Cache Tests
// =========================================================================

#[tokio::test]
async fn test_cache_follows_store_revision() -> Result<()> {
    let (store, service) = create_service(CourseConfig::default());

    let before = service.categories().await?;
    assert_eq!(service.category_cache_stats().await.revision, Some(1));

    let mut pages = docs_pages();
    pages.push(
        Page::new_with_id("faq", "docs", "meta", "FAQ", 3).with_metadata(CATEGORY_KEY, "FAQ"),
    );
    store.replace_pages(pages).await;

    let after = service.categories().await?;
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after[3].icon, "circle-question");
    assert_eq!(service.category_cache_stats().await.revision, Some(2));
    Ok(())
}

#[tokio::test]
async fn test_invalidate_recomputes_same_revision() -> Result<()> {
    let (_store, service) = create_service(CourseConfig::default());

    let first = service.categories().await?;
    service.invalidate_categories();
    assert!(service.category_cache_stats().await.is_invalidated);

    let second = service.categories().await?;
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_readers_agree() -> Result<()> {
    let (_store, service) = create_service(CourseConfig::default());
    let service = Arc::new(service);

    let reads = (0..8).map(|_| {
        let service = Arc::clone(&service);
        async move { service.categories().await }
    });

    let results = join_all(reads).await;
    let first = results[0].as_ref().map_err(|e| anyhow::anyhow!("{}", e))?;
    for result in &results {
        let categories = result.as_ref().map_err(|e| anyhow::anyhow!("{}", e))?;
        assert_eq!(categories, first);
    }
    Ok(())
}

// =========================================================================
// Listing and Search Tests
// =========================================================================

#[tokio::test]
async fn test_quick_access_and_recent_updates() -> Result<()> {
    let (_store, service) = create_service(CourseConfig {
        recent_updates_limit: 2,
        ..Default::default()
    });

    let quick: Vec<String> = service
        .quick_access_pages()
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(quick, vec!["install", "azure"]);

    let recent: Vec<String> = service
        .recent_updates()
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(recent, vec!["azure", "draft"]);
    Ok(())
}

#[tokio::test]
async fn test_category_pages_and_search() -> Result<()> {
    let (_store, service) = create_service(CourseConfig::default());

    let started: Vec<String> = service
        .category_pages("GETTING STARTED")
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(started, vec!["install", "first-site"]);

    let hits = service.search("Cloud", Some(10)).await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].page_id, "azure");
    assert_eq!(hits[0].category, "Deploying");
    assert_eq!(hits[0].excerpt, "Push the site to Azure.");

    assert!(service.search("  ", None).await?.is_empty());

    let uncategorized = service.search("draft", None).await?;
    assert_eq!(uncategorized[0].category, "Uncategorized");
    Ok(())
}

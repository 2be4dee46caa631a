//! Page search and listing queries
//!
//! Simple in-memory queries over a page snapshot: substring search, quick-access
//! shortcuts, recently updated pages, and category membership.

use crate::models::{Page, QUICK_ACCESS_KEY};
use crate::utils::excerpt;
use serde::{Deserialize, Serialize};

/// Category reported for pages that have none
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Maximum excerpt length in characters
pub const EXCERPT_LENGTH: usize = 160;

/// One search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub page_id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Tags joined with ", "
    pub tags: String,
    /// Plain-text start of the page body
    pub excerpt: String,
}

impl SearchResult {
    fn from_page(page: &Page) -> Self {
        Self {
            page_id: page.id.clone(),
            slug: page.effective_slug().to_string(),
            title: page.title.clone(),
            description: page.description.clone(),
            category: page.category().unwrap_or(UNCATEGORIZED).to_string(),
            tags: page.tags.join(", "),
            excerpt: excerpt(&page.content, EXCERPT_LENGTH),
        }
    }
}

fn matches_term(page: &Page, needle: &str) -> bool {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

    contains(&page.title)
        || contains(&page.description)
        || page.tags.iter().any(|t| contains(t))
        || page
            .metadata
            .iter()
            .any(|(k, v)| k.to_lowercase() == needle || v.to_lowercase() == needle)
}

/// Case-insensitive search over title, description and tags, plus exact
/// (case-insensitive) matches on metadata keys or values.
///
/// A blank term matches nothing. Results keep collection order.
pub fn search_pages(pages: &[Page], term: &str, max_results: Option<usize>) -> Vec<SearchResult> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    pages
        .iter()
        .filter(|p| matches_term(p, &needle))
        .take(max_results.unwrap_or(usize::MAX))
        .map(SearchResult::from_page)
        .collect()
}

/// Pages pinned for quick access (`quickAccess` > 0), by slot then id
pub fn quick_access_pages(pages: &[Page], limit: usize) -> Vec<Page> {
    let mut pinned: Vec<(u32, &Page)> = pages
        .iter()
        .filter_map(|p| match p.metadata_u32(QUICK_ACCESS_KEY) {
            Ok(Some(slot)) if slot > 0 => Some((slot, p)),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("{}; page not pinned", e);
                None
            }
        })
        .collect();

    pinned.sort_by(|(a_slot, a), (b_slot, b)| {
        a_slot.cmp(b_slot).then_with(|| a.id.cmp(&b.id))
    });
    pinned.into_iter().take(limit).map(|(_, p)| p.clone()).collect()
}

/// Most recently published/updated pages, newest first (ties by id)
pub fn recent_updates(pages: &[Page], limit: usize) -> Vec<Page> {
    let mut sorted: Vec<&Page> = pages.iter().collect();
    sorted.sort_by(|a, b| {
        b.published_at
            .cmp(&a.published_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    sorted.into_iter().take(limit).cloned().collect()
}

/// Pages whose category equals `category` (trimmed, case-insensitive), in
/// collection order
pub fn category_pages(pages: &[Page], category: &str) -> Vec<Page> {
    let wanted = category.trim().to_lowercase();
    pages
        .iter()
        .filter(|p| p.category().is_some_and(|c| c.to_lowercase() == wanted))
        .cloned()
        .collect()
}

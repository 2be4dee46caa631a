use serde::{Deserialize, Serialize};

/// Aggregated view over all pages sharing a (case-insensitive) category title.
///
/// Derived on demand from the page collection and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Display title; the first-encountered casing wins
    pub title: String,

    /// Icon reference (icon-set name, e.g. "circle-question")
    pub icon: String,

    pub description: String,

    /// Listing link, `{prefix}/{lowercased title}`
    pub link: String,

    /// Number of member pages, always at least 1
    pub article_count: usize,

    /// Sum of member read times; `None` until a member supplies one
    pub read_time: Option<u32>,
}

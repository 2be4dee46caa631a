//! Category Aggregator
//!
//! Folds a page collection into per-category summaries.
//!
//! # Rules
//!
//! - Pages without a non-blank `category` value are skipped
//! - Category identity is the trimmed, case-insensitive title; the first casing
//!   seen wins as display title and output keeps first-seen order
//! - `readTimeMinutes` that is missing or not a whole number counts as 0; the
//!   cumulative read time stays `None` until some member page supplies a
//!   parseable value
//! - Icon and description come from a [`CategoryCatalog`] keyed on the exact
//!   display title, with a generic fallback

use crate::models::{Category, Page};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Default listing link prefix (`/categories/{title}`)
pub const DEFAULT_CATEGORY_LINK_PREFIX: &str = "/categories";

const FALLBACK_ICON: &str = "link";
const FALLBACK_DESCRIPTION: &str = "Explore our documentation for more information.";

/// Icon and/or description registered for one category title
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryPreset {
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CategoryPreset {
    pub fn new(icon: Option<&str>, description: Option<&str>) -> Self {
        Self {
            icon: icon.map(str::to_string),
            description: description.map(str::to_string),
        }
    }
}

/// Immutable title → (icon, description) lookup with a fallback entry.
///
/// Lookups are exact and case-sensitive on the display title. A title with a
/// preset that lacks one of the two fields falls back for that field only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCatalog {
    #[serde(default)]
    pub presets: BTreeMap<String, CategoryPreset>,

    #[serde(default = "default_fallback_icon")]
    pub fallback_icon: String,

    #[serde(default = "default_fallback_description")]
    pub fallback_description: String,
}

fn default_fallback_icon() -> String {
    FALLBACK_ICON.to_string()
}

fn default_fallback_description() -> String {
    FALLBACK_DESCRIPTION.to_string()
}

impl Default for CategoryCatalog {
    /// The documentation site's built-in table
    fn default() -> Self {
        let entries: [(&str, Option<&str>, Option<&str>); 10] = [
            ("Quick Start", Some("rocket"), None),
            ("Authoring Content", Some("book"), None),
            (
                "Getting Started",
                Some("rocket"),
                Some("Everything you need to begin your journey. Installation guides, quick start tutorials, and basic concepts."),
            ),
            (
                "Using Blake",
                Some("code"),
                Some("Learn how to build sites and templates using Blake. From basic components to advanced features, find step-by-step guides."),
            ),
            ("Deploying to Azure", Some("cloud-arrow-up"), None),
            ("Deploying to GitHub", Some("cloud-arrow-up"), None),
            (
                "Deploying",
                Some("cloud-arrow-up"),
                Some("Understand how to deploy your Blake sites effectively. Covers hosting options, deployment strategies, and best practices."),
            ),
            (
                "Contributing",
                Some("gear"),
                Some("Internals of Blake and how to contribute. Learn about the build pipeline, code standards, and how to submit changes."),
            ),
            (
                "Meta",
                Some("circle-info"),
                Some("Meta information about Blake, including the philosophy behind the project, FAQ, and product roadmap."),
            ),
            ("FAQ", Some("circle-question"), None),
        ];

        let presets = entries
            .into_iter()
            .map(|(title, icon, description)| {
                (title.to_string(), CategoryPreset::new(icon, description))
            })
            .collect();

        Self {
            presets,
            fallback_icon: default_fallback_icon(),
            fallback_description: default_fallback_description(),
        }
    }
}

impl CategoryCatalog {
    /// Catalog with no presets; every title gets the fallback
    pub fn empty() -> Self {
        Self {
            presets: BTreeMap::new(),
            fallback_icon: default_fallback_icon(),
            fallback_description: default_fallback_description(),
        }
    }

    pub fn with_preset(
        mut self,
        title: impl Into<String>,
        icon: Option<&str>,
        description: Option<&str>,
    ) -> Self {
        self.presets
            .insert(title.into(), CategoryPreset::new(icon, description));
        self
    }

    pub fn icon_for(&self, title: &str) -> &str {
        self.presets
            .get(title)
            .and_then(|p| p.icon.as_deref())
            .unwrap_or(&self.fallback_icon)
    }

    pub fn description_for(&self, title: &str) -> &str {
        self.presets
            .get(title)
            .and_then(|p| p.description.as_deref())
            .unwrap_or(&self.fallback_description)
    }
}

/// Computes [`Category`] summaries from page collections
#[derive(Debug, Clone)]
pub struct CategoryAggregator {
    catalog: Arc<CategoryCatalog>,
    link_prefix: String,
}

impl Default for CategoryAggregator {
    fn default() -> Self {
        Self::new(Arc::new(CategoryCatalog::default()))
    }
}

impl CategoryAggregator {
    pub fn new(catalog: Arc<CategoryCatalog>) -> Self {
        Self {
            catalog,
            link_prefix: DEFAULT_CATEGORY_LINK_PREFIX.to_string(),
        }
    }

    pub fn with_link_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.link_prefix = prefix.into();
        self
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    fn link_for(&self, title: &str) -> String {
        format!(
            "{}/{}",
            self.link_prefix.trim_end_matches('/'),
            title.to_lowercase()
        )
    }

    /// Aggregate categories in first-encountered order
    pub fn aggregate(&self, pages: &[Page]) -> Vec<Category> {
        let mut categories: Vec<Category> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for page in pages {
            let Some(title) = page.category() else {
                continue;
            };

            let read_time = match page.read_time_minutes() {
                Ok(minutes) => minutes,
                Err(e) => {
                    tracing::debug!("{}; counting as 0 minutes", e);
                    None
                }
            };

            let key = title.to_lowercase();
            match index.get(&key) {
                Some(&i) => {
                    let category = &mut categories[i];
                    category.article_count += 1;
                    category.read_time = match (category.read_time, read_time) {
                        (Some(total), Some(minutes)) => Some(total.saturating_add(minutes)),
                        (total, None) => total,
                        (None, minutes) => minutes,
                    };
                }
                None => {
                    index.insert(key, categories.len());
                    categories.push(Category {
                        title: title.to_string(),
                        icon: self.catalog.icon_for(title).to_string(),
                        description: self.catalog.description_for(title).to_string(),
                        link: self.link_for(title),
                        article_count: 1,
                        read_time,
                    });
                }
            }
        }

        tracing::debug!(
            "Aggregated {} categories from {} pages",
            categories.len(),
            pages.len()
        );
        categories
    }
}

//! Ordering edit types
//!
//! `ModulePosition`/`ChapterPosition` are the raw, untrusted ranks submitted by
//! the course editor; `CanonicalOrder` is the normalized, gap-free ordering that
//! gets written back to the store.

use serde::{Deserialize, Serialize};

/// Submitted position of a module within its course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModulePosition {
    pub module_id: String,
    /// Client-supplied 1-based rank; may contain gaps, duplicates or junk
    pub position: i64,
}

impl ModulePosition {
    pub fn new(module_id: impl Into<String>, position: i64) -> Self {
        Self {
            module_id: module_id.into(),
            position,
        }
    }
}

/// Submitted position of a chapter (page) within a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterPosition {
    pub chapter_id: String,
    /// Target module; may differ from the chapter's current module
    pub module_id: String,
    pub position: i64,
}

impl ChapterPosition {
    pub fn new(chapter_id: impl Into<String>, module_id: impl Into<String>, position: i64) -> Self {
        Self {
            chapter_id: chapter_id.into(),
            module_id: module_id.into(),
            position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRank {
    pub module_id: String,
    pub rank: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterRank {
    pub chapter_id: String,
    pub module_id: String,
    pub rank: i64,
}

/// Normalized ordering of a whole course.
///
/// Module ranks are exactly `1..=modules.len()` and chapter ranks are `1..=M`
/// within each module. `modules` is listed in rank order; `chapters` is grouped
/// by module (in module rank order) and in rank order within each group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalOrder {
    pub course_id: String,
    pub modules: Vec<ModuleRank>,
    pub chapters: Vec<ChapterRank>,
}

impl CanonicalOrder {
    /// Rank assigned to a module, if it is part of this order
    pub fn module_rank(&self, module_id: &str) -> Option<i64> {
        self.modules
            .iter()
            .find(|m| m.module_id == module_id)
            .map(|m| m.rank)
    }

    /// Rank and target module assigned to a chapter
    pub fn chapter_rank(&self, chapter_id: &str) -> Option<&ChapterRank> {
        self.chapters.iter().find(|c| c.chapter_id == chapter_id)
    }

    /// Chapters of one module in rank order
    pub fn chapters_of<'a>(&'a self, module_id: &'a str) -> impl Iterator<Item = &'a ChapterRank> {
        self.chapters.iter().filter(move |c| c.module_id == module_id)
    }
}

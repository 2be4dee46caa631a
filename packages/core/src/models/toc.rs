//! Table of contents and navigation value types
//!
//! These are derived, ephemeral views built fresh from a page collection on
//! every request. They are never persisted.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What a [`TocNode`] represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TocNodeKind {
    Course,
    Module,
    Page,
}

/// A node of the course → module → page tree, children in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TocNode {
    pub kind: TocNodeKind,
    pub id: String,
    pub title: String,

    /// Ordering value the node was sorted by (page/module order; 0 for courses)
    pub order: i64,

    /// Set on page nodes the requesting user has finished
    #[serde(default)]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub completed: bool,

    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TocNode>,
}

impl TocNode {
    pub fn leaf(
        kind: TocNodeKind,
        id: impl Into<String>,
        title: impl Into<String>,
        order: i64,
    ) -> Self {
        Self {
            kind,
            id: id.into(),
            title: title.into(),
            order,
            completed: false,
            children: Vec::new(),
        }
    }

    /// Flag every page node of this subtree whose id is in `completed`
    pub fn mark_completed(&mut self, completed: &HashSet<String>) {
        if self.kind == TocNodeKind::Page {
            self.completed = completed.contains(&self.id);
        }
        for child in &mut self.children {
            child.mark_completed(completed);
        }
    }

    /// Number of page nodes in this subtree (including self)
    pub fn page_count(&self) -> usize {
        let own = usize::from(self.kind == TocNodeKind::Page);
        own + self.children.iter().map(TocNode::page_count).sum::<usize>()
    }

    /// Page ids of this subtree in display order
    pub fn page_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.collect_page_ids(&mut ids);
        ids
    }

    fn collect_page_ids<'a>(&'a self, out: &mut Vec<&'a str>) {
        if self.kind == TocNodeKind::Page {
            out.push(&self.id);
        }
        for child in &self.children {
            child.collect_page_ids(out);
        }
    }
}

/// `(id, title)` pair pointing at a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub id: String,
    pub title: String,
}

impl NavLink {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Previous/next links for a page within its course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    /// The resolved page itself
    pub current: NavLink,

    /// Module the page belongs to (used to highlight the active module)
    pub module_id: String,

    pub previous: Option<NavLink>,
    pub next: Option<NavLink>,

    /// 1-based position within the course sequence
    pub position: usize,

    /// Number of pages in the course
    pub total: usize,

    /// Whether the requesting user has finished `current`
    #[serde(default)]
    pub completed: bool,
}

impl Navigation {
    pub fn is_first(&self) -> bool {
        self.previous.is_none()
    }

    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_tree() -> TocNode {
        let mut module = TocNode::leaf(TocNodeKind::Module, "m1", "Basics", 1);
        module.children.push(TocNode::leaf(TocNodeKind::Page, "p1", "One", 1));
        module.children.push(TocNode::leaf(TocNodeKind::Page, "p2", "Two", 2));

        let mut course = TocNode::leaf(TocNodeKind::Course, "c1", "Course", 0);
        course.children.push(module);
        course
    }

    #[test]
    fn test_page_count_and_ids() {
        let course = sample_tree();
        assert_eq!(course.page_count(), 2);
        assert_eq!(course.page_ids(), vec!["p1", "p2"]);
    }

    #[test]
    fn test_mark_completed_flags_pages_only() {
        let mut course = sample_tree();
        course.mark_completed(&HashSet::from(["p2".to_string(), "m1".to_string()]));

        let module = &course.children[0];
        assert!(!module.completed);
        assert!(!module.children[0].completed);
        assert!(module.children[1].completed);

        let value = serde_json::to_value(&module.children[1]).unwrap();
        assert_eq!(value["completed"], json!(true));
    }

    #[test]
    fn test_toc_serialization_skips_empty_children() {
        let leaf = TocNode::leaf(TocNodeKind::Page, "p1", "One", 1);
        let value = serde_json::to_value(&leaf).unwrap();
        assert_eq!(value, json!({ "kind": "page", "id": "p1", "title": "One", "order": 1 }));
    }
}

//! Table of Contents Builder
//!
//! Converts a flat page collection into the course → module → page tree.
//!
//! # Ordering Rules
//!
//! - **Courses**: explicit course order first (if configured), then by course id
//! - **Modules**: by module order ascending, ties by module id
//! - **Pages**: by page order ascending, ties by page id
//!
//! A module's order is the smallest `module_order` found on its pages, and its
//! title comes from its first page. Because every sort key ends in an
//! identifier, the output does not depend on the iteration order of the input.

use crate::models::{Page, TocNode, TocNodeKind};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// One module of a course with its pages in display order
#[derive(Debug, Clone)]
pub struct ModuleGroup<'a> {
    pub module_id: &'a str,
    pub order: i64,
    pub pages: Vec<&'a Page>,
}

impl<'a> ModuleGroup<'a> {
    pub fn title(&self) -> &'a str {
        self.pages
            .first()
            .copied()
            .map(|p| p.module_title.as_str())
            .filter(|t| !t.is_empty())
            .unwrap_or(self.module_id)
    }
}

fn page_cmp(a: &Page, b: &Page) -> Ordering {
    a.page_order
        .cmp(&b.page_order)
        .then_with(|| a.id.cmp(&b.id))
        .then_with(|| a.title.cmp(&b.title))
}

/// Group the pages of one course into modules, both in display order.
///
/// Pages of other courses are ignored, so callers may pass the whole
/// collection.
pub fn course_modules<'a>(pages: &'a [Page], course_id: &str) -> Vec<ModuleGroup<'a>> {
    group_modules(pages.iter().filter(|p| p.course_id == course_id))
}

fn group_modules<'a>(pages: impl Iterator<Item = &'a Page>) -> Vec<ModuleGroup<'a>> {
    let mut by_module: BTreeMap<&'a str, Vec<&'a Page>> = BTreeMap::new();
    for page in pages {
        by_module.entry(page.module_id.as_str()).or_default().push(page);
    }

    let mut modules: Vec<ModuleGroup<'a>> = by_module
        .into_iter()
        .map(|(module_id, mut pages)| {
            pages.sort_by(|a, b| page_cmp(a, b));
            let order = pages.iter().map(|p| p.module_order).min().unwrap_or(0);
            ModuleGroup {
                module_id,
                order,
                pages,
            }
        })
        .collect();

    modules.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then_with(|| a.module_id.cmp(b.module_id))
    });
    modules
}

/// Flattened page sequence of one course, in the same order the tree shows it
pub fn course_sequence<'a>(pages: &'a [Page], course_id: &str) -> Vec<&'a Page> {
    course_modules(pages, course_id)
        .into_iter()
        .flat_map(|module| module.pages)
        .collect()
}

/// Builds table-of-contents trees from page collections
#[derive(Debug, Clone, Default)]
pub struct TocBuilder {
    course_order: Vec<String>,
}

impl TocBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the display order of the listed courses; unlisted courses follow,
    /// sorted by id
    pub fn with_course_order(mut self, course_order: Vec<String>) -> Self {
        self.course_order = course_order;
        self
    }

    /// Build the full tree, one root node per course.
    ///
    /// Unlisted courses sort by id rather than by first-appearing page, so the
    /// tree stays the same however the input is shuffled.
    pub fn build(&self, pages: &[Page]) -> Vec<TocNode> {
        let mut by_course: BTreeMap<&str, Vec<&Page>> = BTreeMap::new();
        for page in pages {
            by_course.entry(page.course_id.as_str()).or_default().push(page);
        }

        // A repeated id keeps its first position
        let mut rank: HashMap<&str, usize> = HashMap::new();
        for (i, id) in self.course_order.iter().enumerate() {
            rank.entry(id.as_str()).or_insert(i);
        }

        let mut course_ids: Vec<&str> = by_course.keys().copied().collect();
        // Listed courses by position; the rest keep BTreeMap (id) order behind them
        course_ids.sort_by_key(|id| rank.get(id).copied().unwrap_or(usize::MAX));

        let toc: Vec<TocNode> = course_ids
            .into_iter()
            .map(|course_id| {
                let modules = group_modules(by_course[course_id].iter().copied());
                course_node(course_id, modules)
            })
            .collect();

        tracing::debug!(
            "Built table of contents: {} courses, {} pages",
            toc.len(),
            pages.len()
        );
        toc
    }

    /// Tree of a single course, or `None` if no page belongs to it
    pub fn build_course(&self, pages: &[Page], course_id: &str) -> Option<TocNode> {
        let modules = course_modules(pages, course_id);
        if modules.is_empty() {
            return None;
        }
        Some(course_node(course_id, modules))
    }
}

fn course_node(course_id: &str, modules: Vec<ModuleGroup<'_>>) -> TocNode {
    let title = modules
        .first()
        .and_then(|m| m.pages.first())
        .map(|p| p.course_title.as_str())
        .filter(|t| !t.is_empty())
        .unwrap_or(course_id);

    let mut course = TocNode::leaf(TocNodeKind::Course, course_id, title, 0);
    course.children = modules
        .iter()
        .map(|module| {
            let mut node =
                TocNode::leaf(TocNodeKind::Module, module.module_id, module.title(), module.order);
            node.children = module
                .pages
                .iter()
                .map(|p| TocNode::leaf(TocNodeKind::Page, &p.id, &p.title, p.page_order))
                .collect();
            node
        })
        .collect();
    course
}

/// Build the tree with default options
pub fn build_toc(pages: &[Page]) -> Vec<TocNode> {
    TocBuilder::default().build(pages)
}

//! Course order normalization
//!
//! Turns the raw positions submitted by the course editor into a
//! [`CanonicalOrder`]: every identifier checked against the course, ranks made
//! contiguous, and anything the client left out appended in its current place.
//!
//! # Normalization Rules
//!
//! - **Modules**: stable sort by submitted position (ties keep submission
//!   order), omitted modules follow in their current order, ranks `1..=N`
//! - **Chapters**: grouped by target module, stable sort by submitted position,
//!   omitted chapters follow in their current order, ranks `1..=M` per module
//! - A module left without chapters is dropped from the result
//!
//! Nothing here touches the store; see
//! [`OrderPersistQueue`](crate::operations::OrderPersistQueue) for the write.

use crate::models::{
    CanonicalOrder, ChapterPosition, ChapterRank, ModulePosition, ModuleRank, Page,
};
use crate::operations::{OrderError, ReferenceKind};
use crate::services::course_modules;
use std::collections::{HashMap, HashSet};

/// Validates and normalizes ordering edits against a page collection
#[derive(Debug, Clone, Copy)]
pub struct OrderEditor<'a> {
    pages: &'a [Page],
}

impl<'a> OrderEditor<'a> {
    /// Editor over the current pages; pages of other courses may be included
    pub fn new(pages: &'a [Page]) -> Self {
        Self { pages }
    }

    /// Normalize a submitted module and chapter ordering for one course.
    ///
    /// # Errors
    ///
    /// - `CourseNotFound` if no page belongs to `course_id`
    /// - `ForeignReference` if a module or chapter is not part of the course
    /// - `DuplicateReference` if an identifier appears twice in one list
    ///
    /// # Examples
    ///
    /// ```
    /// use courseway_core::models::{ChapterPosition, ModulePosition, Page};
    /// use courseway_core::operations::OrderEditor;
    ///
    /// let pages = vec![
    ///     Page::new_with_id("intro", "rust", "basics", "Intro", 1),
    ///     Page::new_with_id("traits", "rust", "advanced", "Traits", 1),
    /// ];
    ///
    /// let order = OrderEditor::new(&pages)
    ///     .apply_order(
    ///         "rust",
    ///         &[ModulePosition::new("advanced", 7), ModulePosition::new("basics", 9)],
    ///         &[ChapterPosition::new("intro", "basics", -3)],
    ///     )
    ///     .unwrap();
    ///
    /// assert_eq!(order.module_rank("advanced"), Some(1));
    /// assert_eq!(order.module_rank("basics"), Some(2));
    /// assert_eq!(order.chapter_rank("intro").unwrap().rank, 1);
    /// ```
    pub fn apply_order(
        &self,
        course_id: &str,
        module_order: &[ModulePosition],
        chapter_order: &[ChapterPosition],
    ) -> Result<CanonicalOrder, OrderError> {
        let current = course_modules(self.pages, course_id);
        if current.is_empty() {
            return Err(OrderError::course_not_found(course_id));
        }

        let known_modules: HashSet<&str> = current.iter().map(|m| m.module_id).collect();
        let known_chapters: HashSet<&str> = current
            .iter()
            .flat_map(|m| m.pages.iter().map(|p| p.id.as_str()))
            .collect();

        // 1. Validate membership and uniqueness
        let mut seen_modules = HashSet::new();
        for submitted in module_order {
            let id = submitted.module_id.as_str();
            if !known_modules.contains(id) {
                return Err(OrderError::foreign_reference(
                    course_id,
                    ReferenceKind::Module,
                    id,
                ));
            }
            if !seen_modules.insert(id) {
                return Err(OrderError::duplicate_reference(ReferenceKind::Module, id));
            }
        }

        let mut seen_chapters = HashSet::new();
        for submitted in chapter_order {
            let id = submitted.chapter_id.as_str();
            if !known_chapters.contains(id) {
                return Err(OrderError::foreign_reference(
                    course_id,
                    ReferenceKind::Chapter,
                    id,
                ));
            }
            if !known_modules.contains(submitted.module_id.as_str()) {
                return Err(OrderError::foreign_reference(
                    course_id,
                    ReferenceKind::Module,
                    &submitted.module_id,
                ));
            }
            if !seen_chapters.insert(id) {
                return Err(OrderError::duplicate_reference(ReferenceKind::Chapter, id));
            }
        }

        // 2. Module sequence: submitted by position, then the omitted ones
        let mut submitted_modules: Vec<&ModulePosition> = module_order.iter().collect();
        submitted_modules.sort_by_key(|m| m.position);
        let module_sequence: Vec<&str> = submitted_modules
            .iter()
            .map(|m| m.module_id.as_str())
            .chain(
                current
                    .iter()
                    .map(|m| m.module_id)
                    .filter(|id| !seen_modules.contains(id)),
            )
            .collect();

        // 3. Chapters per target module: submitted by position, then the omitted ones
        let mut submitted_chapters: Vec<&ChapterPosition> = chapter_order.iter().collect();
        submitted_chapters.sort_by_key(|c| c.position);

        let mut chapters_by_module: HashMap<&str, Vec<&str>> = HashMap::new();
        for chapter in &submitted_chapters {
            chapters_by_module
                .entry(chapter.module_id.as_str())
                .or_default()
                .push(chapter.chapter_id.as_str());
        }
        for module in &current {
            for page in &module.pages {
                if !seen_chapters.contains(page.id.as_str()) {
                    chapters_by_module
                        .entry(module.module_id)
                        .or_default()
                        .push(page.id.as_str());
                }
            }
        }

        let mut order = CanonicalOrder {
            course_id: course_id.to_string(),
            modules: Vec::with_capacity(module_sequence.len()),
            chapters: Vec::with_capacity(known_chapters.len()),
        };

        for module_id in module_sequence {
            let Some(chapters) = chapters_by_module.get(module_id).filter(|c| !c.is_empty())
            else {
                tracing::debug!(
                    "Module '{}' of course '{}' has no chapters left; dropping it",
                    module_id,
                    course_id
                );
                continue;
            };

            order.modules.push(ModuleRank {
                module_id: module_id.to_string(),
                rank: order.modules.len() as i64 + 1,
            });
            order
                .chapters
                .extend(chapters.iter().enumerate().map(|(i, chapter_id)| ChapterRank {
                    chapter_id: (*chapter_id).to_string(),
                    module_id: module_id.to_string(),
                    rank: i as i64 + 1,
                }));
        }

        tracing::debug!(
            "Normalized order for course '{}': {} modules, {} chapters ({} submitted)",
            course_id,
            order.modules.len(),
            order.chapters.len(),
            chapter_order.len()
        );

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: &str, course: &str, module: &str, module_order: i64, page_order: i64) -> Page {
        Page::new_with_id(id, course, module, id, page_order).with_module_order(module_order)
    }

    /// rust: basics [b1, b2, b3], advanced [a1, a2]; go: chan [g1]
    fn pages() -> Vec<Page> {
        vec![
            page("b1", "rust", "basics", 1, 1),
            page("b2", "rust", "basics", 1, 2),
            page("b3", "rust", "basics", 1, 3),
            page("a1", "rust", "advanced", 2, 1),
            page("a2", "rust", "advanced", 2, 2),
            page("g1", "go", "chan", 1, 1),
        ]
    }

    fn chapter_ids<'o>(order: &'o CanonicalOrder, module_id: &'o str) -> Vec<&'o str> {
        order
            .chapters_of(module_id)
            .map(|c| c.chapter_id.as_str())
            .collect()
    }

    fn assert_contiguous(order: &CanonicalOrder) {
        let module_ranks: Vec<i64> = order.modules.iter().map(|m| m.rank).collect();
        assert_eq!(module_ranks, (1..=order.modules.len() as i64).collect::<Vec<_>>());
        for module in &order.modules {
            let ranks: Vec<i64> = order.chapters_of(&module.module_id).map(|c| c.rank).collect();
            assert_eq!(ranks, (1..=ranks.len() as i64).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_gaps_and_junk_positions_become_contiguous() {
        let pages = pages();
        let order = OrderEditor::new(&pages)
            .apply_order(
                "rust",
                &[
                    ModulePosition::new("basics", 40),
                    ModulePosition::new("advanced", -2),
                ],
                &[
                    ChapterPosition::new("b3", "basics", 0),
                    ChapterPosition::new("b1", "basics", 100),
                    ChapterPosition::new("b2", "basics", 7),
                ],
            )
            .unwrap();

        assert_eq!(order.module_rank("advanced"), Some(1));
        assert_eq!(order.module_rank("basics"), Some(2));
        assert_eq!(chapter_ids(&order, "basics"), vec!["b3", "b2", "b1"]);
        assert_contiguous(&order);
    }

    #[test]
    fn test_duplicate_positions_keep_submission_order() {
        let pages = pages();
        let order = OrderEditor::new(&pages)
            .apply_order(
                "rust",
                &[],
                &[
                    ChapterPosition::new("b2", "basics", 1),
                    ChapterPosition::new("b3", "basics", 1),
                    ChapterPosition::new("b1", "basics", 1),
                ],
            )
            .unwrap();

        assert_eq!(chapter_ids(&order, "basics"), vec!["b2", "b3", "b1"]);
    }

    #[test]
    fn test_omitted_entries_are_appended_in_current_order() {
        let pages = pages();
        let order = OrderEditor::new(&pages)
            .apply_order(
                "rust",
                &[ModulePosition::new("advanced", 1)],
                &[ChapterPosition::new("b3", "basics", 1)],
            )
            .unwrap();

        assert_eq!(order.module_rank("advanced"), Some(1));
        assert_eq!(order.module_rank("basics"), Some(2));
        assert_eq!(chapter_ids(&order, "basics"), vec!["b3", "b1", "b2"]);
        assert_eq!(chapter_ids(&order, "advanced"), vec!["a1", "a2"]);
        assert_eq!(order.chapters.len(), 5);
        assert_contiguous(&order);
    }

    #[test]
    fn test_chapter_can_move_between_modules() {
        let pages = pages();
        let order = OrderEditor::new(&pages)
            .apply_order(
                "rust",
                &[],
                &[
                    ChapterPosition::new("b1", "advanced", 1),
                    ChapterPosition::new("a1", "advanced", 2),
                ],
            )
            .unwrap();

        assert_eq!(chapter_ids(&order, "advanced"), vec!["b1", "a1", "a2"]);
        assert_eq!(chapter_ids(&order, "basics"), vec!["b2", "b3"]);
        assert_eq!(order.chapter_rank("b1").unwrap().module_id, "advanced");
        assert_contiguous(&order);
    }

    #[test]
    fn test_emptied_module_is_dropped() {
        let pages = vec![page("x", "c", "m1", 1, 1), page("y", "c", "m2", 2, 1)];
        let order = OrderEditor::new(&pages)
            .apply_order("c", &[], &[ChapterPosition::new("x", "m2", 2)])
            .unwrap();

        assert_eq!(order.modules.len(), 1);
        assert_eq!(order.module_rank("m2"), Some(1));
        // Submitted chapters lead, the untouched one follows
        assert_eq!(chapter_ids(&order, "m2"), vec!["x", "y"]);
    }

    #[test]
    fn test_rejects_foreign_chapter() {
        let pages = pages();
        let err = OrderEditor::new(&pages)
            .apply_order("rust", &[], &[ChapterPosition::new("g1", "basics", 1)])
            .unwrap_err();

        assert!(matches!(
            err,
            OrderError::ForeignReference {
                kind: ReferenceKind::Chapter,
                ref reference_id,
                ..
            } if reference_id == "g1"
        ));
    }

    #[test]
    fn test_rejects_foreign_module() {
        let pages = pages();
        let editor = OrderEditor::new(&pages);

        let err = editor
            .apply_order("rust", &[ModulePosition::new("chan", 1)], &[])
            .unwrap_err();
        assert!(matches!(
            err,
            OrderError::ForeignReference {
                kind: ReferenceKind::Module,
                ..
            }
        ));

        // Moving a chapter into another course's module is also foreign
        let err = editor
            .apply_order("rust", &[], &[ChapterPosition::new("b1", "chan", 1)])
            .unwrap_err();
        assert!(matches!(err, OrderError::ForeignReference { .. }));
    }

    #[test]
    fn test_rejects_duplicates() {
        let pages = pages();
        let editor = OrderEditor::new(&pages);

        let err = editor
            .apply_order(
                "rust",
                &[
                    ModulePosition::new("basics", 1),
                    ModulePosition::new("basics", 2),
                ],
                &[],
            )
            .unwrap_err();
        assert!(matches!(
            err,
            OrderError::DuplicateReference {
                kind: ReferenceKind::Module,
                ..
            }
        ));

        let err = editor
            .apply_order(
                "rust",
                &[],
                &[
                    ChapterPosition::new("a1", "advanced", 1),
                    ChapterPosition::new("a1", "basics", 2),
                ],
            )
            .unwrap_err();
        assert!(matches!(
            err,
            OrderError::DuplicateReference {
                kind: ReferenceKind::Chapter,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_course() {
        let pages = pages();
        let err = OrderEditor::new(&pages)
            .apply_order("haskell", &[], &[])
            .unwrap_err();
        assert!(matches!(err, OrderError::CourseNotFound { .. }));
    }

    #[test]
    fn test_empty_edit_reproduces_current_order() {
        let pages = pages();
        let order = OrderEditor::new(&pages).apply_order("rust", &[], &[]).unwrap();

        assert_eq!(order.module_rank("basics"), Some(1));
        assert_eq!(order.module_rank("advanced"), Some(2));
        assert_eq!(chapter_ids(&order, "basics"), vec!["b1", "b2", "b3"]);
        assert_contiguous(&order);
    }
}

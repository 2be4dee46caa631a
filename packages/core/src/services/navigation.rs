//! Previous/next navigation within a course
//!
//! The resolver walks the same flattened sequence the table of contents shows
//! (modules in order, pages in order within each module), so module
//! boundaries are crossed transparently: the page before the first chapter of
//! module N is the last chapter of module N-1.

use crate::models::{NavLink, Navigation, Page};
use crate::services::toc_builder::course_sequence;
use crate::services::ContentServiceError;

fn link(page: &Page) -> NavLink {
    NavLink::new(&page.id, &page.title)
}

/// Resolve previous/next links for `target_page_id`.
///
/// `completed` is always `false` here; user progress is layered on by the
/// content service.
///
/// # Errors
///
/// `ContentServiceError::PageNotFound` when no page with that id is present in
/// `pages`.
pub fn resolve_navigation(
    pages: &[Page],
    target_page_id: &str,
) -> Result<Navigation, ContentServiceError> {
    let target = pages
        .iter()
        .find(|p| p.id == target_page_id)
        .ok_or_else(|| ContentServiceError::page_not_found(target_page_id))?;

    let sequence = course_sequence(pages, &target.course_id);
    let index = sequence
        .iter()
        .position(|p| p.id == target_page_id)
        .ok_or_else(|| ContentServiceError::page_not_found(target_page_id))?;

    let previous = index.checked_sub(1).map(|i| link(sequence[i]));
    let next = sequence.get(index + 1).copied().map(link);

    Ok(Navigation {
        current: link(sequence[index]),
        module_id: sequence[index].module_id.clone(),
        previous,
        next,
        position: index + 1,
        total: sequence.len(),
        completed: false,
    })
}

//! Paginated search over a project's items.
//!
//! Each iteration has two phases: fetch one page through the
//! [`ProjectItemSource`] port, then scan it with the pure [`scan_page`]
//! predicate. The loop ends on the first match or when the connection reports
//! no further pages.

use tracing::{debug, info, warn};

use crate::{
    LocatorError, MatchKey, MatchResult, ProjectId, ProjectItem, ProjectItemSource, PAGE_SIZE,
};

/// Returns the first item in `items` whose issue content matches `key`.
///
/// Items without issue content are skipped.
pub fn scan_page<'a>(items: &'a [ProjectItem], key: &MatchKey) -> Option<&'a ProjectItem> {
    items.iter().find(|item| {
        item.content
            .as_ref()
            .is_some_and(|content| key.matches(content))
    })
}

/// Searches `project` page by page for the item wrapping the issue described
/// by `key`.
///
/// Issues one request per page, each awaited before the next, and stops
/// requesting as soon as a page contains a match. A key that can never match
/// is not an error: every page is scanned and the result is empty.
///
/// # Errors
///
/// Propagates the first error returned by `source` without retrying, and
/// returns [`LocatorError::MalformedPage`] if a page reports more items but no
/// cursor to fetch them with.
#[tracing::instrument(skip_all, fields(project = %project, key = %key))]
pub async fn find_project_item<S>(
    source: &S,
    project: &ProjectId,
    key: &MatchKey,
) -> Result<MatchResult, LocatorError>
where
    S: ProjectItemSource + ?Sized,
{
    if !key.is_resolvable() {
        warn!("Match key is incomplete; no project item can match it");
    }

    let mut cursor = None;
    let mut pages_fetched = 0;

    loop {
        let page = source.fetch_page(project, cursor.as_ref(), PAGE_SIZE).await?;
        pages_fetched += 1;

        debug!(
            page = pages_fetched,
            items = page.items.len(),
            has_next_page = page.has_next_page,
            "Scanning project items page"
        );

        if let Some(item) = scan_page(&page.items, key) {
            info!(item_id = %item.id, pages_fetched, "Found project item");
            return Ok(MatchResult {
                item_id: Some(item.id.clone()),
                pages_fetched,
            });
        }

        if !page.has_next_page {
            break;
        }

        match page.end_cursor {
            Some(next) => cursor = Some(next),
            None => {
                return Err(LocatorError::MalformedPage {
                    message: format!(
                        "page {pages_fetched} reports more items but has no end cursor"
                    ),
                });
            }
        }
    }

    info!(pages_fetched, "No matching project item");
    Ok(MatchResult {
        item_id: None,
        pages_fetched,
    })
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;

use std::sync::Mutex;

use async_trait::async_trait;

use super::*;
use crate::{
    ContentId, Cursor, IssueContent, IssueCoordinates, IssueNumber, ProjectItemId,
    ProjectItemPage, RepositoryName, RepositoryOwner,
};

// ---------------------------------------------------------------------------
// Scripted source
// ---------------------------------------------------------------------------

/// In-memory board that serves `items` in pages of `page_size` and records
/// every request it receives.
struct ScriptedBoard {
    items: Vec<ProjectItem>,
    page_size: usize,
    requests: Mutex<Vec<Option<String>>>,
}

impl ScriptedBoard {
    fn new(items: Vec<ProjectItem>) -> Self {
        Self {
            items,
            page_size: PAGE_SIZE,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn requested_cursors(&self) -> Vec<Option<String>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProjectItemSource for ScriptedBoard {
    async fn fetch_page(
        &self,
        _project: &ProjectId,
        after: Option<&Cursor>,
        first: usize,
    ) -> Result<ProjectItemPage, LocatorError> {
        assert_eq!(first, PAGE_SIZE);
        self.requests
            .lock()
            .unwrap()
            .push(after.map(|c| c.as_str().to_string()));

        let start = match after {
            Some(cursor) => cursor.as_str().parse::<usize>().unwrap(),
            None => 0,
        };
        let end = (start + self.page_size).min(self.items.len());

        Ok(ProjectItemPage {
            items: self.items[start..end].to_vec(),
            end_cursor: Cursor::new(end.to_string()),
            has_next_page: end < self.items.len(),
        })
    }
}

/// Source that returns pre-built pages in order, for malformed responses.
struct FixedPages {
    pages: Mutex<Vec<Result<ProjectItemPage, LocatorError>>>,
    requests: Mutex<usize>,
}

impl FixedPages {
    fn new(mut pages: Vec<Result<ProjectItemPage, LocatorError>>) -> Self {
        pages.reverse();
        Self {
            pages: Mutex::new(pages),
            requests: Mutex::new(0),
        }
    }

    fn request_count(&self) -> usize {
        *self.requests.lock().unwrap()
    }
}

#[async_trait]
impl ProjectItemSource for FixedPages {
    async fn fetch_page(
        &self,
        _project: &ProjectId,
        _after: Option<&Cursor>,
        _first: usize,
    ) -> Result<ProjectItemPage, LocatorError> {
        *self.requests.lock().unwrap() += 1;
        self.pages
            .lock()
            .unwrap()
            .pop()
            .expect("matcher requested more pages than scripted")
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn project() -> ProjectId {
    ProjectId::new("PVT_test").unwrap()
}

/// Item `n` wraps issue `#n` in `acme/web` with content ID `I_n`.
fn issue_item(n: usize) -> ProjectItem {
    ProjectItem {
        id: ProjectItemId::new(format!("PVTI_{n}")).unwrap(),
        content: Some(IssueContent {
            id: ContentId::new(format!("I_{n}")).unwrap(),
            number: IssueNumber::new(n as u64).unwrap(),
            repository_name: RepositoryName::new("web").unwrap(),
            repository_owner: RepositoryOwner::new("acme").unwrap(),
        }),
    }
}

fn draft_item(n: usize) -> ProjectItem {
    ProjectItem {
        id: ProjectItemId::new(format!("PVTI_draft_{n}")).unwrap(),
        content: None,
    }
}

fn by_content_id(id: &str) -> MatchKey {
    MatchKey::ByContentId(ContentId::new(id).unwrap())
}

fn by_coordinates(number: u64, name: &str, owner: &str) -> MatchKey {
    MatchKey::ByCoordinates(IssueCoordinates {
        number: IssueNumber::new(number),
        repository_name: RepositoryName::new(name),
        repository_owner: RepositoryOwner::new(owner),
    })
}

// ---------------------------------------------------------------------------
// scan_page
// ---------------------------------------------------------------------------

#[test]
fn test_scan_page_returns_first_match_in_page_order() {
    let mut duplicate = issue_item(2);
    duplicate.id = ProjectItemId::new("PVTI_duplicate").unwrap();
    let items = vec![issue_item(1), issue_item(2), duplicate];

    let found = scan_page(&items, &by_content_id("I_2")).unwrap();
    assert_eq!(found.id.as_str(), "PVTI_2");
}

#[test]
fn test_scan_page_skips_items_without_content() {
    let items = vec![draft_item(1), draft_item(2)];
    assert!(scan_page(&items, &by_coordinates(1, "web", "acme")).is_none());
}

#[test]
fn test_scan_page_on_empty_page() {
    assert!(scan_page(&[], &by_content_id("I_1")).is_none());
}

// ---------------------------------------------------------------------------
// find_project_item
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_single_page_match_by_content_id() {
    let board = ScriptedBoard::new((1..=3).map(issue_item).collect());

    let result = find_project_item(&board, &project(), &by_content_id("I_2"))
        .await
        .unwrap();

    assert_eq!(result.item_id, ProjectItemId::new("PVTI_2"));
    assert_eq!(result.pages_fetched, 1);
    assert_eq!(board.request_count(), 1);
}

#[tokio::test]
async fn test_second_page_match_by_coordinates() {
    let mut items: Vec<ProjectItem> = (1..=150).map(issue_item).collect();
    items[119] = ProjectItem {
        id: ProjectItemId::new("PVTI_target").unwrap(),
        content: Some(IssueContent {
            id: ContentId::new("I_target").unwrap(),
            number: IssueNumber::new(42).unwrap(),
            repository_name: RepositoryName::new("infra").unwrap(),
            repository_owner: RepositoryOwner::new("acme").unwrap(),
        }),
    };
    let board = ScriptedBoard::new(items);

    let result = find_project_item(&board, &project(), &by_coordinates(42, "infra", "acme"))
        .await
        .unwrap();

    assert_eq!(result.item_id, ProjectItemId::new("PVTI_target"));
    assert_eq!(result.pages_fetched, 2);
    assert_eq!(
        board.requested_cursors(),
        vec![None, Some("100".to_string())]
    );
}

#[tokio::test]
async fn test_no_match_on_single_page() {
    let board = ScriptedBoard::new((1..=5).map(issue_item).collect());

    let result = find_project_item(&board, &project(), &by_content_id("I_404"))
        .await
        .unwrap();

    assert!(result.item_id.is_none());
    assert_eq!(board.request_count(), 1);
}

#[tokio::test]
async fn test_no_match_fetches_every_page_once() {
    let board = ScriptedBoard::new((1..=250).map(issue_item).collect());

    let result = find_project_item(&board, &project(), &by_coordinates(999, "web", "acme"))
        .await
        .unwrap();

    assert!(!result.is_found());
    assert_eq!(result.pages_fetched, 3);
    assert_eq!(
        board.requested_cursors(),
        vec![None, Some("100".to_string()), Some("200".to_string())]
    );
}

#[tokio::test]
async fn test_exactly_full_page_needs_no_second_request() {
    let board = ScriptedBoard::new((1..=100).map(issue_item).collect());

    let result = find_project_item(&board, &project(), &by_content_id("I_404"))
        .await
        .unwrap();

    assert!(!result.is_found());
    assert_eq!(board.request_count(), 1);
}

#[tokio::test]
async fn test_empty_project_terminates_after_one_request() {
    let board = ScriptedBoard::new(Vec::new());

    let result = find_project_item(&board, &project(), &by_content_id("I_1"))
        .await
        .unwrap();

    assert_eq!(result, MatchResult { item_id: None, pages_fetched: 1 });
}

#[tokio::test]
async fn test_unresolvable_key_exhausts_collection_without_error() {
    let board = ScriptedBoard::new((1..=230).map(issue_item).collect());
    let key = MatchKey::from_inputs(None, IssueCoordinates::default());

    let result = find_project_item(&board, &project(), &key).await.unwrap();

    assert!(result.item_id.is_none());
    assert_eq!(board.request_count(), 3);
}

#[tokio::test]
async fn test_stops_requesting_after_match_on_first_page() {
    let board = ScriptedBoard::new((1..=500).map(issue_item).collect());

    let result = find_project_item(&board, &project(), &by_content_id("I_100"))
        .await
        .unwrap();

    assert_eq!(result.item_id, ProjectItemId::new("PVTI_100"));
    assert_eq!(board.request_count(), 1);
}

#[tokio::test]
async fn test_draft_items_are_skipped_across_pages() {
    let mut items: Vec<ProjectItem> = (1..=120).map(draft_item).collect();
    items.push(issue_item(7));
    let board = ScriptedBoard::new(items);

    let result = find_project_item(&board, &project(), &by_coordinates(7, "web", "acme"))
        .await
        .unwrap();

    assert_eq!(result.item_id, ProjectItemId::new("PVTI_7"));
    assert_eq!(board.request_count(), 2);
}

#[tokio::test]
async fn test_repeated_search_is_idempotent() {
    let board = ScriptedBoard::new((1..=180).map(issue_item).collect());
    let key = by_content_id("I_150");

    let first = find_project_item(&board, &project(), &key).await.unwrap();
    let second = find_project_item(&board, &project(), &key).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(board.request_count(), 4);
}

#[tokio::test]
async fn test_query_error_propagates_without_retry() {
    let source = FixedPages::new(vec![
        Ok(ProjectItemPage {
            items: vec![issue_item(1)],
            end_cursor: Cursor::new("c1"),
            has_next_page: true,
        }),
        Err(LocatorError::Query {
            message: "boom".to_string(),
        }),
    ]);

    let error = find_project_item(&source, &project(), &by_content_id("I_404"))
        .await
        .unwrap_err();

    assert_eq!(
        error,
        LocatorError::Query {
            message: "boom".to_string()
        }
    );
    assert_eq!(source.request_count(), 2);
}

#[tokio::test]
async fn test_missing_cursor_with_more_pages_is_malformed() {
    let source = FixedPages::new(vec![Ok(ProjectItemPage {
        items: vec![issue_item(1)],
        end_cursor: None,
        has_next_page: true,
    })]);

    let error = find_project_item(&source, &project(), &by_content_id("I_404"))
        .await
        .unwrap_err();

    assert!(matches!(error, LocatorError::MalformedPage { .. }));
    assert_eq!(source.request_count(), 1);
}

#[tokio::test]
async fn test_match_on_page_without_cursor_still_succeeds() {
    let source = FixedPages::new(vec![Ok(ProjectItemPage {
        items: vec![issue_item(1)],
        end_cursor: None,
        has_next_page: true,
    })]);

    let result = find_project_item(&source, &project(), &by_content_id("I_1"))
        .await
        .unwrap();

    assert_eq!(result.item_id, ProjectItemId::new("PVTI_1"));
}

#[tokio::test]
async fn test_works_through_trait_object() {
    let board = ScriptedBoard::new((1..=3).map(issue_item).collect());
    let source: &dyn ProjectItemSource = &board;

    let result = find_project_item(source, &project(), &by_content_id("I_3"))
        .await
        .unwrap();

    assert_eq!(result.item_id, ProjectItemId::new("PVTI_3"));
}

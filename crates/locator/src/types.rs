//! Value types for locating a project item.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! the matching rules: which issue we are looking for ([`MatchKey`]), what a
//! row on the board looks like ([`ProjectItem`]), and what one request returns
//! ([`ProjectItemPage`]).

use serde::{Deserialize, Serialize};

use crate::{ContentId, Cursor, IssueNumber, ProjectItemId, RepositoryName, RepositoryOwner};

/// Number of items requested per page. Matches the GitHub GraphQL connection cap.
pub const PAGE_SIZE: usize = 100;

// ---------------------------------------------------------------------------
// Project items
// ---------------------------------------------------------------------------

/// The Issue wrapped by a project item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueContent {
    /// Global node ID of the issue.
    pub id: ContentId,
    /// Issue number within its repository.
    pub number: IssueNumber,
    /// Repository the issue lives in.
    pub repository_name: RepositoryName,
    /// Owner of that repository.
    pub repository_owner: RepositoryOwner,
}

/// One row on a Projects-v2 board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectItem {
    /// Project-scoped item ID.
    pub id: ProjectItemId,
    /// Present only when the item wraps an Issue. Pull requests, draft
    /// issues and redacted items carry `None` and never match.
    pub content: Option<IssueContent>,
}

/// One page of project items as returned by a single request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectItemPage {
    /// Items in the order the upstream connection returned them.
    pub items: Vec<ProjectItem>,
    /// Cursor to pass as `after` for the next page.
    pub end_cursor: Option<Cursor>,
    /// Whether the connection has more items after this page.
    pub has_next_page: bool,
}

// ---------------------------------------------------------------------------
// Match keys
// ---------------------------------------------------------------------------

/// Issue number plus repository, any part of which may be unknown.
///
/// Coordinates are assembled from explicit inputs and the ambient workflow
/// context. They only match when every field is present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IssueCoordinates {
    pub number: Option<IssueNumber>,
    pub repository_name: Option<RepositoryName>,
    pub repository_owner: Option<RepositoryOwner>,
}

impl IssueCoordinates {
    /// Returns `true` if number, repository name and owner are all known.
    pub fn is_complete(&self) -> bool {
        self.number.is_some() && self.repository_name.is_some() && self.repository_owner.is_some()
    }

    /// Returns `true` if `content` is the issue these coordinates describe.
    ///
    /// Incomplete coordinates never match.
    pub fn matches(&self, content: &IssueContent) -> bool {
        match (&self.number, &self.repository_name, &self.repository_owner) {
            (Some(number), Some(name), Some(owner)) => {
                content.number == *number
                    && content.repository_name == *name
                    && content.repository_owner == *owner
            }
            _ => false,
        }
    }
}

/// Identifies the issue whose project item we are looking for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKey {
    /// Match on the issue's global node ID.
    ByContentId(ContentId),
    /// Match on issue number, repository name and repository owner.
    ByCoordinates(IssueCoordinates),
}

impl MatchKey {
    /// Builds the key for one invocation. A content ID, when supplied, always
    /// takes precedence over coordinates.
    pub fn from_inputs(content_id: Option<ContentId>, coordinates: IssueCoordinates) -> Self {
        match content_id {
            Some(id) => Self::ByContentId(id),
            None => Self::ByCoordinates(coordinates),
        }
    }

    /// Returns `true` if `content` is the issue this key identifies.
    pub fn matches(&self, content: &IssueContent) -> bool {
        match self {
            Self::ByContentId(id) => content.id == *id,
            Self::ByCoordinates(coordinates) => coordinates.matches(content),
        }
    }

    /// Returns `false` if this key can never match any item.
    pub fn is_resolvable(&self) -> bool {
        match self {
            Self::ByContentId(_) => true,
            Self::ByCoordinates(coordinates) => coordinates.is_complete(),
        }
    }
}

impl std::fmt::Display for MatchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn part<T: std::fmt::Display>(value: Option<&T>) -> String {
            value.map_or_else(|| "?".to_string(), ToString::to_string)
        }

        match self {
            Self::ByContentId(id) => write!(f, "content {id}"),
            Self::ByCoordinates(c) => write!(
                f,
                "{}/{}#{}",
                part(c.repository_owner.as_ref()),
                part(c.repository_name.as_ref()),
                part(c.number.as_ref()),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Outcome of a search over a project's items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchResult {
    /// The matching item's ID, or `None` if the collection was exhausted.
    pub item_id: Option<ProjectItemId>,
    /// Number of page requests issued to reach this outcome.
    pub pages_fetched: usize,
}

impl MatchResult {
    /// Returns `true` if a matching item was found.
    pub fn is_found(&self) -> bool {
        self.item_id.is_some()
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;

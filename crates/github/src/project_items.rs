//! Paged access to the items of a Projects-v2 board.
//!
//! Implements [`locator::ProjectItemSource`] for [`GithubClient`] with one
//! GraphQL query per page.

use async_trait::async_trait;
use locator::{
    ContentId, Cursor, IssueContent, IssueNumber, LocatorError, ProjectId, ProjectItem,
    ProjectItemId, ProjectItemPage, ProjectItemSource, RepositoryName, RepositoryOwner,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{GithubClient, GithubError};

/// Fetches one page of a board's items together with the Issue each wraps.
///
/// Non-Issue content (pull requests, draft issues) comes back as an empty
/// object because of the inline fragment; redacted content comes back `null`.
pub const PROJECT_ITEMS_QUERY: &str = r#"
query getProjectItems($projectID: ID!, $endCursor: String, $first: Int!) {
  node(id: $projectID) {
    ... on ProjectV2 {
      items(first: $first, after: $endCursor) {
        nodes {
          id
          content {
            ... on Issue {
              id
              number
              repository {
                name
                owner {
                  login
                }
              }
            }
          }
        }
        pageInfo {
          endCursor
          hasNextPage
        }
      }
    }
  }
}
"#;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct ProjectItemsVariables<'a> {
    #[serde(rename = "projectID")]
    pub(crate) project_id: &'a str,
    #[serde(rename = "endCursor")]
    pub(crate) end_cursor: Option<&'a str>,
    pub(crate) first: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectItemsData {
    pub(crate) node: Option<ProjectNode>,
}

/// Any node type. Only `ProjectV2` nodes carry `items`.
#[derive(Debug, Deserialize)]
pub(crate) struct ProjectNode {
    pub(crate) items: Option<ItemConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemConnection {
    #[serde(default)]
    pub(crate) nodes: Vec<Option<ItemNode>>,
    pub(crate) page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemNode {
    pub(crate) id: String,
    pub(crate) content: Option<ContentNode>,
}

/// Every field is optional: the fragment only fills them in for Issues.
#[derive(Debug, Deserialize)]
pub(crate) struct ContentNode {
    pub(crate) id: Option<String>,
    pub(crate) number: Option<u64>,
    pub(crate) repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryNode {
    pub(crate) name: String,
    pub(crate) owner: OwnerNode,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwnerNode {
    pub(crate) login: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    pub(crate) end_cursor: Option<String>,
    pub(crate) has_next_page: bool,
}

impl ContentNode {
    fn into_issue(self) -> Option<IssueContent> {
        let repository = self.repository?;
        Some(IssueContent {
            id: ContentId::new(self.id?)?,
            number: IssueNumber::new(self.number?)?,
            repository_name: RepositoryName::new(repository.name)?,
            repository_owner: RepositoryOwner::new(repository.owner.login)?,
        })
    }
}

impl ItemConnection {
    pub(crate) fn into_page(self) -> ProjectItemPage {
        let items = self
            .nodes
            .into_iter()
            .flatten()
            .filter_map(|node| {
                let Some(id) = ProjectItemId::new(node.id) else {
                    warn!("Skipping project item with an empty ID");
                    return None;
                };
                Some(ProjectItem {
                    id,
                    content: node.content.and_then(ContentNode::into_issue),
                })
            })
            .collect();

        ProjectItemPage {
            items,
            end_cursor: self.page_info.end_cursor.and_then(Cursor::new),
            has_next_page: self.page_info.has_next_page,
        }
    }
}

// ---------------------------------------------------------------------------
// ProjectItemSource
// ---------------------------------------------------------------------------

impl GithubClient {
    /// Fetches one page of `project`'s items.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::ProjectNotFound`] if the ID does not resolve to a
    /// Projects-v2 board, plus any error from [`GithubClient::graphql`].
    pub async fn project_items_page(
        &self,
        project: &ProjectId,
        after: Option<&Cursor>,
        first: usize,
    ) -> Result<ProjectItemPage, GithubError> {
        let variables = ProjectItemsVariables {
            project_id: project.as_str(),
            end_cursor: after.map(Cursor::as_str),
            first,
        };

        let data: ProjectItemsData = self.graphql(PROJECT_ITEMS_QUERY, &variables).await?;
        let connection = data
            .node
            .and_then(|node| node.items)
            .ok_or_else(|| GithubError::ProjectNotFound {
                project: project.to_string(),
            })?;

        let page = connection.into_page();
        debug!(
            items = page.items.len(),
            has_next_page = page.has_next_page,
            "Fetched project items page"
        );
        Ok(page)
    }
}

#[async_trait]
impl ProjectItemSource for GithubClient {
    #[tracing::instrument(skip_all, fields(project = %project, after = ?after.map(Cursor::as_str)))]
    async fn fetch_page(
        &self,
        project: &ProjectId,
        after: Option<&Cursor>,
        first: usize,
    ) -> Result<ProjectItemPage, LocatorError> {
        Ok(self.project_items_page(project, after, first).await?)
    }
}

#[cfg(test)]
#[path = "project_items_tests.rs"]
mod tests;

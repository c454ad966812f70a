//! Ambient workflow context supplied by the Actions runner.
//!
//! Provides the defaults for issue coordinates that were not given explicitly:
//! the repository from `GITHUB_REPOSITORY` and the issue number from the
//! triggering event payload at `GITHUB_EVENT_PATH`.

use locator::{IssueNumber, RepositoryName, RepositoryOwner};
use serde::Deserialize;
use tracing::debug;

/// Issue coordinates implied by the triggering workflow event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowContext {
    pub issue_number: Option<IssueNumber>,
    pub repository_name: Option<RepositoryName>,
    pub repository_owner: Option<RepositoryOwner>,
}

#[derive(Debug, Default, Deserialize)]
struct EventPayload {
    issue: Option<NumberedPayload>,
    pull_request: Option<NumberedPayload>,
    number: Option<u64>,
    repository: Option<RepositoryPayload>,
}

#[derive(Debug, Deserialize)]
struct NumberedPayload {
    number: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    name: Option<String>,
    owner: Option<OwnerPayload>,
}

#[derive(Debug, Deserialize)]
struct OwnerPayload {
    login: Option<String>,
}

impl WorkflowContext {
    /// Reads the context from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads `GITHUB_REPOSITORY` and the event payload named by
    /// `GITHUB_EVENT_PATH` through `lookup`. Anything missing or unreadable
    /// simply leaves the corresponding default unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let payload = lookup("GITHUB_EVENT_PATH")
            .filter(|p| !p.is_empty())
            .and_then(|path| match std::fs::read_to_string(&path) {
                Ok(raw) => Some(raw),
                Err(e) => {
                    debug!(path = %path, error = %e, "Event payload not readable");
                    None
                }
            })
            .map(|raw| Self::parse_payload(&raw))
            .unwrap_or_default();

        Self::from_parts(lookup("GITHUB_REPOSITORY").as_deref(), payload)
    }

    fn parse_payload(raw: &str) -> EventPayload {
        serde_json::from_str(raw).unwrap_or_else(|e| {
            debug!(error = %e, "Event payload is not valid JSON");
            EventPayload::default()
        })
    }

    fn from_parts(repository: Option<&str>, payload: EventPayload) -> Self {
        let issue_number = payload
            .issue
            .and_then(|i| i.number)
            .or_else(|| payload.pull_request.and_then(|p| p.number))
            .or(payload.number)
            .and_then(IssueNumber::new);

        let (repository_owner, repository_name) = match repository.and_then(|r| r.split_once('/')) {
            Some((owner, name)) => (RepositoryOwner::new(owner), RepositoryName::new(name)),
            None => match payload.repository {
                Some(repo) => (
                    repo.owner
                        .and_then(|o| o.login)
                        .and_then(RepositoryOwner::new),
                    repo.name.and_then(RepositoryName::new),
                ),
                None => (None, None),
            },
        };

        let context = Self {
            issue_number,
            repository_name,
            repository_owner,
        };
        debug!(?context, "Resolved workflow context");
        context
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

//! Action inputs.
//!
//! Every input can be passed as a command-line flag or, as the Actions runner
//! does, through an `INPUT_<NAME>` environment variable. Empty values count
//! as absent.

use clap::{Parser, ValueEnum};
use github::Credentials;
use locator::{
    ContentId, IssueCoordinates, IssueNumber, LocatorError, MatchKey, ProjectId, RepositoryName,
    RepositoryOwner,
};

use crate::context::WorkflowContext;

pub const INPUT_PROJECT_ID: &str = "github-project-id";
pub const INPUT_FAIL_IF_NOT_FOUND: &str = "should-fail-if-issue-not-found";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Human-readable lines.
    Text,
}

/// Resolve the Projects-v2 item ID of an issue.
#[derive(Debug, Parser)]
#[command(name = "project-item-id", version, about)]
pub struct Args {
    /// Static access token. When set, GitHub App inputs are ignored.
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub App ID.
    #[arg(long, env = "INPUT_GITHUB-APP-ID")]
    pub github_app_id: Option<String>,

    /// GitHub App private key (PEM).
    #[arg(
        long,
        env = "INPUT_GITHUB-APP-PRIVATE-KEY",
        hide_env_values = true,
        allow_hyphen_values = true
    )]
    pub github_app_private_key: Option<String>,

    /// GitHub App installation ID.
    #[arg(long, env = "INPUT_GITHUB-APP-INSTALLATION-ID")]
    pub github_app_installation_id: Option<String>,

    /// Global node ID of the issue. Takes precedence over number and repository.
    #[arg(long, env = "INPUT_GITHUB-ISSUE-ID")]
    pub github_issue_id: Option<String>,

    /// Issue number. Defaults to the issue of the triggering event.
    #[arg(long, env = "INPUT_GITHUB-ISSUE-NUMBER")]
    pub github_issue_number: Option<String>,

    /// Repository name. Defaults to the repository running the workflow.
    #[arg(long, env = "INPUT_GITHUB-ISSUE-REPOSITORY-NAME")]
    pub github_issue_repository_name: Option<String>,

    /// Repository owner. Defaults to the repository running the workflow.
    #[arg(long, env = "INPUT_GITHUB-ISSUE-REPOSITORY-OWNER")]
    pub github_issue_repository_owner: Option<String>,

    /// Node ID of the Projects-v2 board to search.
    #[arg(long, env = "INPUT_GITHUB-PROJECT-ID")]
    pub github_project_id: Option<String>,

    /// Fail when no item wraps the issue (`true` / `false`).
    #[arg(long, env = "INPUT_SHOULD-FAIL-IF-ISSUE-NOT-FOUND")]
    pub should_fail_if_issue_not_found: Option<String>,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,
}

/// Validated inputs for one run.
#[derive(Debug)]
pub struct Invocation {
    pub credentials: Credentials,
    pub project: ProjectId,
    pub key: MatchKey,
    pub fail_if_not_found: bool,
}

impl Args {
    /// Validates the inputs and fills unspecified issue coordinates from
    /// `context`.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::MissingInput`] or [`LocatorError::InvalidInput`]
    /// for missing credentials, a missing project ID, or an unrecognised
    /// fail-flag value.
    pub fn into_invocation(self, context: &WorkflowContext) -> Result<Invocation, LocatorError> {
        let credentials = Credentials::from_inputs(
            non_empty(self.github_token),
            non_empty(self.github_app_id),
            non_empty(self.github_app_private_key),
            non_empty(self.github_app_installation_id),
        )?;

        let project = non_empty(self.github_project_id)
            .and_then(ProjectId::new)
            .ok_or_else(|| LocatorError::missing_input(INPUT_PROJECT_ID))?;

        let coordinates = IssueCoordinates {
            number: non_empty(self.github_issue_number)
                .and_then(|n| IssueNumber::parse(&n))
                .or(context.issue_number),
            repository_name: non_empty(self.github_issue_repository_name)
                .and_then(RepositoryName::new)
                .or_else(|| context.repository_name.clone()),
            repository_owner: non_empty(self.github_issue_repository_owner)
                .and_then(RepositoryOwner::new)
                .or_else(|| context.repository_owner.clone()),
        };
        let key = MatchKey::from_inputs(
            non_empty(self.github_issue_id).and_then(ContentId::new),
            coordinates,
        );

        let fail_if_not_found = parse_flag(
            INPUT_FAIL_IF_NOT_FOUND,
            self.should_fail_if_issue_not_found.as_deref(),
        )?;

        Ok(Invocation {
            credentials,
            project,
            key,
            fail_if_not_found,
        })
    }
}

/// Trims surrounding whitespace, treating a blank value as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses a boolean input the way the Actions toolkit does: only the YAML
/// 1.2 core spellings are accepted. An absent or empty value is `false`.
///
/// # Errors
///
/// Returns [`LocatorError::InvalidInput`] for anything else, including
/// values like `yes` or `1`.
pub fn parse_flag(name: &str, value: Option<&str>) -> Result<bool, LocatorError> {
    match value.map(str::trim).unwrap_or_default() {
        "" | "false" | "False" | "FALSE" => Ok(false),
        "true" | "True" | "TRUE" => Ok(true),
        other => Err(LocatorError::invalid_input(
            name,
            format!("'{other}' is not one of: true | True | TRUE | false | False | FALSE"),
        )),
    }
}

#[cfg(test)]
#[path = "inputs_tests.rs"]
mod tests;

//! Errors raised while talking to GitHub.
//!
//! These carry transport-level detail. They are converted into
//! [`locator::LocatorError`] at the port boundary: credential failures become
//! `Auth`, everything else becomes `Query`.

use locator::LocatorError;
use thiserror::Error;

/// Failure of a GitHub REST or GraphQL call.
#[derive(Debug, Error)]
pub enum GithubError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// GitHub answered with a non-success HTTP status.
    #[error("GitHub returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The GraphQL response carried one or more errors.
    #[error("GraphQL request returned errors: {}", .messages.join("; "))]
    GraphQl { messages: Vec<String> },

    /// The GraphQL response carried neither errors nor data.
    #[error("GraphQL response contained no data")]
    MissingData,

    /// A response body did not have the expected shape.
    #[error("Unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    /// The queried node does not exist or is not a Projects-v2 board.
    #[error("Project '{project}' was not found or is not a Projects-v2 board")]
    ProjectNotFound { project: String },

    /// The GitHub App private key could not be parsed as an RSA PEM key.
    #[error("GitHub App private key is not a valid RSA PEM key: {0}")]
    InvalidPrivateKey(#[source] jsonwebtoken::errors::Error),

    /// The GitHub App JWT could not be signed.
    #[error("Failed to sign GitHub App JWT: {0}")]
    TokenSigning(#[source] jsonwebtoken::errors::Error),

    /// Exchanging the App JWT for an installation token failed.
    #[error("Installation token exchange for installation {installation_id} failed: {reason}")]
    TokenExchange { installation_id: u64, reason: String },
}

impl GithubError {
    /// Returns `true` for failures that happen while acquiring credentials.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::InvalidPrivateKey(_) | Self::TokenSigning(_) | Self::TokenExchange { .. }
        )
    }
}

impl From<GithubError> for LocatorError {
    fn from(error: GithubError) -> Self {
        let message = error.to_string();
        if error.is_auth() {
            LocatorError::Auth { message }
        } else {
            LocatorError::Query { message }
        }
    }
}

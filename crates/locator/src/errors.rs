//! Error taxonomy for the project item locator.
//!
//! [`LocatorError`] is the single error type that crosses the port boundary.
//! Infrastructure crates keep their own detailed error enums and convert into
//! this one, so the outermost boundary only ever has to render one type.
//!
//! No variant is retryable: every error is surfaced once, at the outermost
//! boundary, and ends the invocation.

use thiserror::Error;

/// Errors that end a locator invocation.
///
/// "Not found" is not an error from the matcher's point of view; it only
/// becomes [`LocatorError::ItemNotFound`] when the reporting policy asks for
/// a failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocatorError {
    /// Neither a usable static token nor complete GitHub App credentials were
    /// available, or the installation-token exchange failed.
    #[error("Authentication failed: {message}")]
    Auth {
        /// Description of the credential problem.
        message: String,
    },

    /// A page request failed (transport, permissions, unknown project ID,
    /// GraphQL errors). No partial result is produced.
    #[error("Project items query failed: {message}")]
    Query {
        /// Description of the query failure.
        message: String,
    },

    /// A page claimed more items were available but carried no cursor to
    /// request them with.
    #[error("Malformed project items page: {message}")]
    MalformedPage {
        /// Description of the inconsistency.
        message: String,
    },

    /// A required input was not supplied.
    ///
    /// Produced before any query is issued.
    #[error("Input required and not supplied: {name}")]
    MissingInput {
        /// Name of the input, as it appears in the action metadata.
        name: String,
    },

    /// An input was supplied but could not be interpreted.
    #[error("Invalid input '{name}': {message}")]
    InvalidInput {
        /// Name of the input, as it appears in the action metadata.
        name: String,
        /// Description of the problem.
        message: String,
    },

    /// The result could not be published to the host.
    #[error("Failed to publish output: {message}")]
    Output {
        /// Description of the write failure.
        message: String,
    },

    /// No matching project item exists and the caller asked for that to fail
    /// the invocation.
    #[error("Project item ID not found.")]
    ItemNotFound,
}

impl LocatorError {
    /// Shorthand for [`LocatorError::MissingInput`].
    pub fn missing_input(name: impl Into<String>) -> Self {
        Self::MissingInput { name: name.into() }
    }

    /// Shorthand for [`LocatorError::InvalidInput`].
    pub fn invalid_input(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            name: name.into(),
            message: message.into(),
        }
    }
}

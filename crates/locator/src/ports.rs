//! Port traits implemented by infrastructure crates.
//!
//! The matcher only ever sees [`ProjectItemSource`]; it never learns how the
//! client behind it was authenticated. The reporting policy only ever sees
//! [`ResultReporter`]; it never learns how the match was performed.

use async_trait::async_trait;

use crate::{Cursor, LocatorError, ProjectId, ProjectItemPage};

/// Supplies pages of items from a Projects-v2 board.
#[async_trait]
pub trait ProjectItemSource: Send + Sync {
    /// Fetches up to `first` items of `project`, starting after `after`
    /// (or from the beginning when `after` is `None`).
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::Query`] for any failure. Implementations must
    /// not retry.
    async fn fetch_page(
        &self,
        project: &ProjectId,
        after: Option<&Cursor>,
        first: usize,
    ) -> Result<ProjectItemPage, LocatorError>;
}

/// Publishes the outcome of an invocation to the host.
pub trait ResultReporter {
    /// Sets a named output value. An empty `value` publishes an empty output.
    ///
    /// # Errors
    ///
    /// Returns an error if the output could not be written.
    fn set_output(&self, name: &str, value: &str) -> Result<(), LocatorError>;

    /// Reports a user-visible failure. Called exactly once, at the outermost
    /// boundary, for any error.
    fn set_failed(&self, message: &str);
}

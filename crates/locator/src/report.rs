//! Turns a [`MatchResult`] into an output value or a failure.

use tracing::info;

use crate::{LocatorError, MatchResult, ResultReporter};

/// Name of the output that carries the project item ID.
pub const OUTPUT_NAME: &str = "GITHUB_PROJECT_ITEM_ID";

/// Publishes `result` through `reporter`.
///
/// A found item is published as [`OUTPUT_NAME`]. When nothing was found,
/// `fail_if_not_found` decides between an empty output and
/// [`LocatorError::ItemNotFound`]; in the failure case no output is written.
///
/// # Errors
///
/// Returns [`LocatorError::ItemNotFound`] per the policy above, or whatever
/// error the reporter raises while writing the output.
pub fn report<R>(
    reporter: &R,
    result: &MatchResult,
    fail_if_not_found: bool,
) -> Result<(), LocatorError>
where
    R: ResultReporter + ?Sized,
{
    match &result.item_id {
        Some(item_id) => reporter.set_output(OUTPUT_NAME, item_id.as_str()),
        None if fail_if_not_found => Err(LocatorError::ItemNotFound),
        None => {
            info!("Project item not found; publishing empty output");
            reporter.set_output(OUTPUT_NAME, "")
        }
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

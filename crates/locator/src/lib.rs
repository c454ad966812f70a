//! Core domain for resolving a GitHub Projects-v2 item ID from an issue.
//!
//! This crate contains the identifiers, match keys, error taxonomy and the
//! paginated matcher. Infrastructure crates implement the port traits defined
//! here; they never add matching rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`ProjectId`, `ContentId`, `IssueNumber`, etc.) |
//! | [`types`] | Value types (`MatchKey`, `ProjectItem`, `ProjectItemPage`, `MatchResult`) |
//! | [`errors`] | The [`LocatorError`] taxonomy |
//! | [`ports`] | [`ProjectItemSource`] and [`ResultReporter`] |
//! | [`matcher`] | The paginated search-and-match loop |
//! | [`report`] | The not-found policy applied to a [`MatchResult`] |

pub mod errors;
pub mod identifiers;
pub mod matcher;
pub mod ports;
pub mod report;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::LocatorError;
pub use identifiers::{
    ContentId, Cursor, InvocationId, IssueNumber, ProjectId, ProjectItemId, RepositoryName,
    RepositoryOwner,
};
pub use matcher::{find_project_item, scan_page};
pub use ports::{ProjectItemSource, ResultReporter};
pub use report::{report, OUTPUT_NAME};
pub use types::{
    IssueContent, IssueCoordinates, MatchKey, MatchResult, ProjectItem, ProjectItemPage,
    PAGE_SIZE,
};

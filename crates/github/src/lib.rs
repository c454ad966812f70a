//! GitHub infrastructure adapter.
//!
//! Implements [`locator::ProjectItemSource`] against the GitHub GraphQL API and
//! resolves the credentials that client runs with: either a static access
//! token or a GitHub App installation token.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain matching rules.
//! All GitHub API details (authentication, GraphQL framing, response shapes)
//! are handled here; the [`locator`] crate never sees them.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`credentials`] | `Credentials`, `AccessToken`, App JWT + installation-token exchange |
//! | [`client`] | `GithubClient` and its GraphQL transport |
//! | [`project_items`] | The project items query and `ProjectItemSource` impl |
//! | [`endpoints`] | REST / GraphQL base URLs (GitHub Enterprise Server aware) |
//! | [`errors`] | `GithubError` and its mapping onto `LocatorError` |

pub mod client;
pub mod credentials;
pub mod endpoints;
pub mod errors;
pub mod project_items;

pub use client::GithubClient;
pub use credentials::{
    AccessToken, AppCredentials, Credentials, INPUT_APP_ID, INPUT_APP_INSTALLATION_ID,
    INPUT_APP_PRIVATE_KEY,
};
pub use endpoints::GithubEndpoints;
pub use errors::GithubError;
pub use project_items::PROJECT_ITEMS_QUERY;

/// REST API version requested from GitHub.
pub const API_VERSION: &str = "2022-11-28";

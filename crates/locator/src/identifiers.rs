//! Newtype domain identifiers.
//!
//! Every value that identifies something on GitHub is wrapped in a distinct
//! newtype. This prevents accidentally comparing, for example, a
//! [`ContentId`] with a [`ProjectItemId`] even though both are opaque GraphQL
//! node IDs under the hood.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: GraphQL node IDs and names
// ---------------------------------------------------------------------------

string_id! {
    /// Identifies a GitHub Projects-v2 board by its global node ID
    /// (e.g. `"PVT_kwDOAbc123"`).
    ProjectId
}

string_id! {
    /// Global node ID of the Issue wrapped by a project item
    /// (e.g. `"I_kwDOAbc123"`).
    ContentId
}

string_id! {
    /// Project-scoped ID of a single row on a Projects-v2 board
    /// (e.g. `"PVTI_lADOAbc123"`). This is the value the locator emits.
    ProjectItemId
}

string_id! {
    /// Name of a repository without its owner (e.g. `"infra"`).
    RepositoryName
}

string_id! {
    /// Login of the user or organisation that owns a repository (e.g. `"acme"`).
    RepositoryOwner
}

string_id! {
    /// Opaque continuation token returned by a paged GraphQL connection.
    Cursor
}

// ---------------------------------------------------------------------------
// Identifiers: GitHub-integer-backed
// ---------------------------------------------------------------------------

/// Issue number within a repository. GitHub assigns these starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Creates an issue number, returning `None` for zero.
    pub fn new(value: u64) -> Option<Self> {
        if value == 0 {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Parses the leading base-10 digits of `value`, so `"42abc"` reads as 42.
    /// Returns `None` when there are no leading digits or they denote zero.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim_start();
        let value = value.strip_prefix('+').unwrap_or(value);
        let end = value
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(value.len());
        value[..end].parse::<u64>().ok().and_then(Self::new)
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers: UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single invocation of the locator.
///
/// Generated fresh for every run and recorded on the root span so all
/// activity from one run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationId(Uuid);

impl InvocationId {
    /// Generates a new random invocation identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for InvocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "identifiers_tests.rs"]
mod tests;

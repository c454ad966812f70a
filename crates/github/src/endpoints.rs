//! Base URLs for the GitHub REST and GraphQL APIs.

/// Public GitHub REST API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Public GitHub GraphQL endpoint.
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Where to send REST and GraphQL requests.
///
/// Actions runners export `GITHUB_API_URL` and `GITHUB_GRAPHQL_URL`, which
/// point at the right host on GitHub Enterprise Server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubEndpoints {
    api_url: String,
    graphql_url: String,
}

impl GithubEndpoints {
    /// Creates endpoints from explicit URLs. Trailing slashes are removed.
    pub fn new(api_url: impl Into<String>, graphql_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            graphql_url: graphql_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Reads `GITHUB_API_URL` and `GITHUB_GRAPHQL_URL` through `lookup`,
    /// falling back to the public GitHub endpoints for unset or empty values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str, default: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self::new(
            read("GITHUB_API_URL", DEFAULT_API_URL),
            read("GITHUB_GRAPHQL_URL", DEFAULT_GRAPHQL_URL),
        )
    }

    /// Reads the endpoints from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// REST API root, without a trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// GraphQL endpoint URL.
    pub fn graphql_url(&self) -> &str {
        &self.graphql_url
    }

    /// URL for exchanging an App JWT for an installation access token.
    pub fn installation_token_url(&self, installation_id: u64) -> String {
        format!(
            "{}/app/installations/{installation_id}/access_tokens",
            self.api_url
        )
    }
}

impl Default for GithubEndpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_GRAPHQL_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_public_github() {
        let endpoints = GithubEndpoints::from_lookup(|_| None);
        assert_eq!(endpoints, GithubEndpoints::default());
        assert_eq!(endpoints.graphql_url(), "https://api.github.com/graphql");
    }

    #[test]
    fn test_reads_enterprise_urls_and_ignores_empty_values() {
        let endpoints = GithubEndpoints::from_lookup(|name| match name {
            "GITHUB_API_URL" => Some("https://ghe.example.com/api/v3/".to_string()),
            "GITHUB_GRAPHQL_URL" => Some("  ".to_string()),
            _ => None,
        });

        assert_eq!(endpoints.api_url(), "https://ghe.example.com/api/v3");
        assert_eq!(endpoints.graphql_url(), DEFAULT_GRAPHQL_URL);
        assert_eq!(
            endpoints.installation_token_url(42),
            "https://ghe.example.com/api/v3/app/installations/42/access_tokens"
        );
    }
}

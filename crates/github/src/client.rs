//! The authenticated GitHub client and its GraphQL transport.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::credentials::exchange_installation_token;
use crate::{AccessToken, AppCredentials, Credentials, GithubEndpoints, GithubError};

/// `User-Agent` sent with every request; GitHub rejects requests without one.
const USER_AGENT: &str = concat!("project-item-id/", env!("CARGO_PKG_VERSION"));

/// A GitHub API client holding a bearer token.
///
/// Constructed either from a static token ([`GithubClient::with_token`]) or
/// from a GitHub App installation ([`GithubClient::for_installation`]). Callers
/// downstream of construction cannot tell the two apart.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    endpoints: GithubEndpoints,
    token: AccessToken,
}

#[derive(Serialize)]
struct GraphQlRequest<'a, V: ?Sized> {
    query: &'a str,
    variables: &'a V,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

fn build_http() -> Result<reqwest::Client, GithubError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|source| GithubError::Transport {
            url: String::new(),
            source,
        })
}

impl GithubClient {
    /// Creates a client that authenticates with a static token.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::Transport`] if the HTTP client cannot be built.
    pub fn with_token(endpoints: GithubEndpoints, token: AccessToken) -> Result<Self, GithubError> {
        Ok(Self {
            http: build_http()?,
            endpoints,
            token,
        })
    }

    /// Creates a client that authenticates as a GitHub App installation.
    ///
    /// # Errors
    ///
    /// Returns an auth-class [`GithubError`] if the private key is unusable or
    /// GitHub refuses the token exchange.
    pub async fn for_installation(
        endpoints: GithubEndpoints,
        app: &AppCredentials,
    ) -> Result<Self, GithubError> {
        let http = build_http()?;
        let token = exchange_installation_token(&http, &endpoints, app).await?;
        Ok(Self {
            http,
            endpoints,
            token,
        })
    }

    /// Creates a client for whichever credential mode `credentials` selects.
    ///
    /// # Errors
    ///
    /// See [`GithubClient::with_token`] and [`GithubClient::for_installation`].
    pub async fn resolve(
        endpoints: GithubEndpoints,
        credentials: &Credentials,
    ) -> Result<Self, GithubError> {
        match credentials {
            Credentials::Token(token) => {
                info!("Authenticating with access token");
                Self::with_token(endpoints, token.clone())
            }
            Credentials::App(app) => {
                info!(
                    app_id = %app.app_id,
                    installation_id = app.installation_id,
                    "Authenticating as GitHub App installation"
                );
                Self::for_installation(endpoints, app).await
            }
        }
    }

    /// The token this client sends.
    pub fn access_token(&self) -> &AccessToken {
        &self.token
    }

    /// Runs a GraphQL query and deserialises its `data` object into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::Transport`] for network failures,
    /// [`GithubError::Status`] for non-success HTTP statuses,
    /// [`GithubError::GraphQl`] if the response carries errors,
    /// [`GithubError::MissingData`] if it carries neither errors nor data, and
    /// [`GithubError::Decode`] if `data` does not have the shape of `T`.
    pub async fn graphql<V, T>(&self, query: &str, variables: &V) -> Result<T, GithubError>
    where
        V: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoints.graphql_url();
        let transport = |source: reqwest::Error| GithubError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self
            .http
            .post(url)
            .header(reqwest::header::AUTHORIZATION, format!("bearer {}", self.token.expose()))
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        debug!(status = status.as_u16(), bytes = body.len(), "GraphQL response received");

        if !status.is_success() {
            return Err(GithubError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GraphQlResponse<T> = serde_json::from_str(&body)?;
        if !parsed.errors.is_empty() {
            return Err(GithubError::GraphQl {
                messages: parsed.errors.into_iter().map(|e| e.message).collect(),
            });
        }

        parsed.data.ok_or(GithubError::MissingData)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

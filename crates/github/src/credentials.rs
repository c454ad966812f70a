//! Credential resolution: a static access token, or a GitHub App installation.
//!
//! The App path signs a short-lived RS256 JWT with the App's private key and
//! exchanges it for an installation access token via the REST API.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use locator::LocatorError;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{GithubEndpoints, GithubError};

/// Input name of the GitHub App ID.
pub const INPUT_APP_ID: &str = "github-app-id";
/// Input name of the GitHub App private key.
pub const INPUT_APP_PRIVATE_KEY: &str = "github-app-private-key";
/// Input name of the GitHub App installation ID.
pub const INPUT_APP_INSTALLATION_ID: &str = "github-app-installation-id";

/// GitHub rejects App JWTs that expire more than ten minutes after issue.
const JWT_LIFETIME_SECS: i64 = 9 * 60;

/// Backdates `iat` to tolerate clock drift between the runner and GitHub.
const JWT_CLOCK_SKEW_SECS: i64 = 60;

// ---------------------------------------------------------------------------
// Access tokens
// ---------------------------------------------------------------------------

/// A bearer token for the GitHub API. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a token, returning `None` if it is empty.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        if v.is_empty() {
            None
        } else {
            Some(Self(v))
        }
    }

    /// Returns the secret value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// GitHub App identity used to mint an installation token.
#[derive(Clone)]
pub struct AppCredentials {
    pub app_id: String,
    pub private_key: String,
    pub installation_id: u64,
}

impl std::fmt::Debug for AppCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppCredentials")
            .field("app_id", &self.app_id)
            .field("installation_id", &self.installation_id)
            .finish_non_exhaustive()
    }
}

/// How the client authenticates.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// A personal access token or workflow `GITHUB_TOKEN`.
    Token(AccessToken),
    /// A GitHub App installation.
    App(AppCredentials),
}

impl Credentials {
    /// Chooses a credential mode from raw inputs.
    ///
    /// A non-empty token bypasses App authentication entirely. Without one,
    /// the App ID, private key and installation ID are all required, and the
    /// installation ID must be a base-10 integer.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::MissingInput`] naming the first missing App
    /// input, or [`LocatorError::InvalidInput`] for a malformed installation ID.
    pub fn from_inputs(
        token: Option<String>,
        app_id: Option<String>,
        private_key: Option<String>,
        installation_id: Option<String>,
    ) -> Result<Self, LocatorError> {
        if let Some(token) = token.and_then(AccessToken::new) {
            return Ok(Self::Token(token));
        }

        let app_id = required(app_id, INPUT_APP_ID)?;
        let private_key = required(private_key, INPUT_APP_PRIVATE_KEY)?;
        let installation_id = required(installation_id, INPUT_APP_INSTALLATION_ID)?;
        let installation_id = installation_id.trim().parse::<u64>().map_err(|e| {
            LocatorError::invalid_input(
                INPUT_APP_INSTALLATION_ID,
                format!("'{installation_id}' is not a base-10 integer ({e})"),
            )
        })?;

        Ok(Self::App(AppCredentials {
            app_id,
            private_key,
            installation_id,
        }))
    }
}

fn required(value: Option<String>, name: &str) -> Result<String, LocatorError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| LocatorError::missing_input(name))
}

// ---------------------------------------------------------------------------
// GitHub App flow
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AppClaims {
    pub(crate) iat: i64,
    pub(crate) exp: i64,
    pub(crate) iss: String,
}

/// Signs the JWT that authenticates as the App itself.
pub(crate) fn sign_app_jwt(app: &AppCredentials, now: DateTime<Utc>) -> Result<String, GithubError> {
    // Keys pasted into single-line secrets often carry literal "\n" sequences.
    let pem = app.private_key.trim().replace("\\n", "\n");
    let key = EncodingKey::from_rsa_pem(pem.as_bytes()).map_err(GithubError::InvalidPrivateKey)?;

    let claims = AppClaims {
        iat: (now - Duration::seconds(JWT_CLOCK_SKEW_SECS)).timestamp(),
        exp: (now + Duration::seconds(JWT_LIFETIME_SECS)).timestamp(),
        iss: app.app_id.trim().to_string(),
    };

    jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
        .map_err(GithubError::TokenSigning)
}

#[derive(Debug, Deserialize)]
struct InstallationTokenResponse {
    token: String,
    expires_at: Option<DateTime<Utc>>,
}

/// Exchanges App credentials for an installation access token.
#[tracing::instrument(skip_all, fields(app_id = %app.app_id, installation_id = app.installation_id))]
pub(crate) async fn exchange_installation_token(
    http: &reqwest::Client,
    endpoints: &GithubEndpoints,
    app: &AppCredentials,
) -> Result<AccessToken, GithubError> {
    let installation_id = app.installation_id;
    let exchange_failed = |reason: String| GithubError::TokenExchange {
        installation_id,
        reason,
    };

    let jwt = sign_app_jwt(app, Utc::now())?;
    let response = http
        .post(endpoints.installation_token_url(installation_id))
        .bearer_auth(jwt)
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .header("X-GitHub-Api-Version", crate::API_VERSION)
        .send()
        .await
        .map_err(|e| exchange_failed(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| exchange_failed(e.to_string()))?;
    if !status.is_success() {
        return Err(exchange_failed(format!("HTTP {}: {body}", status.as_u16())));
    }

    let parsed: InstallationTokenResponse =
        serde_json::from_str(&body).map_err(|e| exchange_failed(e.to_string()))?;
    let token = AccessToken::new(parsed.token)
        .ok_or_else(|| exchange_failed("response contained an empty token".to_string()))?;

    info!(expires_at = ?parsed.expires_at, "Obtained installation access token");
    Ok(token)
}

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod tests;

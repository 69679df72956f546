//! Token utilities.

use serde::Deserialize;
use time::{Duration, OffsetDateTime};

use crate::{error, Error};

/// Path of the OAuth2 client credentials token endpoint.
const TOKEN_PATH: &str = "/auth/oauth2/v2/token";

/// Tokens are renewed this long before they actually expire.
const REFRESH_MARGIN: Duration = Duration::seconds(60);

/// API client credentials, as issued in the OneLogin admin console.
#[derive(Clone)]
pub struct Credentials {
    /// The client id.
    pub client_id: String,

    /// The client secret.
    pub client_secret: String,
}

impl Credentials {
    /// Construct new credentials.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// An OAuth2 access token together with its expiry.
pub struct AccessToken {
    /// The bearer token
    pub token: String,

    /// When the API stops accepting the token
    pub expires_at: OffsetDateTime,
}

impl AccessToken {
    /// Whether the token can still be used at `now`, with a safety margin.
    pub fn is_fresh(&self, now: OffsetDateTime) -> bool {
        now + REFRESH_MARGIN < self.expires_at
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Run the client credentials grant against `host`.
pub(crate) async fn request_token(
    http: &reqwest::Client,
    host: &str,
    credentials: &Credentials,
) -> Result<AccessToken, Error> {
    let url = format!("{host}{TOKEN_PATH}");
    tracing::debug!(%url, "requesting access token");

    let response = http
        .post(&url)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .json(&serde_json::json!({ "grant_type": "client_credentials" }))
        .send()
        .await
        .map_err(error::network)?;

    let status = response.status();
    let body = response.bytes().await.map_err(error::network)?;
    if !status.is_success() {
        tracing::warn!(%status, "access token request rejected");
        return Err(error::status(status, &body));
    }

    let token_response: TokenResponse = serde_json::from_slice(&body).map_err(error::codec)?;
    tracing::info!(expires_in = token_response.expires_in, "acquired access token");

    Ok(AccessToken {
        token: token_response.access_token,
        expires_at: OffsetDateTime::now_utc() + Duration::seconds(token_response.expires_in),
    })
}

use std::sync::Arc;

use http::{header::HeaderName, HeaderValue};
use onelogin_common::session_login_tokens::{SessionLoginToken, SessionLoginTokenRequest};

use crate::{
    error,
    repository::{Repository, Request},
    Error,
};

use super::Resource;

const ENDPOINT: &str = "/api/1/login/auth";

/// Header naming the origin allowed to use the issued session token.
const ALLOWED_ORIGIN: HeaderName = HeaderName::from_static("custom-allowed-origin-header-1");

/// Service issuing session login tokens.
#[derive(Clone)]
pub struct SessionLoginTokensService {
    resource: Resource,
}

impl SessionLoginTokensService {
    /// Create the service for the API at `host`.
    pub fn new(repository: Arc<dyn Repository>, host: &str) -> Self {
        Self {
            resource: Resource::new(repository, host, ENDPOINT),
        }
    }

    /// Exchange user credentials for a session login token.
    pub async fn create(
        &self,
        request: &SessionLoginTokenRequest,
    ) -> Result<SessionLoginToken, Error> {
        let mut api_request = Request::json(self.resource.endpoint()).with_payload(request)?;
        if let Some(origin) = &request.allowed_origin {
            api_request = api_request.with_header(
                ALLOWED_ORIGIN,
                HeaderValue::from_str(origin).map_err(error::unclassified)?,
            );
        }

        let body = self.resource.repository().create(api_request).await?;

        decode_token(&body)
    }
}

/// Version 1 endpoints wrap their result as `{"status": .., "data": [..]}`.
fn decode_token(body: &[u8]) -> Result<SessionLoginToken, Error> {
    let mut response: serde_json::Value = serde_json::from_slice(body).map_err(error::codec)?;

    if let Some(serde_json::Value::Array(data)) = response.get_mut("data") {
        if data.is_empty() {
            return Err(Error::Codec(anyhow::anyhow!("empty session login token response")));
        }
        response = data.swap_remove(0);
    }

    serde_json::from_value(response).map_err(error::codec)
}

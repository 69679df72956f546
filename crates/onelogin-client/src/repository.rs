//! The transport abstraction all resource services are built on.

use std::{future::Future, pin::Pin};

use http::{
    header::{HeaderName, CONTENT_TYPE},
    HeaderMap, HeaderValue,
};
use serde::Serialize;

use crate::{error, Error};

/// How a [Request] is authenticated.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AuthMethod {
    /// OAuth2 access token in the `Authorization: Bearer` header.
    Bearer,

    /// Client id and secret as HTTP basic auth.
    Basic,

    /// No authentication.
    None,
}

/// A single API request, independent of the HTTP method.
///
/// The method is chosen by the [Repository] operation the request is passed to.
#[derive(Clone, Debug)]
pub struct Request {
    /// Absolute URL of the endpoint.
    pub url: String,

    /// Extra request headers.
    pub headers: HeaderMap,

    /// How the request is authenticated.
    pub auth_method: AuthMethod,

    /// The JSON body, or the query parameters for reads.
    pub payload: Option<serde_json::Value>,
}

impl Request {
    /// A bearer-authenticated JSON request without payload.
    pub fn json(url: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Self {
            url: url.into(),
            headers,
            auth_method: AuthMethod::Bearer,
            payload: None,
        }
    }

    /// Attach a payload, encoded as JSON.
    pub fn with_payload(mut self, payload: &impl Serialize) -> Result<Self, Error> {
        self.payload = Some(serde_json::to_value(payload).map_err(error::codec)?);
        Ok(self)
    }

    /// Add a request header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Override the authentication method.
    pub fn with_auth_method(mut self, auth_method: AuthMethod) -> Self {
        self.auth_method = auth_method;
        self
    }

    /// The payload flattened to URL query parameters.
    ///
    /// Nulls are skipped, arrays are comma joined.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let Some(serde_json::Value::Object(object)) = &self.payload else {
            return vec![];
        };

        object
            .iter()
            .filter_map(|(key, value)| Some((key.clone(), query_value(value)?)))
            .collect()
    }

    /// The numeric `limit` query parameter, if any.
    pub(crate) fn limit(&self) -> Option<usize> {
        match self.payload.as_ref()?.get("limit")? {
            serde_json::Value::String(limit) => limit.parse().ok(),
            serde_json::Value::Number(limit) => limit.as_u64().map(|limit| limit as usize),
            _ => None,
        }
    }

    /// Point the request at the page following `cursor`.
    pub(crate) fn set_cursor(&mut self, cursor: String) {
        let payload = self
            .payload
            .get_or_insert_with(|| serde_json::Value::Object(Default::default()));

        if let serde_json::Value::Object(object) = payload {
            object.insert("cursor".to_string(), serde_json::Value::String(cursor));
        }
    }
}

fn query_value(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(value) => Some(value.clone()),
        serde_json::Value::Array(values) => Some(
            values
                .iter()
                .filter_map(query_value)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}

/// The future returned by [Repository] operations.
pub type RepositoryFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, Error>> + Send + 'a>>;

/// Performs the HTTP round trip for resource services.
///
/// Implementations return the raw response body and leave decoding to the caller.
pub trait Repository: Send + Sync {
    /// Fetch a resource or a collection.
    ///
    /// Returns one body per page retrieved.
    fn read(&self, request: Request) -> RepositoryFuture<'_, Vec<Vec<u8>>>;

    /// Create a resource.
    fn create(&self, request: Request) -> RepositoryFuture<'_, Vec<u8>>;

    /// Update a resource.
    fn update(&self, request: Request) -> RepositoryFuture<'_, Vec<u8>>;

    /// Delete a resource.
    fn destroy(&self, request: Request) -> RepositoryFuture<'_, Vec<u8>>;
}

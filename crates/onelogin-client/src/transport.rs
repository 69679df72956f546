//! The production [Repository], backed by `reqwest`.

use std::{sync::Arc, time::Duration};

use arc_swap::ArcSwapOption;
use http::{HeaderMap, Method};
use serde::de::IgnoredAny;
use time::OffsetDateTime;

use crate::{
    error,
    repository::{AuthMethod, Repository, RepositoryFuture, Request},
    token::{self, AccessToken, Credentials},
    Error,
};

/// Response header carrying the cursor of the next page.
const AFTER_CURSOR: &str = "after-cursor";

/// A [Repository] that talks to the OneLogin API over HTTPS.
///
/// Bearer requests are authenticated with a client credentials access token,
/// which is cached and renewed shortly before it expires.
pub struct HttpRepository {
    http: reqwest::Client,
    host: String,
    credentials: Option<Credentials>,
    token: ArcSwapOption<AccessToken>,
    refresh_lock: tokio::sync::Mutex<()>,
}

impl HttpRepository {
    /// Create a repository for the API at `host`.
    pub fn new(
        host: impl Into<String>,
        credentials: Option<Credentials>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let http = reqwest::ClientBuilder::new()
            .user_agent(concat!("onelogin-client/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(error::unclassified)?;

        Ok(Self {
            http,
            host: host.into(),
            credentials,
            token: ArcSwapOption::empty(),
            refresh_lock: tokio::sync::Mutex::new(()),
        })
    }

    /// Make sure a valid access token is held, requesting one if needed.
    pub async fn authenticate(&self) -> Result<(), Error> {
        self.access_token().await.map(|_| ())
    }

    async fn access_token(&self) -> Result<Arc<AccessToken>, Error> {
        if let Some(token) = self.fresh_token() {
            return Ok(token);
        }

        // Only one task renews the token, the rest pick up its result.
        let _guard = self.refresh_lock.lock().await;
        if let Some(token) = self.fresh_token() {
            return Ok(token);
        }

        let token = Arc::new(
            token::request_token(&self.http, &self.host, self.credentials()?).await?,
        );
        self.token.store(Some(token.clone()));

        Ok(token)
    }

    fn fresh_token(&self) -> Option<Arc<AccessToken>> {
        self.token
            .load_full()
            .filter(|token| token.is_fresh(OffsetDateTime::now_utc()))
    }

    fn credentials(&self) -> Result<&Credentials, Error> {
        self.credentials
            .as_ref()
            .ok_or(Error::Config("client credentials not provided"))
    }

    async fn send(&self, method: Method, request: &Request) -> Result<reqwest::Response, Error> {
        let mut builder = self
            .http
            .request(method.clone(), &request.url)
            .headers(request.headers.clone());

        builder = match request.auth_method {
            AuthMethod::Bearer => builder.bearer_auth(&self.access_token().await?.token),
            AuthMethod::Basic => {
                let credentials = self.credentials()?;
                builder.basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            }
            AuthMethod::None => builder,
        };

        if method == Method::GET {
            builder = builder.query(&request.query_pairs());
        } else if let Some(payload) = &request.payload {
            builder = builder.json(payload);
        }

        tracing::debug!(%method, url = %request.url, "sending request");

        let response = builder.send().await.map_err(error::network)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.map_err(error::network)?;
        tracing::warn!(%method, url = %request.url, %status, "request failed");

        Err(error::status(status, &body))
    }

    async fn send_for_body(&self, method: Method, request: Request) -> Result<Vec<u8>, Error> {
        let response = self.send(method, &request).await?;
        Ok(response.bytes().await.map_err(error::network)?.to_vec())
    }
}

impl Repository for HttpRepository {
    /// Follows `After-Cursor` pagination while a numeric `limit` is requested and not yet reached.
    ///
    /// Without a limit only the first page is fetched, sized by the API default.
    fn read(&self, mut request: Request) -> RepositoryFuture<'_, Vec<Vec<u8>>> {
        Box::pin(async move {
            let limit = request.limit();
            let mut pages = vec![];
            let mut gathered = 0;

            loop {
                let response = self.send(Method::GET, &request).await?;
                let cursor = after_cursor(response.headers());
                let page = response.bytes().await.map_err(error::network)?.to_vec();

                let count = count_items(&page);
                gathered += count;
                pages.push(page);

                match (limit, cursor) {
                    (Some(limit), Some(cursor)) if count > 0 && gathered < limit => {
                        request.set_cursor(cursor);
                    }
                    _ => return Ok(pages),
                }
            }
        })
    }

    fn create(&self, request: Request) -> RepositoryFuture<'_, Vec<u8>> {
        Box::pin(self.send_for_body(Method::POST, request))
    }

    fn update(&self, request: Request) -> RepositoryFuture<'_, Vec<u8>> {
        Box::pin(self.send_for_body(Method::PUT, request))
    }

    fn destroy(&self, request: Request) -> RepositoryFuture<'_, Vec<u8>> {
        Box::pin(self.send_for_body(Method::DELETE, request))
    }
}

fn after_cursor(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AFTER_CURSOR)
        .and_then(|value| value.to_str().ok())
        .filter(|cursor| !cursor.is_empty())
        .map(str::to_string)
}

/// Number of items in a page, zero if the page is not a JSON array.
fn count_items(page: &[u8]) -> usize {
    serde_json::from_slice::<Vec<IgnoredAny>>(page)
        .map(|items| items.len())
        .unwrap_or(0)
}

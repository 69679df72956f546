use std::{borrow::Cow, sync::Arc, time::Duration};

use crate::{
    legal_values::{LegalValues, RepositoryLegalValues},
    repository::Repository,
    token::Credentials,
    transport::HttpRepository,
    Client, ClientState, Error, CLIENT_ID_ENV, CLIENT_SECRET_ENV, DEFAULT_URL, URL_ENV,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A builder for configuring a [Client].
pub struct ClientBuilder {
    url: Cow<'static, str>,
    credentials: Option<Credentials>,
    timeout: Duration,
    repository: Option<Arc<dyn Repository>>,
    legal_values: Option<Arc<dyn LegalValues>>,
}

impl ClientBuilder {
    pub(crate) fn new() -> Self {
        Self {
            url: Cow::Borrowed(DEFAULT_URL),
            credentials: None,
            timeout: DEFAULT_TIMEOUT,
            repository: None,
            legal_values: None,
        }
    }

    /// Read the configuration from the environment.
    ///
    /// `ONELOGIN_CLIENT_ID` and `ONELOGIN_CLIENT_SECRET` are required,
    /// `ONELOGIN_OAPI_URL` overrides the API URL when set.
    pub fn from_environment(self) -> Result<Self, Error> {
        self.from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Error> {
        let client_id = lookup(CLIENT_ID_ENV)
            .filter(|value| !value.is_empty())
            .ok_or(Error::Config("ONELOGIN_CLIENT_ID is not set"))?;
        let client_secret = lookup(CLIENT_SECRET_ENV)
            .filter(|value| !value.is_empty())
            .ok_or(Error::Config("ONELOGIN_CLIENT_SECRET is not set"))?;

        self.credentials = Some(Credentials::new(client_id, client_secret));
        if let Some(url) = lookup(URL_ENV).filter(|value| !value.is_empty()) {
            self = self.with_url(url);
        }

        Ok(self)
    }

    /// Override the API URL (default is https://api.us.onelogin.com)
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into().into();
        self
    }

    /// Use the API of a region, e.g. `us` or `eu`.
    pub fn with_region(self, region: &str) -> Self {
        self.with_url(format!("https://api.{region}.onelogin.com"))
    }

    /// Authenticate with the given API client credentials.
    pub fn with_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::new(client_id, client_secret));
        self
    }

    /// Timeout of each HTTP request (default is 30 seconds).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send requests through a custom [Repository] instead of HTTP.
    pub fn with_repository(mut self, repository: Arc<dyn Repository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Look up user mapping legal values through a custom [LegalValues].
    pub fn with_legal_values(mut self, legal_values: Arc<dyn LegalValues>) -> Self {
        self.legal_values = Some(legal_values);
        self
    }

    /// The API URL requests will be sent to.
    pub fn url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Build the client without contacting the API.
    pub fn build(mut self) -> Result<Client, Error> {
        let repository: Arc<dyn Repository> = match self.repository.take() {
            Some(repository) => repository,
            None => Arc::new(self.http_repository()?),
        };

        Ok(self.assemble(repository))
    }

    /// Build the client and acquire a first access token, so that bad credentials surface here.
    ///
    /// With a custom [Repository] nothing is contacted.
    pub async fn connect(mut self) -> Result<Client, Error> {
        let repository: Arc<dyn Repository> = match self.repository.take() {
            Some(repository) => repository,
            None => {
                let http = Arc::new(self.http_repository()?);
                http.authenticate().await?;
                http
            }
        };

        Ok(self.assemble(repository))
    }

    fn http_repository(&self) -> Result<HttpRepository, Error> {
        let credentials = self
            .credentials
            .clone()
            .ok_or(Error::Config("client credentials not provided"))?;

        HttpRepository::new(self.url(), Some(credentials), self.timeout)
    }

    fn assemble(self, repository: Arc<dyn Repository>) -> Client {
        let host = self.url().to_string();
        let legal_values = self.legal_values.unwrap_or_else(|| {
            Arc::new(RepositoryLegalValues::new(repository.clone(), host.clone()))
        });

        Client {
            state: Arc::new(ClientState {
                host,
                repository,
                legal_values,
            }),
        }
    }
}

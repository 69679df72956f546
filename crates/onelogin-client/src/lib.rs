//! `onelogin-client` is an asynchronous Rust client for the OneLogin REST API.
//!
//! Each REST resource is exposed as a service with `query`, `get_one`, `create`,
//! `update` and `destroy` operations:
//!
//! ```rust,no_run
//! # async fn test() -> Result<(), onelogin_client::Error> {
//! use onelogin_client::{models::user_mappings::UserMappingsQuery, Client};
//!
//! let client = Client::builder().from_environment()?.connect().await?;
//!
//! let mappings = client
//!     .user_mappings()
//!     .query(&UserMappingsQuery::default())
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::sync::Arc;

use legal_values::LegalValues;
use repository::Repository;

pub use builder::ClientBuilder;
pub use error::Error;
pub use onelogin_common as models;
pub use services::{
    auth_servers::AuthServersService, session_login_tokens::SessionLoginTokensService,
    user_mappings::UserMappingsService, users::UsersService,
};

mod builder;
mod error;

pub mod legal_values;
pub mod mock;
pub mod repository;
pub mod services;
pub mod token;
pub mod transport;

const DEFAULT_URL: &str = "https://api.us.onelogin.com";

const CLIENT_ID_ENV: &str = "ONELOGIN_CLIENT_ID";
const CLIENT_SECRET_ENV: &str = "ONELOGIN_CLIENT_SECRET";
const URL_ENV: &str = "ONELOGIN_OAPI_URL";

/// The OneLogin client handle.
///
/// Cheap to clone; clones share the transport and its cached access token.
#[derive(Clone)]
pub struct Client {
    state: Arc<ClientState>,
}

struct ClientState {
    host: String,
    repository: Arc<dyn Repository>,
    legal_values: Arc<dyn LegalValues>,
}

impl Client {
    /// Construct a new builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The API URL this client talks to.
    pub fn host(&self) -> &str {
        &self.state.host
    }

    /// The transport used by all services of this client.
    pub fn repository(&self) -> Arc<dyn Repository> {
        self.state.repository.clone()
    }

    /// API authorization servers.
    pub fn auth_servers(&self) -> AuthServersService {
        AuthServersService::new(self.repository(), self.host())
    }

    /// Session login tokens.
    pub fn session_login_tokens(&self) -> SessionLoginTokensService {
        SessionLoginTokensService::new(self.repository(), self.host())
    }

    /// User mappings, validated against the legal values before being written.
    pub fn user_mappings(&self) -> UserMappingsService {
        UserMappingsService::new(
            self.repository(),
            self.state.legal_values.clone(),
            self.host(),
        )
    }

    /// Users.
    pub fn users(&self) -> UsersService {
        UsersService::new(self.repository(), self.host())
    }
}

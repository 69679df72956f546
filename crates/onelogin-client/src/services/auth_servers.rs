use std::sync::Arc;

use onelogin_common::auth_servers::{AuthServer, AuthServerQuery};

use crate::{repository::Repository, Error};

use super::Resource;

const ENDPOINT: &str = "/api/2/api_authorizations";

/// Service for the API authorization server resource.
#[derive(Clone)]
pub struct AuthServersService {
    resource: Resource,
}

impl AuthServersService {
    /// Create the service for the API at `host`.
    pub fn new(repository: Arc<dyn Repository>, host: &str) -> Self {
        Self {
            resource: Resource::new(repository, host, ENDPOINT),
        }
    }

    /// List the auth servers matching `query`. An empty query lists all of them.
    pub async fn query(&self, query: &AuthServerQuery) -> Result<Vec<AuthServer>, Error> {
        self.resource.query(query).await
    }

    /// Get one auth server by id.
    pub async fn get_one(&self, id: i32) -> Result<AuthServer, Error> {
        self.resource.get_one(id).await
    }

    /// Create an auth server. On success the server-assigned fields are written back into `auth_server`.
    pub async fn create(&self, auth_server: &mut AuthServer) -> Result<(), Error> {
        self.resource.create(auth_server).await
    }

    /// Update the auth server `id`. On success the response is written back into `auth_server`.
    pub async fn update(&self, id: i32, auth_server: &mut AuthServer) -> Result<(), Error> {
        self.resource.update(id, auth_server).await
    }

    /// Delete the auth server `id`.
    pub async fn destroy(&self, id: i32) -> Result<(), Error> {
        self.resource.destroy(id).await
    }
}

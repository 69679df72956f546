use std::sync::Arc;

use onelogin_common::users::{User, UserQuery};

use crate::{repository::Repository, Error};

use super::Resource;

const ENDPOINT: &str = "/api/2/users";

/// Service for the user resource.
#[derive(Clone)]
pub struct UsersService {
    resource: Resource,
}

impl UsersService {
    /// Create the service for the API at `host`.
    pub fn new(repository: Arc<dyn Repository>, host: &str) -> Self {
        Self {
            resource: Resource::new(repository, host, ENDPOINT),
        }
    }

    /// List the users matching `query`.
    pub async fn query(&self, query: &UserQuery) -> Result<Vec<User>, Error> {
        self.resource.query(query).await
    }

    /// Get one user by id.
    pub async fn get_one(&self, id: i32) -> Result<User, Error> {
        self.resource.get_one(id).await
    }

    /// Create a user, writing the assigned id back into `user`.
    pub async fn create(&self, user: &mut User) -> Result<(), Error> {
        self.resource.create(user).await
    }

    /// Update the user `id`.
    pub async fn update(&self, id: i32, user: &mut User) -> Result<(), Error> {
        self.resource.update(id, user).await
    }

    /// Delete the user `id`.
    pub async fn destroy(&self, id: i32) -> Result<(), Error> {
        self.resource.destroy(id).await
    }
}

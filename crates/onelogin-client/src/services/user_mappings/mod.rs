use std::sync::Arc;

use onelogin_common::user_mappings::{UserMapping, UserMappingsQuery};

use crate::{legal_values::LegalValues, repository::Repository, Error};

use super::Resource;

mod validation;

pub use validation::validate_mapping_values;

const ENDPOINT: &str = "/api/2/mappings";

/// Service for the user mapping resource.
///
/// Mappings are checked against the API's legal values before they are created or updated.
#[derive(Clone)]
pub struct UserMappingsService {
    resource: Resource,
    legal_values: Arc<dyn LegalValues>,
}

impl UserMappingsService {
    /// Create the service for the API at `host`.
    pub fn new(
        repository: Arc<dyn Repository>,
        legal_values: Arc<dyn LegalValues>,
        host: &str,
    ) -> Self {
        Self {
            resource: Resource::new(repository, host, ENDPOINT),
            legal_values,
        }
    }

    /// List the mappings matching `query`.
    ///
    /// Without a `limit`, the API's default page size applies.
    pub async fn query(&self, query: &UserMappingsQuery) -> Result<Vec<UserMapping>, Error> {
        self.resource.query(query).await
    }

    /// Get one mapping by id.
    pub async fn get_one(&self, id: i32) -> Result<UserMapping, Error> {
        self.resource.get_one(id).await
    }

    /// Validate and create a mapping. On success the assigned id is written back into `mapping`.
    ///
    /// Nothing is sent if validation fails.
    pub async fn create(&self, mapping: &mut UserMapping) -> Result<(), Error> {
        validate_mapping_values(mapping, self.legal_values.as_ref()).await?;
        self.resource.create(mapping).await
    }

    /// Validate and update the mapping `id`.
    ///
    /// Nothing is sent if validation fails.
    pub async fn update(&self, id: i32, mapping: &mut UserMapping) -> Result<(), Error> {
        validate_mapping_values(mapping, self.legal_values.as_ref()).await?;
        self.resource.update(id, mapping).await
    }

    /// Delete the mapping `id`.
    pub async fn destroy(&self, id: i32) -> Result<(), Error> {
        self.resource.destroy(id).await
    }
}

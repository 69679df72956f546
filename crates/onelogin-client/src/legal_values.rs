//! Lookup of the values the API accepts for user mapping fields.

use std::{future::Future, pin::Pin, sync::Arc};

use onelogin_common::legal_values::LegalValueSet;

use crate::{
    error,
    repository::{Repository, Request},
    Error,
};

/// Fetches the currently accepted values for a user mapping field category.
pub trait LegalValues: Send + Sync {
    /// Fetch the legal values published at `address`, a path relative to the API host.
    ///
    /// An empty set means the category has no constraint.
    fn fetch<'a>(
        &'a self,
        address: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<LegalValueSet, Error>> + Send + 'a>>;
}

/// [LegalValues] read through a [Repository].
#[derive(Clone)]
pub struct RepositoryLegalValues {
    repository: Arc<dyn Repository>,
    host: String,
}

impl RepositoryLegalValues {
    /// Look up legal values on the API at `host`.
    pub fn new(repository: Arc<dyn Repository>, host: impl Into<String>) -> Self {
        Self {
            repository,
            host: host.into(),
        }
    }
}

impl LegalValues for RepositoryLegalValues {
    fn fetch<'a>(
        &'a self,
        address: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<LegalValueSet, Error>> + Send + 'a>> {
        Box::pin(async move {
            let pages = self
                .repository
                .read(Request::json(format!("{}{address}", self.host)))
                .await?;

            let mut legal_values = LegalValueSet::default();
            for page in pages {
                legal_values.extend(decode_legal_values(&page)?.iter().map(str::to_string));
            }

            Ok(legal_values)
        })
    }
}

/// Decode a legal value response body.
///
/// An empty body is read as the empty set, anything else must be a list of `{"value": ..}` records.
pub fn decode_legal_values(body: &[u8]) -> Result<LegalValueSet, Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(LegalValueSet::default());
    }

    serde_json::from_slice(body).map_err(error::codec)
}

//! Resource services, one per REST resource.

use std::{fmt::Display, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    error,
    repository::{Repository, Request},
    Error,
};

/// API authorization servers.
pub mod auth_servers;

/// Session login tokens.
pub mod session_login_tokens;

/// User mappings and their validation.
pub mod user_mappings;

/// Users.
pub mod users;

/// CRUD plumbing for a single collection endpoint.
#[derive(Clone)]
pub(crate) struct Resource {
    endpoint: String,
    repository: Arc<dyn Repository>,
}

impl Resource {
    pub fn new(repository: Arc<dyn Repository>, host: &str, path: &str) -> Self {
        Self {
            endpoint: format!("{host}{path}"),
            repository,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn repository(&self) -> &dyn Repository {
        self.repository.as_ref()
    }

    fn item_url(&self, id: impl Display) -> String {
        format!("{}/{id}", self.endpoint)
    }

    pub async fn query<T: DeserializeOwned>(&self, query: &impl Serialize) -> Result<Vec<T>, Error> {
        let request = Request::json(&self.endpoint).with_payload(query)?;
        let limit = request.limit();
        let pages = self.repository.read(request).await?;

        let mut items = vec![];
        for page in pages {
            items.extend(decode_list::<T>(&page)?);
        }

        // Pages may overshoot the requested limit.
        if let Some(limit) = limit {
            items.truncate(limit);
        }

        Ok(items)
    }

    pub async fn get_one<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, Error> {
        let pages = self.repository.read(Request::json(self.item_url(id))).await?;
        let page = pages.into_iter().next().unwrap_or_default();

        serde_json::from_slice(&page).map_err(error::codec)
    }

    pub async fn create<T>(&self, item: &mut T) -> Result<(), Error>
    where
        T: Serialize + DeserializeOwned,
    {
        let body = self
            .repository
            .create(Request::json(&self.endpoint).with_payload(&*item)?)
            .await?;

        merge_response(item, &body)
    }

    pub async fn update<T>(&self, id: impl Display, item: &mut T) -> Result<(), Error>
    where
        T: Serialize + DeserializeOwned,
    {
        let body = self
            .repository
            .update(Request::json(self.item_url(id)).with_payload(&*item)?)
            .await?;

        merge_response(item, &body)
    }

    pub async fn destroy(&self, id: impl Display) -> Result<(), Error> {
        self.repository
            .destroy(Request::json(self.item_url(id)))
            .await?;
        Ok(())
    }
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

/// Decode one page of a collection. A blank page holds no items.
pub(crate) fn decode_list<T: DeserializeOwned>(page: &[u8]) -> Result<Vec<T>, Error> {
    if is_blank(page) {
        return Ok(vec![]);
    }

    serde_json::from_slice(page).map_err(error::codec)
}

/// Apply a create/update response to the submitted item.
///
/// Fields in the response object replace those of the item, fields absent from
/// the response are kept. A blank body leaves the item as is, and the item is
/// only written once the merged value decodes.
pub(crate) fn merge_response<T>(item: &mut T, body: &[u8]) -> Result<(), Error>
where
    T: Serialize + DeserializeOwned,
{
    if is_blank(body) {
        return Ok(());
    }

    let response: serde_json::Value = serde_json::from_slice(body).map_err(error::codec)?;
    let merged = match (serde_json::to_value(&*item).map_err(error::codec)?, response) {
        (serde_json::Value::Object(mut current), serde_json::Value::Object(response)) => {
            current.extend(response);
            serde_json::Value::Object(current)
        }
        (_, response) => response,
    };

    *item = serde_json::from_value(merged).map_err(error::codec)?;
    Ok(())
}

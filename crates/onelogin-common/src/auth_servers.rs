//! API authorization server types.

use serde::{Deserialize, Serialize};

/// An API authorization server.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct AuthServer {
    /// Assigned by the API when the server is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Free text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Token issuance configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<AuthServerConfiguration>,
}

/// Token issuance settings of an [AuthServer].
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct AuthServerConfiguration {
    /// The identifier of the protected API, used as the token audience default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_identifier: Option<String>,

    /// Accepted token audiences.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audiences: Vec<String>,

    /// Access token lifetime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token_expiration_minutes: Option<i32>,

    /// Refresh token lifetime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token_expiration_minutes: Option<i32>,
}

/// Filters for listing auth servers. Unset fields are not sent.
#[derive(Clone, Default, Serialize, Debug)]
pub struct AuthServerQuery {
    /// Maximum number of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,

    /// Page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,

    /// Pagination cursor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

//! User types.

use serde::{Deserialize, Serialize};

/// A OneLogin user.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Debug)]
pub struct User {
    /// Assigned by the API when the user is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,

    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,

    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Numeric account status (active, suspended, locked, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,

    /// Numeric approval state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<i32>,

    /// Identifier in an external directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    /// LDAP distinguished name, for directory-synced users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinguished_name: Option<String>,

    /// Roles assigned to the user.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub role_ids: Vec<i32>,

    /// Account-defined custom attributes, encoded as a JSON map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_attributes: Option<serde_json::Map<String, serde_json::Value>>,

    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

/// Filters for listing users. Unset fields are not sent.
#[derive(Clone, Default, Serialize, Debug)]
#[allow(missing_docs)]
pub struct UserQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_until: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_until: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_until: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ids: Option<String>,
    /// Comma separated list of fields to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

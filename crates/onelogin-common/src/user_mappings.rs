//! User mapping types.
//!
//! A user mapping is a rule that applies [UserMappingAction]s to users matching its [UserMappingCondition]s.

use serde::{Deserialize, Serialize};

/// A user mapping rule.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct UserMapping {
    /// Assigned by the API when the mapping is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Whether `all` or `any` of the conditions must match.
    #[serde(default, rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_kind: Option<String>,

    /// Disabled mappings are kept but not evaluated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Evaluation order among enabled mappings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,

    /// The conditions, in order.
    #[serde(default)]
    pub conditions: Vec<UserMappingCondition>,

    /// The actions, in order.
    #[serde(default)]
    pub actions: Vec<UserMappingAction>,
}

/// A condition a user must satisfy for the mapping to apply.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct UserMappingCondition {
    /// The user attribute being tested, e.g. `has_role`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// The comparison operator, e.g. `ri`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,

    /// The value compared against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// An action applied to matching users.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct UserMappingAction {
    /// The action, e.g. `set_status`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    /// The action arguments. Some actions take several values.
    #[serde(default)]
    pub value: Vec<String>,
}

/// Filters for listing user mappings. Unset fields are not sent.
#[derive(Clone, Default, Serialize, Debug)]
pub struct UserMappingsQuery {
    /// Maximum number of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,

    /// Page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,

    /// Pagination cursor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,

    /// Only mappings with a condition on this source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_condition: Option<String>,

    /// Only mappings with a condition of this type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_condition_type: Option<String>,

    /// Only mappings with this action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_action: Option<String>,

    /// Only mappings with an action of this type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_action_type: Option<String>,

    /// Only enabled (`true`) or disabled (`false`) mappings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<String>,
}

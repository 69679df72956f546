//! Session login token types.

use serde::{Deserialize, Serialize};

/// Credentials exchanged for a [SessionLoginToken].
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct SessionLoginTokenRequest {
    /// The user's username or email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username_or_email: Option<String>,

    /// The user's password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// The account subdomain the user belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,

    /// Comma separated list of user fields to include in the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,

    /// The origin that will later use the session token (CORS).
    ///
    /// Sent as a request header rather than in the body.
    #[serde(skip)]
    pub allowed_origin: Option<String>,
}

/// The outcome of a session login request.
///
/// Either a `session_token` is issued directly, or a `state_token` is returned
/// together with the MFA `devices` that must complete the login.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct SessionLoginToken {
    /// `Authenticated` or a pending-MFA status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// The authenticated user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,

    /// Where to send the user after login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_to_url: Option<String>,

    /// Token expiry timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,

    /// Token that can be exchanged for a browser session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,

    /// Token identifying a login pending MFA verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_token: Option<String>,

    /// MFA verification endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,

    /// MFA devices available to the user.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub devices: Vec<MfaDevice>,
}

/// The user a [SessionLoginToken] was issued for.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct SessionUser {
    #[allow(missing_docs)]
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
}

/// An MFA device that can verify a pending login.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct MfaDevice {
    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<i64>,

    /// E.g. `Google Authenticator`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
}

//! `onelogin-common` defines the datatypes exchanged with the OneLogin REST API.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth_servers;
pub mod legal_values;
pub mod session_login_tokens;
pub mod user_mappings;
pub mod users;

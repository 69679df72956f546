use http::StatusCode;

/// Errors that can happen either during client configuration or while talking to the API.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The client is missing required configuration.
    #[error("configuration error: {0}")]
    Config(&'static str),

    /// The credentials were rejected or an operation was forbidden.
    #[error("unauthorized: {0}")]
    Unauthorized(anyhow::Error),

    /// A network problem.
    #[error("network error: {0}")]
    Network(anyhow::Error),

    /// The API answered with a non-success status.
    #[error("api error ({status}): {message}")]
    Api {
        /// The HTTP status of the response.
        status: StatusCode,

        /// The error message reported by the API, or the raw response body.
        message: String,
    },

    /// A request or response body could not be encoded or decoded.
    #[error("encoding error: {0}")]
    Codec(anyhow::Error),

    /// A user mapping holds values the API does not accept.
    ///
    /// The message lists every offending field.
    #[error("{0}")]
    Validation(String),

    /// Other type of unclassified error.
    #[error("unclassified error: {0}")]
    Unclassified(anyhow::Error),
}

pub(crate) fn unclassified(err: impl std::error::Error + Send + Sync + 'static) -> Error {
    Error::Unclassified(anyhow::Error::from(err))
}

pub(crate) fn network(err: impl std::error::Error + Send + Sync + 'static) -> Error {
    Error::Network(anyhow::Error::from(err))
}

pub(crate) fn codec(err: impl std::error::Error + Send + Sync + 'static) -> Error {
    Error::Codec(anyhow::Error::from(err))
}

/// Classify a non-success response.
pub(crate) fn status(status: StatusCode, body: &[u8]) -> Error {
    let message = api_message(body);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Error::Unauthorized(anyhow::anyhow!("{status}: {message}"))
        }
        _ => Error::Api { status, message },
    }
}

/// Extract the human-readable message from an error body.
///
/// Version 2 endpoints answer `{"message": ..}`, version 1 endpoints nest it
/// under `status`, and the token endpoint may use `description`.
fn api_message(body: &[u8]) -> String {
    if let Ok(serde_json::Value::Object(object)) = serde_json::from_slice(body) {
        let message = object
            .get("message")
            .or_else(|| object.get("status").and_then(|status| status.get("message")))
            .or_else(|| object.get("description"))
            .and_then(serde_json::Value::as_str);

        if let Some(message) = message {
            return message.to_string();
        }
    }

    String::from_utf8_lossy(body).trim().to_string()
}

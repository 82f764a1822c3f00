//! Error types for DigitalOcean API calls.
//!
//! Every failure the client core can produce is a variant of [`Error`]. Errors
//! reported by the API itself are decoded into [`ApiError`], which keeps the
//! provider's `id` and `message` verbatim so callers can match on them.

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// The error object the API returns in the body of a failed request.
///
/// # Examples
///
/// ```
/// use oceancall::ApiError;
///
/// let err = ApiError::from_body(br#"{"id":"not_found","message":"The resource was not found"}"#)
///     .unwrap();
///
/// assert_eq!(err.id, "not_found");
/// assert_eq!(err.to_string(), "API Error: not_found: The resource was not found");
/// ```
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("API Error: {id}: {message}")]
pub struct ApiError {
    /// Machine-readable error identifier, e.g. `not_found` or `unauthorized`.
    pub id: String,
    /// Human-readable description.
    pub message: String,
}

impl ApiError {
    /// Creates an `ApiError` from its parts.
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Decodes an error body. Both `id` and `message` must be present as strings;
    /// any other field is ignored.
    pub fn from_body(body: &[u8]) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

/// The main error type for the client core.
///
/// # Examples
///
/// ```no_run
/// use oceancall::{Client, Error};
/// use std::collections::HashMap;
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new("my-token")?;
/// let request = client.build_request(&HashMap::new(), "GET", "/droplets/42")?;
///
/// match client.execute(request).await {
///     Ok(response) => println!("status {}", response.status()),
///     Err(Error::Api { error, .. }) if error.id == "not_found" => println!("no such droplet"),
///     Err(e) => eprintln!("request failed: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The client was configured with invalid input, such as an empty token.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The base URL could not be parsed or cannot have paths joined onto it.
    #[error("Error parsing base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The method, URL or headers cannot form a valid HTTP request.
    #[error("Error creating request: {0}")]
    RequestConstruction(String),

    /// The transport failed before a complete response was received.
    ///
    /// The wrapped `reqwest::Error` is exactly the one the transport returned.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API rejected the request and explained why.
    #[error("{error}")]
    Api {
        /// The HTTP status code of the failed response
        status: StatusCode,
        /// The decoded error body
        error: ApiError,
    },

    /// A failed response carried a body that is not an API error object.
    #[error("Error parsing error body for non-200 request (status {status}): {serde_error}")]
    ErrorBodyDecode {
        /// The HTTP status code of the failed response
        status: StatusCode,
        /// The raw response body that failed to decode
        raw_response: String,
        /// The serde error message
        serde_error: String,
    },

    /// A successful response body could not be decoded into the expected type.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
    },
}

impl Error {
    /// Returns the HTTP status code if a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::ErrorBodyDecode { status, .. } => Some(*status),
            Error::DeserializationFailed { status, .. } => Some(*status),
            Error::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Returns the decoded API error, if the API reported one.
    ///
    /// # Examples
    ///
    /// ```
    /// use oceancall::{ApiError, Error};
    /// use http::StatusCode;
    ///
    /// let err = Error::Api {
    ///     status: StatusCode::UNAUTHORIZED,
    ///     error: ApiError::new("unauthorized", "Unable to authenticate you."),
    /// };
    ///
    /// assert_eq!(err.api_error().map(|e| e.id.as_str()), Some("unauthorized"));
    /// ```
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Returns the raw response body for errors that failed to decode one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::ErrorBodyDecode { raw_response, .. } => Some(raw_response),
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }
}

/// A specialized `Result` type for API calls.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_api_error_body() {
        let body = br#"{"id":"forbidden","message":"You do not have access","request_id":"abc"}"#;
        let err = ApiError::from_body(body).unwrap();
        assert_eq!(err, ApiError::new("forbidden", "You do not have access"));
    }

    #[test]
    fn rejects_body_missing_message() {
        assert!(ApiError::from_body(br#"{"id":"not_found"}"#).is_err());
    }

    #[test]
    fn rejects_non_string_fields() {
        assert!(ApiError::from_body(br#"{"id":404,"message":"nope"}"#).is_err());
    }

    #[test]
    fn rejects_non_object_body() {
        assert!(ApiError::from_body(b"<html>Bad Gateway</html>").is_err());
        assert!(ApiError::from_body(b"").is_err());
        assert!(ApiError::from_body(br#"["not_found"]"#).is_err());
    }

    #[test]
    fn api_variant_displays_id_and_message() {
        let err = Error::Api {
            status: StatusCode::NOT_FOUND,
            error: ApiError::new("not_found", "The resource was not found"),
        };
        assert_eq!(
            err.to_string(),
            "API Error: not_found: The resource was not found"
        );
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(err.raw_response().is_none());
    }

    #[test]
    fn decode_failure_mentions_non_200() {
        let err = Error::ErrorBodyDecode {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            raw_response: "oops".to_string(),
            serde_error: "expected value at line 1 column 1".to_string(),
        };
        assert!(err.to_string().contains("non-200 request"));
        assert_eq!(err.raw_response(), Some("oops"));
        assert!(err.api_error().is_none());
    }
}

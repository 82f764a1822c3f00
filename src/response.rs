//! Response validation and payload decoding.
//!
//! [`check_response`] sorts a finished HTTP exchange into success or an
//! [`Error`]. On success the body is left untouched for the caller, who can
//! read it directly or through [`decode_json`].

use crate::{ApiError, Error, Result};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

/// Returns `true` for the statuses the API uses to report success.
///
/// 200 is the standard success code; 204 is returned by successful deletions.
/// Every other status, including the rest of the 2xx range, is a failure.
pub fn is_success(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::NO_CONTENT
}

/// Validates the outcome of sending a request.
///
/// - A transport error is returned as [`Error::Network`] holding the original
///   `reqwest::Error`; no body is read.
/// - A 200 or 204 response is returned as-is with its body unread.
/// - Any other status consumes the response, reading its body once, and
///   yields [`Error::Api`] or, if the body is not an API error object,
///   [`Error::ErrorBodyDecode`].
///
/// # Examples
///
/// ```no_run
/// use oceancall::{check_response, Client};
/// use std::collections::HashMap;
///
/// # async fn example() -> Result<(), oceancall::Error> {
/// let client = Client::new("my-token")?;
/// let request = client.build_request(&HashMap::new(), "GET", "/account")?;
///
/// let transport = reqwest::Client::new();
/// let response = check_response(transport.execute(request).await).await?;
/// println!("{}", response.text().await?);
/// # Ok(())
/// # }
/// ```
pub async fn check_response(
    result: std::result::Result<reqwest::Response, reqwest::Error>,
) -> Result<reqwest::Response> {
    let response = result?;
    let status = response.status();

    tracing::debug!(
        status = status.as_u16(),
        url = %response.url(),
        "Received API response"
    );

    if is_success(status) {
        return Ok(response);
    }

    let body = response.bytes().await?;
    Err(error_from_body(status, &body))
}

/// Turns the body of a failed response into an [`Error`].
pub(crate) fn error_from_body(status: StatusCode, body: &[u8]) -> Error {
    match ApiError::from_body(body) {
        Ok(error) => {
            tracing::debug!(status = status.as_u16(), id = %error.id, "API reported an error");
            Error::Api { status, error }
        }
        Err(e) => Error::ErrorBodyDecode {
            status,
            raw_response: String::from_utf8_lossy(body).into_owned(),
            serde_error: e.to_string(),
        },
    }
}

/// A decoded success payload along with the HTTP details it arrived with.
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The deserialized response data.
    pub data: T,

    /// The raw response body as a string.
    pub raw_body: String,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,
}

impl<T> Response<T> {
    /// Maps the response data to a different type, keeping the metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oceancall::Response;
    /// # use http::{HeaderMap, StatusCode};
    /// let response = Response {
    ///     data: 42,
    ///     raw_body: "42".to_string(),
    ///     status: StatusCode::OK,
    ///     headers: HeaderMap::new(),
    /// };
    ///
    /// assert_eq!(response.map(|n| n.to_string()).data, "42");
    /// ```
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            data: f(self.data),
            raw_body: self.raw_body,
            status: self.status,
            headers: self.headers,
        }
    }

    /// Returns a header value by name, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

impl<T> std::ops::Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

/// Reads a validated response body and decodes it as JSON.
///
/// An empty body (as sent with 204) decodes as JSON `null`, so `()` and
/// `Option<T>` targets succeed on deletions.
///
/// # Errors
///
/// Returns [`Error::Network`] if the body cannot be read and
/// [`Error::DeserializationFailed`] if it does not match `T`.
pub async fn decode_json<T>(response: reqwest::Response) -> Result<Response<T>>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let headers = response.headers().clone();
    let raw_body = response.text().await?;

    let parsed = if raw_body.trim().is_empty() {
        serde_json::from_value(serde_json::Value::Null)
    } else {
        serde_json::from_str(&raw_body)
    };

    match parsed {
        Ok(data) => Ok(Response {
            data,
            raw_body,
            status,
            headers,
        }),
        Err(e) => Err(Error::DeserializationFailed {
            status,
            raw_response: raw_body,
            serde_error: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_200_and_204_succeed() {
        assert!(is_success(StatusCode::OK));
        assert!(is_success(StatusCode::NO_CONTENT));

        for code in [100, 201, 202, 206, 301, 304, 400, 401, 404, 422, 429, 500, 503] {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(!is_success(status), "{} must not count as success", code);
        }
    }

    #[test]
    fn api_error_body_becomes_api_variant() {
        let err = error_from_body(
            StatusCode::NOT_FOUND,
            br#"{"id":"not_found","message":"The resource was not found"}"#,
        );
        match err {
            Error::Api { status, error } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(error, ApiError::new("not_found", "The resource was not found"));
            }
            other => panic!("Expected Api, got {:?}", other),
        }
    }

    #[test]
    fn malformed_body_becomes_decode_error() {
        let err = error_from_body(StatusCode::BAD_GATEWAY, b"<h1>502 Bad Gateway</h1>");
        match err {
            Error::ErrorBodyDecode {
                status,
                raw_response,
                serde_error,
            } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(raw_response, "<h1>502 Bad Gateway</h1>");
                assert!(!serde_error.is_empty());
            }
            other => panic!("Expected ErrorBodyDecode, got {:?}", other),
        }
    }

    #[test]
    fn non_utf8_body_is_kept_lossily() {
        let err = error_from_body(StatusCode::INTERNAL_SERVER_ERROR, &[0xff, 0xfe]);
        assert!(err.raw_response().is_some());
        assert!(matches!(err, Error::ErrorBodyDecode { .. }));
    }
}

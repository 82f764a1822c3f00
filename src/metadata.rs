//! Typed description of a request to build.

use http::Method;
use std::collections::HashMap;

/// The method, endpoint path and query parameters of a single API request.
///
/// [`Client::build`](crate::Client::build) turns this into an authenticated
/// `reqwest::Request`.
///
/// # Examples
///
/// ```
/// use oceancall::metadata::RequestMetadata;
/// use http::Method;
///
/// let metadata = RequestMetadata::new(Method::GET, "/droplets")
///     .with_query_param("tag_name", "web")
///     .with_query_param("per_page", "50");
///
/// assert_eq!(metadata.query_params.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// The HTTP method (GET, POST, etc.).
    pub method: Method,

    /// The endpoint path, relative to the base URL's path.
    pub path: String,

    /// Query parameters. Order carries no meaning to the API.
    pub query_params: HashMap<String, String>,
}

impl RequestMetadata {
    /// Creates a new `RequestMetadata` with the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query_params: HashMap::new(),
        }
    }

    /// Parses `method` as an HTTP method token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestConstruction`](crate::Error::RequestConstruction)
    /// if `method` is not a valid token.
    pub fn parse(method: &str, path: impl Into<String>) -> Result<Self, crate::Error> {
        let method = Method::from_bytes(method.as_bytes()).map_err(|e| {
            crate::Error::RequestConstruction(format!("invalid HTTP method {:?}: {}", method, e))
        })?;
        Ok(Self::new(method, path))
    }

    /// Adds a query parameter to the request.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    /// Adds multiple query parameters to the request.
    pub fn with_query_params(
        mut self,
        params: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        self.query_params.extend(params);
        self
    }
}

impl Default for RequestMetadata {
    fn default() -> Self {
        Self::new(Method::GET, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_and_extension_methods() {
        assert_eq!(RequestMetadata::parse("DELETE", "/x").unwrap().method, Method::DELETE);
        assert_eq!(
            RequestMetadata::parse("PURGE", "/x").unwrap().method.as_str(),
            "PURGE"
        );
    }

    #[test]
    fn rejects_malformed_method_token() {
        for bad in ["", "GE T", "GET\n", "(GET)"] {
            let err = RequestMetadata::parse(bad, "/x").unwrap_err();
            assert!(
                matches!(err, crate::Error::RequestConstruction(_)),
                "{:?} should be rejected, got {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn later_params_overwrite_earlier_keys() {
        let metadata = RequestMetadata::default()
            .with_query_param("page", "1")
            .with_query_params(vec![("page".to_string(), "2".to_string())]);
        assert_eq!(metadata.query_params["page"], "2");
    }
}

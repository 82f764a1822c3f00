//! Authenticated request building.
//!
//! The [`Client`] type holds the access token and base URL and turns endpoint
//! paths into ready-to-send `reqwest::Request` values. Use [`ClientBuilder`] to
//! point it at another base URL or supply your own transport.

use crate::{metadata::RequestMetadata, response::check_response, Error, Result};
use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// The DigitalOcean v2 API root every client targets unless told otherwise.
pub const DEFAULT_BASE_URL: &str = "https://api.digitalocean.com/v2";

/// A client for the DigitalOcean API.
///
/// The client is immutable once built and cheap to clone; clones share the
/// same token, base URL and connection pool.
///
/// # Examples
///
/// ```
/// use oceancall::Client;
/// use std::collections::HashMap;
///
/// # fn main() -> Result<(), oceancall::Error> {
/// let client = Client::new("my-token")?;
///
/// let mut params = HashMap::new();
/// params.insert("page".to_string(), "2".to_string());
///
/// let request = client.build_request(&params, "GET", "/droplets")?;
/// assert_eq!(request.url().as_str(), "https://api.digitalocean.com/v2/droplets?page=2");
/// assert_eq!(request.headers()["authorization"], "Bearer my-token");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    token: String,
    base_url: Url,
    http_client: reqwest::Client,
    default_headers: HeaderMap,
}

impl Client {
    /// Creates a client for the default API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationError`] if `token` is empty.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().token(token).build()
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    ///
    /// # Examples
    ///
    /// ```
    /// use oceancall::Client;
    /// use std::time::Duration;
    ///
    /// # fn main() -> Result<(), oceancall::Error> {
    /// let client = Client::builder()
    ///     .token("my-token")
    ///     .base_url("http://localhost:8080/v2")?
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    /// assert_eq!(client.base_url().as_str(), "http://localhost:8080/v2");
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The base URL endpoint paths are joined onto.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// The transport [`Client::execute`] sends requests with.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.inner.http_client
    }

    /// Builds an authenticated request without sending it.
    ///
    /// `params` are encoded into the query string, `method` must be a valid
    /// HTTP method token and `endpoint` is appended to the base URL's path.
    ///
    /// # Errors
    ///
    /// - [`Error::RequestConstruction`] if `method` is not a valid method token
    ///   or the token cannot be sent as a header value.
    /// - [`Error::InvalidUrl`] if the base URL cannot have a path joined onto it.
    pub fn build_request(
        &self,
        params: &HashMap<String, String>,
        method: &str,
        endpoint: &str,
    ) -> Result<reqwest::Request> {
        let metadata = RequestMetadata::parse(method, endpoint)?.with_query_params(
            params
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        self.build(&metadata)
    }

    /// Builds an authenticated request from typed metadata without sending it.
    ///
    /// # Errors
    ///
    /// Same as [`Client::build_request`], minus method parsing.
    pub fn build(&self, metadata: &RequestMetadata) -> Result<reqwest::Request> {
        let url = self.endpoint_url(metadata)?;

        tracing::debug!(
            method = %metadata.method,
            url = %url,
            "Built API request"
        );

        let mut request = reqwest::Request::new(metadata.method.clone(), url);
        let headers = request.headers_mut();

        for (name, value) in &self.inner.default_headers {
            headers.insert(name.clone(), value.clone());
        }

        // Inserted last so a default header can never replace it.
        headers.insert(AUTHORIZATION, self.authorization()?);

        Ok(request)
    }

    /// Sends a request on this client's transport and validates the response.
    ///
    /// This is [`check_response`] applied to the result of
    /// `reqwest::Client::execute`.
    pub async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response> {
        check_response(self.inner.http_client.execute(request).await).await
    }

    fn endpoint_url(&self, metadata: &RequestMetadata) -> Result<Url> {
        let mut url = self.inner.base_url.clone();
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }

        let endpoint = metadata.path.trim_start_matches('/');
        if !endpoint.is_empty() {
            let path = format!("{}/{}", url.path().trim_end_matches('/'), endpoint);
            url.set_path(&path);
        }

        if metadata.query_params.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut()
                .clear()
                .extend_pairs(&metadata.query_params);
        }

        Ok(url)
    }

    fn authorization(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::try_from(format!("Bearer {}", self.inner.token))
            .map_err(|_| {
                Error::RequestConstruction(
                    "access token contains characters not allowed in a header value"
                        .to_string(),
                )
            })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```
/// use oceancall::ClientBuilder;
///
/// # fn main() -> Result<(), oceancall::Error> {
/// let client = ClientBuilder::new()
///     .token("my-token")
///     .user_agent("my-app/1.0")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    token: Option<String>,
    base_url: Option<Url>,
    http_client: Option<reqwest::Client>,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            token: None,
            base_url: None,
            http_client: None,
            default_headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// Sets the access token sent as `Authorization: Bearer <token>`.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Overrides the base URL. Defaults to [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the URL does not parse or cannot be a
    /// base for endpoint paths (e.g. `mailto:` URLs).
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        let url = Url::parse(url.as_ref())?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        self.base_url = Some(url);
        Ok(self)
    }

    /// Uses `client` to send requests instead of building one.
    ///
    /// When set, [`ClientBuilder::timeout`] is ignored; configure timeouts on
    /// the supplied client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Adds a header included in every built request.
    ///
    /// `Authorization` cannot be set this way; it always carries the token.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        if name == AUTHORIZATION {
            return Err(Error::ConfigurationError(
                "Authorization is derived from the access token".to_string(),
            ));
        }
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the `User-Agent` header of every built request.
    pub fn user_agent(self, user_agent: impl AsRef<str>) -> Result<Self> {
        self.default_header(http::header::USER_AGENT.as_str(), user_agent)
    }

    /// Sets the request timeout of the bundled transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationError`] if no token (or an empty one) was
    /// provided, or if the bundled transport cannot be constructed.
    pub fn build(self) -> Result<Client> {
        let token = self
            .token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| Error::ConfigurationError("Access token is required".to_string()))?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build().map_err(|e| {
                    Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
                })?
            }
        };

        Ok(Client {
            inner: Arc::new(ClientInner {
                token,
                base_url,
                http_client,
                default_headers: self.default_headers,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

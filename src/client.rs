//! Legalesign API client.
//!
//! Holds the credentials and the HTTP transport, and implements the request
//! executor every resource operation goes through.

use crate::documents::DocumentsClient;
use crate::error::{LegalesignError, Result, error_for_status};
use crate::signers::SignersClient;
use reqwest::{Client as HttpClient, Method, header, redirect};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://legalesign.com/api/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable holding the API user id.
pub const USER_ID_ENV: &str = "LEGALESIGN_USER_ID";
/// Environment variable holding the API secret.
pub const SECRET_ENV: &str = "LEGALESIGN_SECRET";

/// API credentials: the user id (sometimes called the API username) and the
/// API secret, both found on the personal settings page of a Legalesign
/// account.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user_id: String,
    secret: String,
}

impl Credentials {
    /// Store a credential pair. No format validation takes place.
    pub fn new(user_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            secret: secret.into(),
        }
    }

    /// Read credentials from `LEGALESIGN_USER_ID` and `LEGALESIGN_SECRET`.
    pub fn from_env() -> Result<Self> {
        let read = |name: &str| {
            std::env::var(name).map_err(|_| {
                LegalesignError::Configuration(format!("{name} environment variable is not set"))
            })
        };
        Ok(Self::new(read(USER_ID_ENV)?, read(SECRET_ENV)?))
    }

    /// The API user id.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    fn is_complete(&self) -> bool {
        !self.user_id.trim().is_empty() && !self.secret.trim().is_empty()
    }

    fn authorization(&self) -> String {
        format!("ApiKey {}:{}", self.user_id, self.secret)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Configuration options for the client.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Base URL for the API (default: https://legalesign.com/api/v1).
    pub base_url: Option<String>,
    /// Request timeout (default: 30 seconds).
    pub timeout: Option<Duration>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
}

/// Legalesign API client.
///
/// Cheap to clone; documents keep a clone so they can act on themselves.
///
/// # Example
///
/// ```rust,no_run
/// use legalesign::{Client, Credentials, Signer};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = Client::new(Credentials::new("user-id", "secret"))?;
///
///     let document = client
///         .documents()
///         .create()
///         .group("my-group")
///         .name("Contract")
///         .add_signer(Signer::new("Ada", "Lovelace", "ada@example.com"))
///         .send_with_html("<h1>Agreement</h1>")
///         .await?;
///
///     println!("Created document {} ({})", document.id, document.status);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) http: HttpClient,
    pub(crate) base_url: String,
    pub(crate) credentials: Credentials,
}

impl Client {
    /// Create a new client with default configuration.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a new client with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use legalesign::{Client, ClientConfig, Credentials};
    /// use std::time::Duration;
    ///
    /// let client = Client::with_config(
    ///     Credentials::new("user-id", "secret"),
    ///     ClientConfig {
    ///         base_url: Some("https://staging.example.com/api/v1".to_string()),
    ///         timeout: Some(Duration::from_secs(60)),
    ///         user_agent: Some("my-app/1.0".to_string()),
    ///     },
    /// ).unwrap();
    /// ```
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let timeout = config
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let user_agent = config
            .user_agent
            .unwrap_or_else(|| format!("legalesign-rust/{}", env!("CARGO_PKG_VERSION")));

        // Creation replies carry the new id in `Location`, so redirects must
        // reach the caller untouched.
        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(redirect::Policy::none())
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// Create a client from `LEGALESIGN_USER_ID` / `LEGALESIGN_SECRET`.
    pub fn from_env() -> Result<Self> {
        Self::new(Credentials::from_env()?)
    }

    /// Get the base URL for the API.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the credentials this client authenticates with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Get the documents client.
    pub fn documents(&self) -> DocumentsClient {
        DocumentsClient::new(self.clone())
    }

    /// Get the signers client.
    pub fn signers(&self) -> SignersClient {
        SignersClient::new(self.clone())
    }

    /// Send one authenticated request and check its status.
    ///
    /// For `GET` the data is sent as query parameters, for every other
    /// method as a JSON body. Any status other than 200, 201 or 204 is
    /// turned into an error.
    pub async fn execute(
        &self,
        method: &str,
        endpoint: &str,
        data: Option<&serde_json::Value>,
    ) -> Result<RawResponse> {
        if !self.credentials.is_complete() {
            return Err(LegalesignError::Configuration(
                "Legalesign credentials must be set prior to making a request".to_string(),
            ));
        }

        let method = normalize_method(method)?;
        let url = format!("{}{}", self.base_url, normalize_endpoint(endpoint));
        tracing::debug!(method = %method, url = %url, "sending request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(header::AUTHORIZATION, self.credentials.authorization())
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(data) = data {
            request = if method == Method::GET {
                request.query(data)
            } else {
                request.json(data)
            };
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        tracing::debug!(status, url = %url, "received response");

        let raw = RawResponse {
            status,
            headers,
            body,
        };
        if let Some(err) = error_for_status(status, &raw.text()) {
            tracing::warn!(status, url = %url, error = %err, "request failed");
            return Err(err);
        }
        Ok(raw)
    }

    /// Like [`execute`](Self::execute), decoding the body as JSON.
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        method: &str,
        endpoint: &str,
        data: Option<&serde_json::Value>,
    ) -> Result<T> {
        self.execute(method, endpoint, data).await?.json()
    }
}

/// A successful response, fully read.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: header::HeaderMap,
    /// Response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Value of the `Location` header, if present and valid text.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| LegalesignError::Decode(format!("invalid JSON response: {e}")))
    }
}

fn normalize_method(method: &str) -> Result<Method> {
    let method = method.trim().to_uppercase();
    Method::from_bytes(method.as_bytes())
        .map_err(|_| LegalesignError::Configuration(format!("invalid HTTP method {method:?}")))
}

fn normalize_endpoint(endpoint: &str) -> String {
    let endpoint = endpoint.trim();
    if endpoint.starts_with('/') {
        endpoint.to_string()
    } else {
        format!("/{endpoint}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("user", "secret")
    }

    #[test]
    fn test_client_new() {
        let client = Client::new(credentials()).unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_client_with_config_trims_base_url() {
        let client = Client::with_config(
            credentials(),
            ClientConfig {
                base_url: Some("https://custom.api.com/api/v1/".to_string()),
                timeout: Some(Duration::from_secs(60)),
                user_agent: None,
            },
        )
        .unwrap();
        assert_eq!(client.base_url(), "https://custom.api.com/api/v1");
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.base_url.is_none());
        assert!(config.timeout.is_none());
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn test_authorization_header_value() {
        assert_eq!(credentials().authorization(), "ApiKey user:secret");
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let debug = format!("{:?}", Credentials::new("user", "hunter2"));
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_credentials_completeness() {
        assert!(credentials().is_complete());
        assert!(!Credentials::new("", "secret").is_complete());
        assert!(!Credentials::new("user", "  ").is_complete());
    }

    #[test]
    fn test_normalize_method() {
        assert_eq!(normalize_method(" get ").unwrap(), Method::GET);
        assert_eq!(normalize_method("patch").unwrap(), Method::PATCH);
        assert!(matches!(
            normalize_method("not a method"),
            Err(LegalesignError::Configuration(_))
        ));
    }

    #[test]
    fn test_normalize_endpoint() {
        assert_eq!(normalize_endpoint("document/1/"), "/document/1/");
        assert_eq!(normalize_endpoint("  /pdf/1/ "), "/pdf/1/");
    }

    #[test]
    fn test_raw_response_location() {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::LOCATION,
            header::HeaderValue::from_static("/api/v1/document/abc/"),
        );
        let raw = RawResponse {
            status: 201,
            headers,
            body: b"{\"ok\":true}".to_vec(),
        };
        assert_eq!(raw.location(), Some("/api/v1/document/abc/"));
        let value: serde_json::Value = raw.json().unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn test_raw_response_invalid_json() {
        let raw = RawResponse {
            status: 200,
            headers: header::HeaderMap::new(),
            body: b"not json".to_vec(),
        };
        assert!(matches!(
            raw.json::<serde_json::Value>(),
            Err(LegalesignError::Decode(_))
        ));
    }
}

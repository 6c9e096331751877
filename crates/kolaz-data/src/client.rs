//! HTTP client and transports.

use crate::{FetchError, Method, RequestBuilder, Response};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends a built request and buffers the response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// Transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("kolaz/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(Response::new(status, headers, body))
    }
}

/// Client for the product API.
///
/// Relative paths are joined to the base URL; default headers and the bearer
/// token are attached to every request.
#[derive(Clone)]
pub struct FetchClient {
    base_url: String,
    default_headers: HashMap<String, String>,
    token: Option<String>,
    transport: Arc<dyn Transport>,
}

impl FetchClient {
    /// Create a client over any transport.
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.into(),
            default_headers: HashMap::new(),
            token: None,
            transport,
        }
    }

    /// Create a client that talks HTTP through reqwest.
    pub fn http(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(FetchError::InvalidUrl(base_url));
        }
        let transport = ReqwestTransport::new(timeout)?;
        Ok(Self::new(base_url, Arc::new(transport)))
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Authenticate every request with a bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn get(&self, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        self.request(Method::Get, path)
    }

    pub fn post(&self, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        self.request(Method::Post, path)
    }

    pub fn put(&self, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        self.request(Method::Put, path)
    }

    pub fn patch(&self, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        self.request(Method::Patch, path)
    }

    pub fn delete(&self, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        self.request(Method::Delete, path)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        let path = path.as_ref();
        let url = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        };

        let mut builder = RequestBuilder::new(method, url).header("Accept", "application/json");
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        ClientRequestBuilder {
            client: self,
            builder,
        }
    }
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    client: &'a FetchClient,
    builder: RequestBuilder,
}

impl ClientRequestBuilder<'_> {
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    pub fn query<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.builder = self.builder.query(params);
        self
    }

    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Send the request and return the response, whatever its status.
    #[instrument(skip_all, fields(method = %self.builder.method, url = %self.builder.full_url()))]
    pub async fn send(self) -> Result<Response, FetchError> {
        let response = self.client.transport.send(self.builder).await?;
        debug!(status = response.status, bytes = response.body.len(), "response");
        Ok(response)
    }
}

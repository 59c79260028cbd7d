//! Reqwest-backed JSON client for calling other HTTP APIs.
//!
//! The adapter owns transport details only: base URL resolution, default
//! headers, request timeout and JSON body encoding. Requests sent while a
//! [`TraceId`] is in scope forward it as `trace-id`. Responses are returned
//! untouched so callers decide how to interpret status codes.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Request, Response, Url};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::middleware::trace::{TRACE_ID_HEADER, TraceId};

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Failures raised while building or sending a request.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// A default header name or value was rejected.
    #[error("invalid header `{name}`: {message}")]
    InvalidHeader {
        /// Header name as supplied.
        name: String,
        /// Parser message.
        message: String,
    },
    /// The request path could not be resolved against the base URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The request could not be built or sent.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The request body could not be encoded as JSON.
    #[error("failed to serialise request body: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// JSON client bound to one base URL.
///
/// # Examples
/// ```
/// use std::time::Duration;
///
/// use minimal_api::outbound::http_client::JsonClient;
/// use url::Url;
///
/// let base = Url::parse("https://api.example.test/").expect("valid URL");
/// let client = JsonClient::new(base, Duration::from_secs(5))
///     .expect("client builds")
///     .with_header("Authorization", "Bearer token")
///     .expect("valid header");
/// assert_eq!(client.base().as_str(), "https://api.example.test/");
/// ```
#[derive(Debug, Clone)]
pub struct JsonClient {
    client: Client,
    base: Url,
    headers: HeaderMap,
}

impl JsonClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError::Transport`] when the reqwest client cannot
    /// be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, HttpClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base,
            headers: HeaderMap::new(),
        })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Default headers sent with every request.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Set a default header, replacing any existing values for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError::InvalidHeader`] when `name` or `value` is
    /// not a valid header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, HttpClientError> {
        let invalid = |message: String| HttpClientError::InvalidHeader {
            name: name.to_owned(),
            message,
        };
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|error| invalid(error.to_string()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|error| invalid(error.to_string()))?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    /// `POST` `body` as JSON to `path`.
    ///
    /// # Errors
    ///
    /// See [`HttpClientError`].
    pub async fn post_json<B>(&self, path: &str, body: &B) -> Result<Response, HttpClientError>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.json_request(Method::POST, path, body)?).await
    }

    /// `PUT` `body` as JSON to `path`.
    ///
    /// # Errors
    ///
    /// See [`HttpClientError`].
    pub async fn put_json<B>(&self, path: &str, body: &B) -> Result<Response, HttpClientError>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.json_request(Method::PUT, path, body)?).await
    }

    fn json_request<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Request, HttpClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.base.join(path)?;
        let payload = serde_json::to_vec(body)?;
        let mut headers = self.headers.clone();
        if let Some(trace_id) = TraceId::current() {
            let value = HeaderValue::try_from(trace_id.to_string()).map_err(|error| {
                HttpClientError::InvalidHeader {
                    name: TRACE_ID_HEADER.to_owned(),
                    message: error.to_string(),
                }
            })?;
            headers.insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        let request = self
            .client
            .request(method, url)
            .headers(headers)
            .header(CONTENT_TYPE, JSON_UTF8)
            .body(payload)
            .build()?;
        Ok(request)
    }

    async fn send(&self, request: Request) -> Result<Response, HttpClientError> {
        debug!(method = %request.method(), url = %request.url(), "sending JSON request");
        let response = self.client.execute(request).await?;
        debug!(status = response.status().as_u16(), "received response");
        Ok(response)
    }
}

//! # Transport
//!
//! This module defines the [`Transport`] seam between stores and the network, and the
//! production implementation, [`HttpTransport`].
//!
//! ## HttpTransport
//!
//! `HttpTransport` wraps a single `reqwest::Client` with a cookie store, so the session
//! cookie set by the login route is sent on every later call. It is stateless beyond
//! that cookie jar and is shared (`Arc<dyn Transport>`) by every store.
//!
//! * **Success**: any `2xx`. `204 No Content`, an empty body or a literal `null` yield
//!   `None`; anything else is parsed as JSON.
//! * **Failure**: any other status becomes [`TransportError::Status`] with the message
//!   `HTTP {status} {reason}: {body}` (or without the body when it is empty or
//!   unreadable).

use crate::error::TransportError;
use crate::request::Request;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Issues one request and returns the decoded JSON body, if any.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, request: Request) -> Result<Option<Value>, TransportError>;
}

/// Decodes a response body into `T`, failing closed on a missing body or schema mismatch.
pub fn decode_body<T: DeserializeOwned>(body: Option<Value>) -> Result<T, TransportError> {
    let value = body.ok_or_else(|| TransportError::Decode("empty response body".to_string()))?;
    serde_json::from_value(value).map_err(|e| TransportError::Decode(e.to_string()))
}

/// Transport backed by `reqwest` with cookie-based credentials.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport without a request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        Self::with_timeout(base_url, None)
    }

    /// Creates a transport; `timeout` bounds each request when set.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[tracing::instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn request(&self, request: Request) -> Result<Option<Value>, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self
            .client
            .request(request.method.into(), &url)
            .header(CONTENT_TYPE, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status();

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("");
            // Body read failures fall back to the status line alone.
            let body = response.text().await.ok();
            debug!(status = status.as_u16(), "Non-success response");
            return Err(TransportError::status(
                status.as_u16(),
                reason,
                body.as_deref(),
            ));
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Null) => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(e) => Err(TransportError::Decode(e.to_string())),
        }
    }
}

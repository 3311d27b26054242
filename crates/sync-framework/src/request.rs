//! # Requests & Endpoints
//!
//! This module defines the transport-neutral request description passed from a store
//! to a [`Transport`](crate::Transport), and [`Endpoint`], which builds the REST paths
//! of one collection.

use crate::error::TransportError;
use serde::Serialize;
use serde_json::Value;
use std::fmt::{self, Display};

/// HTTP verbs used by the collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A single call against the backend.
///
/// `path` is relative to the transport's base URL (e.g. `/api/products/1`).
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serializes `payload` as the JSON body.
    pub fn with_json<B: Serialize + ?Sized>(self, payload: &B) -> Result<Self, TransportError> {
        let body =
            serde_json::to_value(payload).map_err(|e| TransportError::Encode(e.to_string()))?;
        Ok(self.with_body(body))
    }
}

/// Path builder for one REST collection, e.g. `/api/products`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
}

impl Endpoint {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        let trimmed = base.trim_end_matches('/');
        let base = if trimmed.starts_with('/') || trimmed.is_empty() {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        };
        Self { base }
    }

    /// `GET`/`POST` target: the collection itself.
    pub fn collection(&self) -> String {
        self.base.clone()
    }

    /// `/{base}/{id}`
    pub fn item(&self, id: &impl Display) -> String {
        format!("{}/{}", self.base, id)
    }

    /// `/{base}/{id}/{segment}`
    pub fn child(&self, id: &impl Display, segment: &str) -> String {
        format!("{}/{}/{}", self.base, id, segment.trim_matches('/'))
    }

    /// `/{base}/{segment}`, for collection-level routes such as `search` or `me`.
    pub fn sub(&self, segment: &str) -> String {
        format!("{}/{}", self.base, segment.trim_matches('/'))
    }
}

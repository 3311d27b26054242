//! # Mock Transports & Testing Guide
//!
//! Stores only ever talk to a [`Transport`], so tests swap the HTTP transport for one of
//! the in-memory transports below. Nothing here opens a socket.
//!
//! | Feature | MockTransport | ChannelTransport | HttpTransport + test server |
//! |---------|---------------|------------------|-----------------------------|
//! | **Speed** | Instant | Instant | Fast (loopback) |
//! | **Resolution order** | Call order | Chosen by the test | Server scheduling |
//! | **Error injection** | `return_status` / `return_err` | `respond_err` | Server handler |
//! | **Use case** | Store logic, reconciliation | Races, pending flags | Wire format, cookies |
//!
//! ## Pattern 1: Scripted responses
//!
//! ```rust
//! use sync_framework::mock::MockTransport;
//! use sync_framework::{Method, Request, Transport};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect(Method::Get, "/api/products")
//!         .return_json(json!([{ "id": 1, "name": "Widget" }]));
//!
//!     let body = mock
//!         .request(Request::new(Method::Get, "/api/products"))
//!         .await
//!         .unwrap();
//!     assert!(body.is_some());
//!
//!     // Ensures every expectation was consumed
//!     mock.verify();
//! }
//! ```
//!
//! ## Pattern 2: Manual resolution
//!
//! When a test needs to control *when* each call resolves (out-of-order responses,
//! overlapping calls), use [`create_channel_transport`]. Each request arrives on the
//! receiver as a [`PendingRequest`] and stays unresolved until the test responds.
//!
//! ```rust
//! use sync_framework::mock::{create_channel_transport, expect_request};
//! use sync_framework::{Method, Request, Transport};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (transport, mut requests) = create_channel_transport(8);
//!
//!     let call = tokio::spawn(async move {
//!         transport.request(Request::new(Method::Get, "/api/orders/7")).await
//!     });
//!
//!     let pending = expect_request(&mut requests).await.expect("request");
//!     assert_eq!(pending.request.path, "/api/orders/7");
//!     pending.respond_json(json!({ "id": 7 }));
//!
//!     assert!(call.await.unwrap().unwrap().is_some());
//! }
//! ```

use crate::error::TransportError;
use crate::request::{Method, Request};
use crate::transport::Transport;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

type Response = Result<Option<Value>, TransportError>;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// One scripted call: what must arrive and what to answer.
struct Expectation {
    method: Method,
    path: String,
    query: Option<Vec<(String, String)>>,
    response: Response,
}

/// Transport that answers from a queue of expectations, in order.
///
/// Requests are matched by method and path (and query, when the expectation names
/// one). A mismatch or an unexpected call panics the calling test.
#[derive(Clone, Default)]
pub struct MockTransport {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    received: Arc<Mutex<Vec<Request>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a call with `method` on `path`.
    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            query: None,
            expectations: self.expectations.clone(),
        }
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.received.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(&self, request: Request) -> Response {
        self.received.lock().unwrap().push(request.clone());
        let expectation = self.expectations.lock().unwrap().pop_front();

        let Some(expectation) = expectation else {
            panic!("Unexpected request: {} {}", request.method, request.path);
        };
        if expectation.method != request.method || expectation.path != request.path {
            panic!(
                "Expected {} {}, got {} {}",
                expectation.method, expectation.path, request.method, request.path
            );
        }
        if let Some(query) = &expectation.query {
            assert_eq!(query, &request.query, "query mismatch for {}", request.path);
        }
        expectation.response
    }
}

/// Builder returned by [`MockTransport::expect`].
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    query: Option<Vec<(String, String)>>,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExpectationBuilder {
    /// Also requires this query pair (pairs accumulate in order).
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(Vec::new)
            .push((key.into(), value.into()));
        self
    }

    /// Answers with a JSON body.
    pub fn return_json(self, body: Value) {
        self.push(Ok(Some(body)));
    }

    /// Answers with the serialized form of `entity`.
    pub fn return_entity<S: Serialize>(self, entity: &S) {
        let body = serde_json::to_value(entity).expect("mock response must serialize");
        self.push(Ok(Some(body)));
    }

    /// Answers with an empty `2xx` (e.g. `204 No Content`).
    pub fn return_no_content(self) {
        self.push(Ok(None));
    }

    /// Answers with a non-success status, formatted like the HTTP transport does.
    pub fn return_status(self, status: u16, reason: &str, body: &str) {
        self.push(Err(TransportError::status(status, reason, Some(body))));
    }

    /// Fails with an arbitrary transport error.
    pub fn return_err(self, error: TransportError) {
        self.push(Err(error));
    }

    fn push(self, response: Response) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation {
            method: self.method,
            path: self.path,
            query: self.query,
            response,
        });
    }
}

// =============================================================================
// CHANNEL TRANSPORT
// =============================================================================

/// A request waiting for the test to answer it.
#[derive(Debug)]
pub struct PendingRequest {
    pub request: Request,
    pub respond_to: oneshot::Sender<Response>,
}

impl PendingRequest {
    pub fn respond(self, response: Response) {
        let _ = self.respond_to.send(response);
    }

    pub fn respond_json(self, body: Value) {
        self.respond(Ok(Some(body)));
    }

    pub fn respond_no_content(self) {
        self.respond(Ok(None));
    }

    pub fn respond_err(self, error: TransportError) {
        self.respond(Err(error));
    }
}

/// Transport that forwards every request to a channel and waits for a manual answer.
#[derive(Clone)]
pub struct ChannelTransport {
    sender: mpsc::Sender<PendingRequest>,
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn request(&self, request: Request) -> Response {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(PendingRequest {
                request,
                respond_to,
            })
            .await
            .map_err(|_| TransportError::Network("transport channel closed".to_string()))?;
        response
            .await
            .map_err(|_| TransportError::Network("request dropped without response".to_string()))?
    }
}

/// Creates a channel transport and the receiver the test answers from.
pub fn create_channel_transport(buffer_size: usize) -> (ChannelTransport, mpsc::Receiver<PendingRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ChannelTransport { sender }, receiver)
}

/// Waits for the next request sent through a channel transport.
pub async fn expect_request(
    receiver: &mut mpsc::Receiver<PendingRequest>,
) -> Option<PendingRequest> {
    receiver.recv().await
}

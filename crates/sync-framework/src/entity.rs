//! # SyncEntity Trait
//!
//! The `SyncEntity` trait defines the contract every remote record (Product, Order,
//! StockRecord, ...) implements so the generic [`ResourceStore`](crate::ResourceStore)
//! can mirror it. It names the identifier, the request payloads (DTOs) and the
//! entity-specific actions, and tells the store how an action maps onto a route.
//!
//! # Architecture Note
//! The store logic (pending flag, error capture, reconciliation) is written *once* and
//! reused for every collection. Associated types keep the payloads apart: a
//! `ProductDraft` can never be posted to the orders collection.

use crate::request::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::{Debug, Display};

/// Trait that any remote record must implement to be mirrored by `ResourceStore`.
///
/// Entities are decoded from server responses with serde, so a missing or mistyped
/// field is reported as a decoding error instead of being carried silently.
pub trait SyncEntity: Clone + Debug + DeserializeOwned + Send + Sync + 'static {
    /// The server-assigned identifier. `Display` renders it into item paths.
    type Id: Clone + PartialEq + Debug + Display + Send + Sync;

    /// Payload for `create` (entity shape minus server-assigned fields).
    type Draft: Serialize + Debug + Send + Sync;

    /// Payload for `update`. Use `()` when the collection has no update route.
    type Patch: Serialize + Debug + Send + Sync;

    /// Entity-specific operations beyond CRUD. Use [`NoAction`] when there are none.
    type Action: Debug + Send + Sync;

    /// HTTP verb used by `update`.
    const UPDATE_METHOD: Method = Method::Put;

    fn id(&self) -> &Self::Id;

    /// Describes the request that performs `action` on one item.
    fn action_route(action: &Self::Action) -> ActionRoute;
}

/// Uninhabited action type for collections without custom operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoAction {}

/// How an action is sent: verb, optional item sub-route, query and body.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRoute {
    pub method: Method,
    pub segment: Option<&'static str>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ActionRoute {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            segment: None,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn segment(mut self, segment: &'static str) -> Self {
        self.segment = Some(segment);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Short type name used as the `entity_type` tracing field
/// (e.g. `Product` instead of `storefront::model::product::Product`).
pub fn entity_type<T>() -> &'static str {
    std::any::type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
}

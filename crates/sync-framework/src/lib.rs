//! # Sync Framework
//!
//! This crate provides the building blocks for keeping a client-side store in sync with
//! a remote REST collection. It is domain-neutral: the concrete collections (products,
//! orders, ...) live in the application crate and plug in through [`SyncEntity`].
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Transport Layer** ([`Transport`]) - issues one request, returns JSON or a
//!    [`TransportError`]. [`HttpTransport`] is the production implementation.
//! 2. **Store Layer** ([`ResourceStore`], [`SessionStore`]) - owns the mirrored state,
//!    tracks pending requests, reconciles responses and records error messages.
//! 3. **View Layer** ([`ViewBinding`]) - the contract a UI consumes: mount-once loading,
//!    enabled/disabled controls, and confirmation-gated intents.
//!
//! ```text
//!  ViewBinding ──intent──► ResourceStore ──Request──► Transport ──► backend
//!       ▲                       │
//!       └──── watch::Receiver ◄─┘  (pushed state changes)
//! ```
//!
//! ## Defining a collection
//!
//! ```rust
//! use sync_framework::mock::MockTransport;
//! use sync_framework::{ActionRoute, Endpoint, Method, NoAction, ResourceStore, SyncEntity};
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[derive(Clone, Debug, Deserialize)]
//! struct Product { id: u64, name: String, price: f64 }
//!
//! #[derive(Debug, Serialize)]
//! struct ProductDraft { name: String, price: f64 }
//!
//! impl SyncEntity for Product {
//!     type Id = u64;
//!     type Draft = ProductDraft;
//!     type Patch = ProductDraft;
//!     type Action = NoAction;
//!     fn id(&self) -> &u64 { &self.id }
//!     fn action_route(action: &NoAction) -> ActionRoute { match *action {} }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect(Method::Post, "/api/products")
//!         .return_json(json!({ "id": 1, "name": "Widget", "price": 9.99 }));
//!
//!     let store = ResourceStore::<Product>::new(Arc::new(mock), Endpoint::new("/api/products"));
//!     let draft = ProductDraft { name: "Widget".into(), price: 9.99 };
//!
//!     assert!(store.create(&draft).await.is_applied());
//!     assert_eq!(store.snapshot().items[0].id, 1);
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Stores are `Send + Sync` and shared through `Arc`; they are the only writers of
//!   their state.
//! - Overlapping calls are ordered by a [`Sequencer`]. With the default
//!   [`StalePolicy::LatestIssued`], a response is applied only if no newer call was
//!   issued in the meantime.
//! - `pending` stays true while any call of the store is outstanding.
//!
//! ## Testing
//!
//! The [`mock`] module provides [`MockTransport`](mock::MockTransport) (scripted
//! responses) and a channel-backed transport whose calls resolve only when the test
//! answers them.

pub mod entity;
pub mod error;
pub mod handle;
pub mod mock;
pub mod request;
pub mod sequence;
pub mod session;
pub mod state;
pub mod store;
pub mod tracing;
pub mod transport;
pub mod view;

// Re-export core types for convenience
pub use entity::{entity_type, ActionRoute, NoAction, SyncEntity};
pub use error::TransportError;
pub use handle::CollectionHandle;
pub use request::{Endpoint, Method, Request};
pub use sequence::{Sequencer, StalePolicy, Ticket};
pub use session::{Credentials, Identity, SessionState, SessionStatus, SessionStore};
pub use state::CollectionState;
pub use store::{Outcome, ResourceStore};
pub use transport::{decode_body, HttpTransport, Transport};
pub use view::{delete_prompt, AlwaysConfirm, Confirm, Intent, Loadable, ViewBinding};

// Used by `collection_store!` expansions in downstream crates.
#[doc(hidden)]
pub use async_trait;
#[doc(hidden)]
pub use paste;

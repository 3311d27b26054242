//! # Storefront
//!
//! > **Client-side stores for a storefront REST backend.**
//!
//! This crate keeps four remote collections mirrored on the client: the product
//! catalog, orders, inventory stock and the signed-in session. All of the plumbing
//! (requests, pending flags, error messages, race handling) lives in
//! [`sync_framework`]; this crate only says what each collection looks like and what
//! its screens can do.
//!
//! ## Design Notes
//!
//! ### Response-based reconciliation
//! A mutation's response is the truth. Creating a product appends what the server
//! returned; updating replaces by id; deleting removes locally after the server says
//! yes. Nothing is inserted optimistically and nothing re-lists after a mutation.
//!
//! ### Errors are state, not panics
//! Store operations never return `Err`. A failure lands in the store's
//! `error_message` (the transport error's text) and stays there until the next
//! operation starts or the view dismisses it. Form validation is the only place a
//! typed error reaches the caller ([`ProductError`](product::ProductError),
//! [`OrderError`](order::OrderError)), and it is raised before any request is sent.
//!
//! ### Concurrency
//! Stores are shared through `Arc` and pushed to views through `tokio::sync::watch`.
//! When two calls on one store overlap, only the most recently issued one is applied
//! by default; see [`StalePolicy`](sync_framework::StalePolicy).
//!
//! ## Module Tour
//!
//! ### 1. Data ([`model`])
//! Wire types exactly as the backend sends them (`camelCase` JSON).
//!
//! ### 2. Collections ([`product`], [`order`], [`inventory`])
//! Each plugs its model into the framework through
//! [`SyncEntity`](sync_framework::SyncEntity), and owns its form and error types.
//!
//! ### 3. Stores ([`stores`])
//! [`ProductStore`](stores::ProductStore), [`OrderStore`](stores::OrderStore) and
//! [`InventoryStore`](stores::InventoryStore): typed handles over
//! [`ResourceStore`](sync_framework::ResourceStore) with the collection's extra routes.
//!
//! ### 4. Screens ([`screens`])
//! What a page of the UI binds to: mount-once loading, disabled controls while pending,
//! confirmed deletes and the order commands offered per status.
//!
//! ### 5. Wiring ([`lifecycle`])
//! [`ClientConfig`](lifecycle::ClientConfig) and [`AppContext`](lifecycle::AppContext),
//! which builds one transport and one store per collection.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run -- products list
//! cargo test
//! ```

pub mod inventory;
pub mod lifecycle;
pub mod model;
pub mod order;
pub mod product;
pub mod screens;
pub mod stores;

//! # Observability & Tracing
//!
//! Every store operation emits structured events with an `entity_type` field
//! (`Product`, `Order`, ...), the operation name (`op`) and its sequence number (`seq`),
//! so overlapping calls on one collection can be told apart in the log.
//!
//! | Level | What |
//! |-------|------|
//! | `debug` | Request method/path and full payloads (drafts, patches, actions) |
//! | `info` | Reconciled results, with the collection size afterwards |
//! | `warn` | Failed calls, stale responses, duplicate ids in a listing |
//!
//! ```bash
//! # Applied operations and failures
//! RUST_LOG=info storefront products list
//!
//! # Payloads and request paths
//! RUST_LOG=debug storefront orders list
//! ```
//!
//! With `RUST_LOG=info`, a create followed by a failing delete reads:
//!
//! ```text
//! INFO Applied entity_type="Product" op="create" seq=2 size=1
//! WARN Failed entity_type="Product" op="remove" seq=3 error=HTTP 409 Conflict
//! ```

/// Installs a compact `tracing-subscriber` filtered by `RUST_LOG`.
///
/// Calling it again after a subscriber is installed is a no-op.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type identifies the source
        .compact()
        .try_init();
}

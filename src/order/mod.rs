//! Order-specific collection logic: lifecycle actions, the order form and errors.

mod actions;
pub mod entity;
pub mod error;
mod form;

pub use actions::*;
pub use error::*;
pub use form::*;

use crate::stores::OrderStore;
use std::sync::Arc;
use sync_framework::{Endpoint, ResourceStore, StalePolicy, Transport};

/// Creates the orders store on `base` (e.g. `/api/orders`).
pub fn new(transport: Arc<dyn Transport>, base: &str, policy: StalePolicy) -> OrderStore {
    OrderStore::new(ResourceStore::with_policy(
        transport,
        Endpoint::new(base),
        policy,
    ))
}

//! Product-specific collection logic: entity wiring, form validation and errors.

pub mod entity;
pub mod error;
mod form;

pub use error::*;
pub use form::*;

use crate::stores::ProductStore;
use std::sync::Arc;
use sync_framework::{Endpoint, ResourceStore, StalePolicy, Transport};

/// Creates the products store on `base` (e.g. `/api/products`).
pub fn new(transport: Arc<dyn Transport>, base: &str, policy: StalePolicy) -> ProductStore {
    ProductStore::new(ResourceStore::with_policy(
        transport,
        Endpoint::new(base),
        policy,
    ))
}

//! Inventory collection: read-only stock records.

pub mod entity;

use crate::stores::InventoryStore;
use std::sync::Arc;
use sync_framework::{Endpoint, ResourceStore, StalePolicy, Transport};

/// Creates the inventory store on `base` (e.g. `/api/inventory/stock`).
pub fn new(transport: Arc<dyn Transport>, base: &str, policy: StalePolicy) -> InventoryStore {
    InventoryStore::new(ResourceStore::with_policy(
        transport,
        Endpoint::new(base),
        policy,
    ))
}

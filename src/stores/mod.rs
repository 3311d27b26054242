//! Domain stores: typed wrappers around [`ResourceStore`](sync_framework::ResourceStore).
//!
//! Each store gets the shared operations (`refresh`, `snapshot`, `subscribe`,
//! `begin_edit`, ...) from [`CollectionHandle`](sync_framework::CollectionHandle) and
//! adds only what is specific to its collection.

pub mod inventory_store;
pub mod order_store;
pub mod product_store;

pub use inventory_store::*;
pub use order_store::*;
pub use product_store::*;

//! Screen-level view models.
//!
//! A screen bundles the [`ViewBinding`](sync_framework::ViewBinding)s one page of the
//! UI needs and turns raw form input into store intents. Rendering is left to the UI.

pub mod inventory;
pub mod orders;
pub mod products;
pub mod session;

pub use inventory::InventoryScreen;
pub use orders::{offered_transitions, OrdersScreen};
pub use products::ProductsScreen;
pub use session::SessionPanel;

use super::config::{ClientConfig, ConfigError};
use crate::screens::{InventoryScreen, OrdersScreen, ProductsScreen, SessionPanel};
use crate::stores::{InventoryStore, OrderStore, ProductStore};
use std::sync::Arc;
use sync_framework::{Confirm, Endpoint, HttpTransport, SessionStore, Transport};
use tracing::info;

/// Owns the stores of one client and wires them to a shared transport.
///
/// Stores are created once and shared: every screen built from the same context sees
/// the same collection state. Nothing is loaded until a screen mounts.
///
/// # Example
///
/// ```no_run
/// use storefront::lifecycle::{AppContext, ClientConfig};
///
/// # async fn run() -> Result<(), storefront::lifecycle::ConfigError> {
/// let context = AppContext::from_config(&ClientConfig::default())?;
/// let inventory = context.inventory_screen();
/// inventory.mount().await;
/// for (record, level) in inventory.rows() {
///     println!("{} {}", record.product_id, level.label());
/// }
/// # Ok(())
/// # }
/// ```
pub struct AppContext {
    pub products: Arc<ProductStore>,
    pub orders: Arc<OrderStore>,
    pub inventory: Arc<InventoryStore>,
    pub session: Arc<SessionStore>,
    config: ClientConfig,
}

impl AppContext {
    /// Builds an HTTP transport for `config.base_url` and the stores on top of it.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let transport = HttpTransport::with_timeout(&config.base_url, config.request_timeout())?;
        info!(base_url = %transport.base_url(), "Client context created");
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    pub fn with_transport(transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        let policy = config.stale_policy;
        Self {
            products: Arc::new(crate::product::new(
                transport.clone(),
                &config.products_path,
                policy,
            )),
            orders: Arc::new(crate::order::new(
                transport.clone(),
                &config.orders_path,
                policy,
            )),
            inventory: Arc::new(crate::inventory::new(
                transport.clone(),
                &config.inventory_path,
                policy,
            )),
            session: Arc::new(SessionStore::with_policy(
                transport,
                Endpoint::new(&config.auth_path),
                policy,
            )),
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn products_screen(&self, confirm: Arc<dyn Confirm>) -> ProductsScreen {
        ProductsScreen::new(self.products.clone(), confirm)
    }

    pub fn orders_screen(&self) -> OrdersScreen {
        OrdersScreen::new(self.orders.clone(), self.products.clone())
    }

    pub fn inventory_screen(&self) -> InventoryScreen {
        InventoryScreen::new(self.inventory.clone())
    }

    pub fn session_panel(&self) -> SessionPanel {
        SessionPanel::new(self.session.clone())
    }
}

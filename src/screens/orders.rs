use crate::model::{Order, OrderStatus, Product};
use crate::order::{offered_commands, OrderCommand, OrderError, OrderForm};
use crate::stores::{OrderStore, ProductStore};
use std::sync::Arc;
use sync_framework::{CollectionHandle, CollectionState, Intent, Outcome, ViewBinding};
use tokio::sync::watch;

/// Statuses a view may move `order` to. Reserving leads to `RESERVED`.
///
/// Terminal orders offer nothing, so a cancelled order can never be completed from a
/// view. The store itself does not enforce this.
pub fn offered_transitions(order: &Order) -> Vec<OrderStatus> {
    offered_commands(order)
        .into_iter()
        .map(|command| match command {
            OrderCommand::Reserve => OrderStatus::Reserved,
            OrderCommand::Complete => OrderStatus::Completed,
            OrderCommand::Cancel => OrderStatus::Cancelled,
        })
        .collect()
}

/// Orders list with the create form and lifecycle commands.
///
/// The product list is loaded alongside so new order lines can be priced.
pub struct OrdersScreen {
    orders: ViewBinding<OrderStore>,
    products: ViewBinding<ProductStore>,
}

impl OrdersScreen {
    pub fn new(orders: Arc<OrderStore>, products: Arc<ProductStore>) -> Self {
        Self {
            orders: ViewBinding::new(orders),
            products: ViewBinding::new(products),
        }
    }

    /// Loads orders, then products, once. Returns the orders outcome.
    pub async fn mount(&self) -> Option<Outcome> {
        let orders = self.orders.mount().await;
        self.products.mount().await;
        orders
    }

    pub fn state(&self) -> CollectionState<Order> {
        self.orders.store().snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<CollectionState<Order>> {
        self.orders.store().subscribe()
    }

    pub fn products(&self) -> Vec<Product> {
        self.products.store().snapshot().items
    }

    pub fn controls_enabled(&self) -> bool {
        self.orders.controls_enabled()
    }

    pub async fn refresh(&self) -> Intent {
        self.orders.dispatch(|store| store.refresh()).await
    }

    /// Validates `form` against the loaded products and creates the order.
    pub async fn create(&self, form: &OrderForm) -> Result<Intent, OrderError> {
        let draft = form.validate(&self.products())?;
        Ok(self.orders.dispatch(|store| store.create(&draft)).await)
    }

    /// Commands to render for `order`.
    pub fn commands(&self, order: &Order) -> Vec<OrderCommand> {
        offered_commands(order)
    }

    /// Runs `command` if it is offered for the order's current status.
    pub async fn apply(&self, order: &Order, command: OrderCommand) -> Result<Intent, OrderError> {
        if !offered_commands(order).contains(&command) {
            return Err(OrderError::NotOffered {
                status: order.status,
                command,
            });
        }
        let id = order.id;
        let intent = self
            .orders
            .dispatch(|store| store.perform(id, command.action()))
            .await;
        Ok(intent)
    }

    pub async fn reserve(&self, order: &Order) -> Result<Intent, OrderError> {
        self.apply(order, OrderCommand::Reserve).await
    }

    /// Moves the order to `status` without checking what the view offers.
    pub async fn transition(&self, id: u64, status: OrderStatus) -> Intent {
        self.orders
            .dispatch(|store| store.transition(id, status))
            .await
    }

    pub fn dismiss_error(&self) {
        self.orders.store().dismiss_error();
    }
}

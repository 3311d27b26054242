//! Custom actions for orders.
//!
//! Orders have no update route. Their lifecycle moves through two item sub-routes
//! instead, and both answer with the updated order.

use crate::model::{Order, OrderStatus};

/// Operations on one order beyond create/read.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// `PATCH /{id}/status?status=...`
    ///
    /// The server accepts any status; nothing here prevents leaving a terminal state.
    Transition(OrderStatus),
    /// `POST /{id}/reserve`: reserves stock and moves the order to `RESERVED`.
    Reserve,
}

/// Lifecycle steps a view may offer for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderCommand {
    Reserve,
    Complete,
    Cancel,
}

impl OrderCommand {
    pub fn label(&self) -> &'static str {
        match self {
            OrderCommand::Reserve => "Reserve Stock",
            OrderCommand::Complete => "Complete",
            OrderCommand::Cancel => "Cancel",
        }
    }

    pub fn action(&self) -> OrderAction {
        match self {
            OrderCommand::Reserve => OrderAction::Reserve,
            OrderCommand::Complete => OrderAction::Transition(OrderStatus::Completed),
            OrderCommand::Cancel => OrderAction::Transition(OrderStatus::Cancelled),
        }
    }
}

/// Which commands a view offers for `order`.
///
/// `CREATED` can be reserved, `RESERVED` can be completed, and anything not yet
/// terminal can be cancelled. Terminal orders offer nothing.
pub fn offered_commands(order: &Order) -> Vec<OrderCommand> {
    match order.status {
        OrderStatus::Created => vec![OrderCommand::Reserve, OrderCommand::Cancel],
        OrderStatus::Reserved => vec![OrderCommand::Complete, OrderCommand::Cancel],
        OrderStatus::Completed | OrderStatus::Cancelled => Vec::new(),
    }
}

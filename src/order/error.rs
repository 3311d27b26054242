//! Error types for order forms and lifecycle commands.

use super::actions::OrderCommand;
use crate::model::OrderStatus;
use thiserror::Error;

/// Errors raised before an order request is sent.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The customer name is empty after trimming.
    #[error("Customer name is required")]
    CustomerNameRequired,

    /// No line has both a product and a positive quantity.
    #[error("Add at least one item with a product and quantity")]
    NoItems,

    /// The command is not offered for the order's current status.
    #[error("{} is not available for {} orders", .command.label(), .status)]
    NotOffered {
        status: OrderStatus,
        command: OrderCommand,
    },
}

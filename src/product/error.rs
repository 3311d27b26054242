//! Error types for the product form.

use thiserror::Error;

/// Reasons a product form cannot be submitted.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The name is empty after trimming.
    #[error("Name is required")]
    NameRequired,

    /// The price field does not hold a finite number.
    #[error("Price must be a number")]
    InvalidPrice(String),
}

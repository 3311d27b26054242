//! Editable product form.
//!
//! Holds raw text exactly as typed and turns it into a [`ProductDraft`] on submit.

use super::error::ProductError;
use crate::model::{Product, ProductDraft};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
}

impl ProductForm {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price: price.into(),
        }
    }

    /// Pre-fills the form from an existing product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.to_string(),
        }
    }

    /// Validates the form.
    ///
    /// The name and description are trimmed. A blank price counts as `0`.
    pub fn validate(&self) -> Result<ProductDraft, ProductError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ProductError::NameRequired);
        }

        let raw_price = self.price.trim();
        let price = if raw_price.is_empty() {
            0.0
        } else {
            raw_price
                .parse::<f64>()
                .ok()
                .filter(|p| p.is_finite())
                .ok_or_else(|| ProductError::InvalidPrice(raw_price.to_string()))?
        };

        let description = self.description.trim();
        Ok(ProductDraft {
            name: name.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            price,
        })
    }
}

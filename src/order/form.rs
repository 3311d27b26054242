//! Editable order form.
//!
//! Lines whose product is unset or whose quantity is zero are skipped on submit; unit
//! prices come from the product list the view currently holds.

use super::error::OrderError;
use crate::model::{OrderDraft, OrderItemDraft, Product};

#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub product_id: Option<u64>,
    pub quantity: u32,
}

impl Default for OrderLine {
    fn default() -> Self {
        Self {
            product_id: None,
            quantity: 1,
        }
    }
}

impl OrderLine {
    pub fn new(product_id: u64, quantity: u32) -> Self {
        Self {
            product_id: Some(product_id),
            quantity,
        }
    }

    fn is_complete(&self) -> bool {
        self.product_id.is_some() && self.quantity > 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderForm {
    pub customer_name: String,
    pub lines: Vec<OrderLine>,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self {
            customer_name: String::new(),
            lines: vec![OrderLine::default()],
        }
    }
}

impl OrderForm {
    pub fn new(customer_name: impl Into<String>, lines: Vec<OrderLine>) -> Self {
        Self {
            customer_name: customer_name.into(),
            lines,
        }
    }

    pub fn add_line(&mut self) {
        self.lines.push(OrderLine::default());
    }

    pub fn remove_line(&mut self, index: usize) {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.customer_name.trim().is_empty() && self.lines.iter().any(OrderLine::is_complete)
    }

    /// Builds the draft, pricing each line from `products` (`0` when unknown).
    pub fn validate(&self, products: &[Product]) -> Result<OrderDraft, OrderError> {
        let customer_name = self.customer_name.trim();
        if customer_name.is_empty() {
            return Err(OrderError::CustomerNameRequired);
        }

        let items: Vec<OrderItemDraft> = self
            .lines
            .iter()
            .filter_map(|line| {
                let product_id = line.product_id.filter(|_| line.quantity > 0)?;
                let unit_price = products
                    .iter()
                    .find(|p| p.id == product_id)
                    .map(|p| p.price)
                    .unwrap_or(0.0);
                Some(OrderItemDraft {
                    product_id,
                    quantity: line.quantity,
                    unit_price,
                })
            })
            .collect();
        if items.is_empty() {
            return Err(OrderError::NoItems);
        }

        Ok(OrderDraft {
            customer_name: customer_name.to_string(),
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![Product::new(1, "Widget", 9.99), Product::new(2, "Gadget", 20.0)]
    }

    #[test]
    fn test_lines_priced_from_catalog() {
        let form = OrderForm::new(
            " Ada ",
            vec![OrderLine::new(2, 3), OrderLine::default(), OrderLine::new(9, 1)],
        );

        let draft = form.validate(&catalog()).unwrap();

        assert_eq!(draft.customer_name, "Ada");
        assert_eq!(
            draft.items,
            vec![
                OrderItemDraft { product_id: 2, quantity: 3, unit_price: 20.0 },
                OrderItemDraft { product_id: 9, quantity: 1, unit_price: 0.0 },
            ]
        );
    }

    #[test]
    fn test_customer_name_required() {
        let form = OrderForm::new("  ", vec![OrderLine::new(1, 1)]);
        assert!(!form.can_submit());
        assert_eq!(form.validate(&catalog()), Err(OrderError::CustomerNameRequired));
    }

    #[test]
    fn test_needs_a_complete_line() {
        let mut form = OrderForm::new("Ada", vec![OrderLine::new(1, 0)]);
        assert!(!form.can_submit());
        assert_eq!(form.validate(&catalog()), Err(OrderError::NoItems));

        form.add_line();
        form.lines[1].product_id = Some(1);
        assert!(form.can_submit());
        form.remove_line(0);
        assert_eq!(form.lines.len(), 1);
        assert!(form.validate(&catalog()).is_ok());
    }

    #[test]
    fn test_default_form_has_one_empty_line() {
        let form = OrderForm::default();
        assert_eq!(form.lines, vec![OrderLine::default()]);
        assert!(!form.can_submit());
    }
}

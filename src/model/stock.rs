//! Inventory stock for one product.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub id: u64,
    pub product_id: u64,
    pub available: i64,
    pub reserved: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Coarse stock band shown next to each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    Low,
    Medium,
    InStock,
}

impl StockRecord {
    pub fn level(&self) -> StockLevel {
        match self.available {
            i64::MIN..=5 => StockLevel::Low,
            6..=20 => StockLevel::Medium,
            _ => StockLevel::InStock,
        }
    }
}

impl StockLevel {
    pub fn label(&self) -> &'static str {
        match self {
            StockLevel::Low => "Low Stock",
            StockLevel::Medium => "Medium",
            StockLevel::InStock => "In Stock",
        }
    }
}

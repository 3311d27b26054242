use crate::model::{StockLevel, StockRecord};
use crate::stores::InventoryStore;
use std::sync::Arc;
use sync_framework::{CollectionHandle, CollectionState, Intent, Outcome, ViewBinding};

/// Stock levels across products.
pub struct InventoryScreen {
    view: ViewBinding<InventoryStore>,
}

impl InventoryScreen {
    pub fn new(store: Arc<InventoryStore>) -> Self {
        Self {
            view: ViewBinding::new(store),
        }
    }

    pub async fn mount(&self) -> Option<Outcome> {
        self.view.mount().await
    }

    pub fn state(&self) -> CollectionState<StockRecord> {
        self.view.store().snapshot()
    }

    pub fn controls_enabled(&self) -> bool {
        self.view.controls_enabled()
    }

    pub async fn refresh(&self) -> Intent {
        self.view.dispatch(|store| store.refresh()).await
    }

    pub async fn lookup(&self, product_id: u64) -> Intent {
        self.view.dispatch(|store| store.lookup(product_id)).await
    }

    /// Each record with its stock band, in server order.
    pub fn rows(&self) -> Vec<(StockRecord, StockLevel)> {
        self.state()
            .items
            .into_iter()
            .map(|record| {
                let level = record.level();
                (record, level)
            })
            .collect()
    }
}

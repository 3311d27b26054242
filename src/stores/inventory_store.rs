use crate::model::StockRecord;
use sync_framework::{collection_store, CollectionHandle, Outcome};
use tracing::instrument;

collection_store!(
    /// Read-only store for inventory stock.
    pub Inventory => StockRecord
);

impl InventoryStore {
    /// Loads the stock record of one product (`GET /stock/{productId}`) and merges it
    /// into the list by record id.
    #[instrument(skip(self))]
    pub async fn lookup(&self, product_id: u64) -> Outcome {
        self.inner().fetch(&product_id).await
    }

    pub fn for_product(&self, product_id: u64) -> Option<StockRecord> {
        self.snapshot()
            .items
            .into_iter()
            .find(|record| record.product_id == product_id)
    }
}

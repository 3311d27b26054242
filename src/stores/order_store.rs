use crate::model::{OrderDraft, OrderStatus};
use crate::order::OrderAction;
use sync_framework::{collection_store, CollectionHandle, Outcome};
use tracing::{debug, instrument};

collection_store!(
    /// Store for the orders collection.
    pub Order => crate::model::Order
);

impl OrderStore {
    #[instrument(skip(self, draft), fields(customer = %draft.customer_name))]
    pub async fn create(&self, draft: &OrderDraft) -> Outcome {
        debug!(?draft, "create called");
        self.inner().create(draft).await
    }

    #[instrument(skip(self))]
    pub async fn perform(&self, id: u64, action: OrderAction) -> Outcome {
        self.inner().perform(&id, &action).await
    }

    /// Sets the order's status. Any status is sent as-is; the server does not guard
    /// transitions and neither does this store.
    pub async fn transition(&self, id: u64, status: OrderStatus) -> Outcome {
        self.perform(id, OrderAction::Transition(status)).await
    }

    /// Reserves stock for the order.
    pub async fn reserve(&self, id: u64) -> Outcome {
        self.perform(id, OrderAction::Reserve).await
    }

    pub async fn fetch(&self, id: u64) -> Outcome {
        self.inner().fetch(&id).await
    }
}

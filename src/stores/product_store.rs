use crate::model::{Product, ProductDraft};
use sync_framework::{collection_store, CollectionHandle, Outcome};
use tracing::{debug, instrument};

collection_store!(
    /// Store for the products collection.
    pub Product => Product
);

impl ProductStore {
    /// Creates a product, or updates the one being edited.
    #[instrument(skip(self, draft))]
    pub async fn save(&self, draft: &ProductDraft) -> Outcome {
        debug!(?draft, "save called");
        match self.snapshot().editing {
            Some(editing) => self.inner().update(&editing.id, draft).await,
            None => self.inner().create(draft).await,
        }
    }

    pub async fn create(&self, draft: &ProductDraft) -> Outcome {
        self.inner().create(draft).await
    }

    pub async fn update(&self, id: u64, draft: &ProductDraft) -> Outcome {
        self.inner().update(&id, draft).await
    }

    /// Lists products matching `keyword`; a blank keyword lists everything.
    #[instrument(skip(self))]
    pub async fn search(&self, keyword: &str) -> Outcome {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.refresh().await;
        }
        self.inner()
            .refresh_with("search", vec![("keyword".to_string(), keyword.to_string())])
            .await
    }

    pub async fn fetch(&self, id: u64) -> Outcome {
        self.inner().fetch(&id).await
    }

    /// Deletes a product. Views must confirm with the user first.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: u64) -> Outcome {
        self.inner().remove(&id).await
    }

    pub fn find(&self, id: u64) -> Option<Product> {
        self.snapshot().find(&id).cloned()
    }
}

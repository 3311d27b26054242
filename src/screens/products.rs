use crate::model::Product;
use crate::product::{ProductError, ProductForm};
use crate::stores::ProductStore;
use std::sync::Arc;
use sync_framework::{
    delete_prompt, CollectionHandle, CollectionState, Confirm, Intent, Outcome, ViewBinding,
};
use tokio::sync::watch;

/// Product list with search, create/edit form and confirmed delete.
pub struct ProductsScreen {
    view: ViewBinding<ProductStore>,
    confirm: Arc<dyn Confirm>,
}

impl ProductsScreen {
    pub fn new(store: Arc<ProductStore>, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            view: ViewBinding::new(store),
            confirm,
        }
    }

    pub async fn mount(&self) -> Option<Outcome> {
        self.view.mount().await
    }

    pub fn state(&self) -> CollectionState<Product> {
        self.view.store().snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<CollectionState<Product>> {
        self.view.store().subscribe()
    }

    pub fn controls_enabled(&self) -> bool {
        self.view.controls_enabled()
    }

    pub async fn refresh(&self) -> Intent {
        self.view.dispatch(|store| store.refresh()).await
    }

    pub async fn search(&self, keyword: &str) -> Intent {
        self.view.dispatch(|store| store.search(keyword)).await
    }

    /// The form to show: pre-filled when editing, blank otherwise.
    pub fn form(&self) -> ProductForm {
        self.state()
            .editing
            .as_ref()
            .map(ProductForm::from_product)
            .unwrap_or_default()
    }

    /// Validates `form` and creates or updates depending on the editing target.
    pub async fn save(&self, form: &ProductForm) -> Result<Intent, ProductError> {
        let draft = form.validate()?;
        Ok(self.view.dispatch(|store| store.save(&draft)).await)
    }

    pub fn edit(&self, product: &Product) {
        self.view.store().begin_edit(product);
    }

    pub fn cancel_edit(&self) {
        self.view.store().cancel_edit();
    }

    /// Asks for confirmation, then deletes.
    pub async fn remove(&self, product: &Product) -> Intent {
        let prompt = delete_prompt(&product.name);
        let id = product.id;
        self.view
            .dispatch_confirmed(self.confirm.as_ref(), &prompt, |store| store.remove(id))
            .await
    }

    pub fn dismiss_error(&self) {
        self.view.store().dismiss_error();
    }
}

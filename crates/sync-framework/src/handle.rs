//! # CollectionHandle Trait
//!
//! Provides a common interface for collection-specific stores (products, orders, ...),
//! adding default read and lifecycle methods on top of a generic `ResourceStore`.
//! Domain stores only add the operations that are specific to their collection.
//!
//! The [`collection_store!`](crate::collection_store) macro generates the wrapper
//! struct and the trait impls in one line.
use crate::entity::{entity_type, SyncEntity};
use crate::state::CollectionState;
use crate::store::{Outcome, ResourceStore};
use async_trait::async_trait;
use tokio::sync::watch;

/// Trait for domain stores to inherit the standard collection operations.
///
/// # Example
///
/// ```rust
/// use sync_framework::{ActionRoute, CollectionHandle, NoAction, ResourceStore, SyncEntity};
/// use async_trait::async_trait;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, Deserialize)]
/// struct Tag { id: u32, label: String }
///
/// #[derive(Debug, Serialize)]
/// struct TagDraft { label: String }
///
/// impl SyncEntity for Tag {
///     type Id = u32;
///     type Draft = TagDraft;
///     type Patch = TagDraft;
///     type Action = NoAction;
///     fn id(&self) -> &u32 { &self.id }
///     fn action_route(action: &NoAction) -> ActionRoute { match *action {} }
/// }
///
/// struct TagStore { inner: ResourceStore<Tag> }
///
/// #[async_trait]
/// impl CollectionHandle<Tag> for TagStore {
///     fn inner(&self) -> &ResourceStore<Tag> { &self.inner }
/// }
///
/// impl TagStore {
///     // Domain operation built on the generic store
///     async fn add(&self, label: &str) {
///         self.inner.create(&TagDraft { label: label.into() }).await;
///     }
/// }
/// ```
#[async_trait]
pub trait CollectionHandle<T: SyncEntity>: Send + Sync {
    /// Access the inner generic store.
    fn inner(&self) -> &ResourceStore<T>;

    /// Re-list the collection from the server.
    #[tracing::instrument(skip(self), fields(entity_type = entity_type::<T>()))]
    async fn refresh(&self) -> Outcome {
        tracing::debug!("Refreshing");
        self.inner().refresh().await
    }

    fn snapshot(&self) -> CollectionState<T> {
        self.inner().snapshot()
    }

    fn subscribe(&self) -> watch::Receiver<CollectionState<T>> {
        self.inner().subscribe()
    }

    fn is_pending(&self) -> bool {
        self.inner().is_pending()
    }

    fn begin_edit(&self, entity: &T) {
        self.inner().begin_edit(entity)
    }

    fn cancel_edit(&self) {
        self.inner().cancel_edit()
    }

    fn dismiss_error(&self) {
        self.inner().dismiss_error()
    }
}

/// Declares a domain store wrapping `ResourceStore<$entity>`.
///
/// `collection_store!(pub Product => Product)` generates `pub struct ProductStore` with
/// a `new(ResourceStore<Product>)` constructor, a [`CollectionHandle`] impl and a
/// [`Loadable`](crate::Loadable) impl that refreshes on mount.
#[macro_export]
macro_rules! collection_store {
    ($(#[$meta:meta])* $vis:vis $name:ident => $entity:ty) => {
        $crate::paste::paste! {
            $(#[$meta])*
            $vis struct [<$name Store>] {
                inner: $crate::ResourceStore<$entity>,
            }

            impl [<$name Store>] {
                pub fn new(inner: $crate::ResourceStore<$entity>) -> Self {
                    Self { inner }
                }
            }

            #[$crate::async_trait::async_trait]
            impl $crate::CollectionHandle<$entity> for [<$name Store>] {
                fn inner(&self) -> &$crate::ResourceStore<$entity> {
                    &self.inner
                }
            }

            #[$crate::async_trait::async_trait]
            impl $crate::Loadable for [<$name Store>] {
                async fn load(&self) -> $crate::Outcome {
                    $crate::CollectionHandle::refresh(self).await
                }

                fn is_pending(&self) -> bool {
                    $crate::CollectionHandle::is_pending(self)
                }
            }
        }
    };
}

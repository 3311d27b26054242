//! # View Binding
//!
//! The contract a UI layer consumes. A [`ViewBinding`] wraps one shared store and:
//!
//! * runs the initial load exactly once per binding ([`mount`](ViewBinding::mount)),
//! * reports whether controls should be enabled (`!pending`),
//! * forwards intents to the store 1:1, and
//! * gates destructive intents behind a [`Confirm`] prompt.
//!
//! Rendering, layout and routing are the UI's business; nothing here draws anything.

use crate::entity::SyncEntity;
use crate::store::{Outcome, ResourceStore};
use async_trait::async_trait;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// A store that can populate itself when a view mounts.
#[async_trait]
pub trait Loadable: Send + Sync {
    /// Initial load: `refresh()` for collections, `check_session()` for auth.
    async fn load(&self) -> Outcome;

    fn is_pending(&self) -> bool;
}

#[async_trait]
impl<T: SyncEntity> Loadable for ResourceStore<T> {
    async fn load(&self) -> Outcome {
        self.refresh().await
    }

    fn is_pending(&self) -> bool {
        ResourceStore::is_pending(self)
    }
}

/// Human confirmation for destructive actions.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Confirms everything. For non-interactive callers and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Result of forwarding a user intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// The store ran the operation.
    Dispatched(Outcome),
    /// The user declined the confirmation prompt; no request was sent.
    Declined,
    /// Controls were disabled because a request is pending; nothing was sent.
    Blocked,
}

impl Intent {
    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            Intent::Dispatched(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Intent::Dispatched(Outcome::Applied))
    }
}

/// Binds one view to a shared store.
pub struct ViewBinding<S: Loadable> {
    store: Arc<S>,
    mounted: AtomicBool,
}

impl<S: Loadable> ViewBinding<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            mounted: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Runs the initial load the first time it is called; later calls return `None`.
    pub async fn mount(&self) -> Option<Outcome> {
        if self.mounted.swap(true, Ordering::SeqCst) {
            debug!("Already mounted");
            return None;
        }
        Some(self.store.load().await)
    }

    pub fn controls_enabled(&self) -> bool {
        !self.store.is_pending()
    }

    /// Forwards an intent unless controls are disabled.
    pub async fn dispatch<'a, F, Fut>(&'a self, intent: F) -> Intent
    where
        F: FnOnce(&'a S) -> Fut,
        Fut: Future<Output = Outcome> + 'a,
    {
        if !self.controls_enabled() {
            debug!("Intent blocked while pending");
            return Intent::Blocked;
        }
        Intent::Dispatched(intent(&self.store).await)
    }

    /// Like [`dispatch`](Self::dispatch), but asks `confirm` first.
    pub async fn dispatch_confirmed<'a, F, Fut>(
        &'a self,
        confirm: &dyn Confirm,
        prompt: &str,
        intent: F,
    ) -> Intent
    where
        F: FnOnce(&'a S) -> Fut,
        Fut: Future<Output = Outcome> + 'a,
    {
        if !confirm.confirm(prompt) {
            debug!(prompt, "Confirmation declined");
            return Intent::Declined;
        }
        self.dispatch(intent).await
    }
}

/// Prompt shown before removing a named entity.
pub fn delete_prompt(name: &str) -> String {
    format!("Delete \"{}\"?", name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{ActionRoute, NoAction};
    use crate::mock::{create_channel_transport, expect_request, MockTransport};
    use crate::request::{Endpoint, Method};
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    #[derive(Clone, Debug, PartialEq, Deserialize)]
    struct Item {
        id: u32,
        name: String,
    }

    impl SyncEntity for Item {
        type Id = u32;
        type Draft = ();
        type Patch = ();
        type Action = NoAction;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn action_route(action: &NoAction) -> ActionRoute {
            match *action {}
        }
    }

    fn binding(mock: &MockTransport) -> ViewBinding<ResourceStore<Item>> {
        ViewBinding::new(Arc::new(ResourceStore::new(
            Arc::new(mock.clone()),
            Endpoint::new("/api/items"),
        )))
    }

    #[tokio::test]
    async fn test_mount_loads_exactly_once() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/api/items")
            .return_json(json!([{ "id": 1, "name": "a" }]));
        let view = binding(&mock);

        assert_eq!(view.mount().await, Some(Outcome::Applied));
        assert_eq!(view.mount().await, None);
        assert!(view.is_mounted());

        assert_eq!(mock.requests().len(), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn test_declined_confirmation_sends_nothing() {
        let mock = MockTransport::new();
        let view = binding(&mock);
        let asked = AtomicUsize::new(0);
        let deny = |prompt: &str| {
            assert_eq!(prompt, "Delete \"a\"?");
            asked.fetch_add(1, Ordering::SeqCst);
            false
        };

        let intent = view
            .dispatch_confirmed(&deny, &delete_prompt("a"), |store| store.remove(&1))
            .await;

        assert_eq!(intent, Intent::Declined);
        assert_eq!(asked.load(Ordering::SeqCst), 1);
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_remove_is_dispatched() {
        let mock = MockTransport::new();
        mock.expect(Method::Delete, "/api/items/1").return_no_content();
        let view = binding(&mock);

        let intent = view
            .dispatch_confirmed(&AlwaysConfirm, &delete_prompt("a"), |store| store.remove(&1))
            .await;

        assert!(intent.is_applied());
        mock.verify();
    }

    #[tokio::test]
    async fn test_controls_disabled_while_pending() {
        let (transport, mut requests) = create_channel_transport(4);
        let view = Arc::new(ViewBinding::new(Arc::new(ResourceStore::<Item>::new(
            Arc::new(transport),
            Endpoint::new("/api/items"),
        ))));
        assert!(view.controls_enabled());

        let mount = tokio::spawn({
            let view = view.clone();
            async move { view.mount().await }
        });
        let pending = expect_request(&mut requests).await.unwrap();

        assert!(!view.controls_enabled());
        assert_eq!(view.dispatch(|store| store.refresh()).await, Intent::Blocked);

        pending.respond_json(json!([]));
        assert_eq!(mount.await.unwrap(), Some(Outcome::Applied));
        assert!(view.controls_enabled());
    }
}

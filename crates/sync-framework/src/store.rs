//! # Resource Store
//!
//! `ResourceStore<T>` is the generic collection engine. It mirrors one remote REST
//! collection, drives every request through the shared [`Transport`], and reconciles
//! the results into a [`CollectionState`].
//!
//! ## Reactivity
//!
//! State lives in a `tokio::sync::watch` channel. The store is the only writer
//! (`send_modify`), and every change is pushed to subscribers; nothing polls.
//!
//! ## Operation lifecycle
//!
//! Every network operation follows the same steps:
//!
//! 1. Take a [`Ticket`](crate::Ticket) from the store's [`Sequencer`].
//! 2. Mark the state pending and clear the previous error.
//! 3. Send the request and decode the body into the expected shape.
//! 4. If the ticket is still current, either reconcile the result or record the error
//!    message. Otherwise the result is discarded.
//!
//! Operations never return `Err`: the [`Outcome`] tells the caller what happened, and
//! the state carries the user-facing message.
//!
//! Mutations are reconciled from their own responses. The store never re-lists after a
//! successful mutation; call [`refresh`](ResourceStore::refresh) explicitly for that.

use crate::entity::{entity_type, SyncEntity};
use crate::error::TransportError;
use crate::request::{Endpoint, Method, Request};
use crate::sequence::{Sequencer, StalePolicy};
use crate::state::CollectionState;
use crate::transport::{decode_body, Transport};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// What a store operation did with its result.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The response was reconciled into state.
    Applied,
    /// The call failed; the message is in `error_message`.
    Failed(TransportError),
    /// A later call superseded this one; nothing was written.
    Discarded,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn error(&self) -> Option<&TransportError> {
        match self {
            Outcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Generic mirror of one remote collection.
pub struct ResourceStore<T: SyncEntity> {
    transport: Arc<dyn Transport>,
    endpoint: Endpoint,
    state: watch::Sender<CollectionState<T>>,
    sequencer: Sequencer,
}

impl<T: SyncEntity> ResourceStore<T> {
    pub fn new(transport: Arc<dyn Transport>, endpoint: Endpoint) -> Self {
        Self::with_policy(transport, endpoint, StalePolicy::default())
    }

    pub fn with_policy(
        transport: Arc<dyn Transport>,
        endpoint: Endpoint,
        policy: StalePolicy,
    ) -> Self {
        let (state, _) = watch::channel(CollectionState::default());
        Self {
            transport,
            endpoint,
            state,
            sequencer: Sequencer::new(policy),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> CollectionState<T> {
        self.state.borrow().clone()
    }

    /// Receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<CollectionState<T>> {
        self.state.subscribe()
    }

    pub fn is_pending(&self) -> bool {
        self.state.borrow().pending
    }

    // --- Network operations ---

    /// Lists the collection and replaces `items` wholesale.
    pub async fn refresh(&self) -> Outcome {
        let request = Request::new(Method::Get, self.endpoint.collection());
        self.execute("refresh", Ok(request), decode_body::<Vec<T>>, |state, items| {
            state.replace_all(items);
        })
        .await
    }

    /// Lists a collection-level sub-route (e.g. `search`) and replaces `items`.
    pub async fn refresh_with(&self, segment: &str, query: Vec<(String, String)>) -> Outcome {
        let request = Request::new(Method::Get, self.endpoint.sub(segment)).with_query_pairs(query);
        self.execute("refresh", Ok(request), decode_body::<Vec<T>>, |state, items| {
            state.replace_all(items);
        })
        .await
    }

    /// Loads one entity and upserts it.
    pub async fn fetch(&self, id: &T::Id) -> Outcome {
        let request = Request::new(Method::Get, self.endpoint.item(id));
        self.execute("fetch", Ok(request), decode_body::<T>, |state, entity| {
            state.upsert(entity);
        })
        .await
    }

    /// Creates an entity; the server's response is appended.
    pub async fn create(&self, draft: &T::Draft) -> Outcome {
        debug!(entity_type = entity_type::<T>(), ?draft, "Create");
        let request = Request::new(Method::Post, self.endpoint.collection()).with_json(draft);
        self.execute("create", request, decode_body::<T>, |state, entity| {
            state.upsert(entity);
        })
        .await
    }

    /// Updates an entity; the server's response replaces the local copy.
    pub async fn update(&self, id: &T::Id, patch: &T::Patch) -> Outcome {
        debug!(entity_type = entity_type::<T>(), %id, ?patch, "Update");
        let request = Request::new(T::UPDATE_METHOD, self.endpoint.item(id)).with_json(patch);
        self.execute("update", request, decode_body::<T>, |state, entity| {
            state.replace(entity);
        })
        .await
    }

    /// Deletes an entity. Callers are expected to have confirmed the removal.
    pub async fn remove(&self, id: &T::Id) -> Outcome {
        let request = Request::new(Method::Delete, self.endpoint.item(id));
        let target = id.clone();
        self.execute("remove", Ok(request), ignore_body, move |state, ()| {
            state.remove(&target);
        })
        .await
    }

    /// Runs an entity-specific action; the returned entity is reconciled like `update`.
    pub async fn perform(&self, id: &T::Id, action: &T::Action) -> Outcome {
        debug!(entity_type = entity_type::<T>(), %id, ?action, "Action");
        let route = T::action_route(action);
        let path = match route.segment {
            Some(segment) => self.endpoint.child(id, segment),
            None => self.endpoint.item(id),
        };
        let mut request = Request::new(route.method, path).with_query_pairs(route.query);
        if let Some(body) = route.body {
            request = request.with_body(body);
        }
        self.execute("action", Ok(request), decode_body::<T>, |state, entity| {
            state.replace(entity);
        })
        .await
    }

    // --- Local operations ---

    /// Selects `entity` for editing by storing a detached copy.
    pub fn begin_edit(&self, entity: &T) {
        let entity = entity.clone();
        self.state.send_modify(|state| state.editing = Some(entity));
    }

    pub fn cancel_edit(&self) {
        self.state.send_modify(|state| state.editing = None);
    }

    pub fn dismiss_error(&self) {
        self.state.send_modify(|state| state.error_message.clear());
    }

    async fn execute<R, D, F>(
        &self,
        op: &'static str,
        request: Result<Request, TransportError>,
        decode: D,
        reconcile: F,
    ) -> Outcome
    where
        D: FnOnce(Option<Value>) -> Result<R, TransportError>,
        F: FnOnce(&mut CollectionState<T>, R),
    {
        let entity_type = entity_type::<T>();
        let ticket = self.sequencer.issue();
        self.state.send_modify(|state| state.begin());

        let result = match request {
            Ok(request) => {
                debug!(entity_type, op, seq = ticket.seq(), method = %request.method, path = %request.path, "Sending request");
                self.transport.request(request).await.and_then(decode)
            }
            Err(e) => Err(e),
        };

        let mut outcome = Outcome::Discarded;
        self.state.send_modify(|state| {
            state.finish();
            // Checked under the state lock so a newer call cannot write in between.
            if !self.sequencer.is_current(ticket) {
                return;
            }
            match result {
                Ok(value) => {
                    reconcile(state, value);
                    outcome = Outcome::Applied;
                }
                Err(e) => {
                    state.error_message = e.to_string();
                    outcome = Outcome::Failed(e);
                }
            }
        });

        match &outcome {
            Outcome::Applied => {
                info!(entity_type, op, seq = ticket.seq(), size = self.state.borrow().len(), "Applied")
            }
            Outcome::Failed(e) => warn!(entity_type, op, seq = ticket.seq(), error = %e, "Failed"),
            Outcome::Discarded => warn!(entity_type, op, seq = ticket.seq(), "Stale response discarded"),
        }
        outcome
    }
}

fn ignore_body(_: Option<Value>) -> Result<(), TransportError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ActionRoute;
    use crate::mock::{create_channel_transport, expect_request, MockTransport};
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Clone, Debug, PartialEq, Deserialize)]
    struct Note {
        id: u32,
        text: String,
    }

    #[derive(Debug, Serialize)]
    struct NoteDraft {
        text: String,
    }

    #[derive(Debug)]
    enum NoteAction {
        Archive,
    }

    impl SyncEntity for Note {
        type Id = u32;
        type Draft = NoteDraft;
        type Patch = NoteDraft;
        type Action = NoteAction;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn action_route(action: &NoteAction) -> ActionRoute {
            match action {
                NoteAction::Archive => ActionRoute::new(Method::Post).segment("archive"),
            }
        }
    }

    fn note(id: u32, text: &str) -> Note {
        Note {
            id,
            text: text.into(),
        }
    }

    fn store(mock: &MockTransport) -> ResourceStore<Note> {
        ResourceStore::new(Arc::new(mock.clone()), Endpoint::new("/api/notes"))
    }

    #[tokio::test]
    async fn test_refresh_replaces_items() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/api/notes")
            .return_json(json!([{ "id": 1, "text": "a" }, { "id": 2, "text": "b" }]));
        let store = store(&mock);

        assert_eq!(store.refresh().await, Outcome::Applied);

        let state = store.snapshot();
        assert_eq!(state.items, vec![note(1, "a"), note(2, "b")]);
        assert!(!state.pending);
        assert!(state.error_message.is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_items_and_records_message() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/api/notes")
            .return_json(json!([{ "id": 1, "text": "a" }]));
        mock.expect(Method::Get, "/api/notes")
            .return_status(500, "Internal Server Error", "boom");
        let store = store(&mock);

        store.refresh().await;
        let outcome = store.refresh().await;

        assert!(outcome.is_failed());
        let state = store.snapshot();
        assert_eq!(state.items, vec![note(1, "a")]);
        assert_eq!(state.error_message, "HTTP 500 Internal Server Error: boom");
    }

    #[tokio::test]
    async fn test_decode_failure_surfaces_as_message() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/api/notes")
            .return_json(json!([{ "id": 1 }]));
        let store = store(&mock);

        let outcome = store.refresh().await;

        assert!(matches!(outcome, Outcome::Failed(TransportError::Decode(_))));
        assert!(store.snapshot().error_message.starts_with("Invalid response"));
        assert!(store.snapshot().items.is_empty());
    }

    #[tokio::test]
    async fn test_create_appends_response() {
        let mock = MockTransport::new();
        mock.expect(Method::Post, "/api/notes")
            .return_json(json!({ "id": 5, "text": "new" }));
        let store = store(&mock);

        let outcome = store.create(&NoteDraft { text: "new".into() }).await;

        assert!(outcome.is_applied());
        assert_eq!(store.snapshot().items, vec![note(5, "new")]);
        assert_eq!(mock.requests()[0].body, Some(json!({ "text": "new" })));
    }

    #[tokio::test]
    async fn test_update_clears_editing_and_replaces_in_place() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/api/notes")
            .return_json(json!([{ "id": 1, "text": "a" }, { "id": 2, "text": "b" }]));
        mock.expect(Method::Put, "/api/notes/1")
            .return_json(json!({ "id": 1, "text": "edited" }));
        let store = store(&mock);
        store.refresh().await;
        store.begin_edit(&note(1, "a"));

        store.update(&1, &NoteDraft { text: "edited".into() }).await;

        let state = store.snapshot();
        assert_eq!(state.items, vec![note(1, "edited"), note(2, "b")]);
        assert!(state.editing.is_none());
    }

    #[tokio::test]
    async fn test_remove_failure_leaves_item() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/api/notes")
            .return_json(json!([{ "id": 1, "text": "a" }]));
        mock.expect(Method::Delete, "/api/notes/1")
            .return_status(409, "Conflict", "");
        mock.expect(Method::Delete, "/api/notes/1").return_no_content();
        let store = store(&mock);
        store.refresh().await;
        store.begin_edit(&note(1, "a"));

        assert!(store.remove(&1).await.is_failed());
        let state = store.snapshot();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.error_message, "HTTP 409 Conflict");
        assert!(state.editing.is_some());

        assert!(store.remove(&1).await.is_applied());
        let state = store.snapshot();
        assert!(state.items.is_empty());
        assert!(state.editing.is_none());
        assert!(state.error_message.is_empty());
    }

    #[tokio::test]
    async fn test_perform_routes_action() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/api/notes/3")
            .return_json(json!({ "id": 3, "text": "x" }));
        mock.expect(Method::Post, "/api/notes/3/archive")
            .return_json(json!({ "id": 3, "text": "archived" }));
        let store = store(&mock);

        store.fetch(&3).await;
        store.perform(&3, &NoteAction::Archive).await;

        assert_eq!(store.snapshot().items, vec![note(3, "archived")]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_refresh_with_sends_query() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/api/notes/search")
            .with_query("keyword", "wid")
            .return_json(json!([]));
        let store = store(&mock);

        let outcome = store
            .refresh_with("search", vec![("keyword".into(), "wid".into())])
            .await;

        assert!(outcome.is_applied());
        mock.verify();
    }

    #[tokio::test]
    async fn test_dismiss_error() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/api/notes")
            .return_err(TransportError::Network("connection refused".into()));
        let store = store(&mock);

        store.refresh().await;
        assert_eq!(store.snapshot().error_message, "Network error: connection refused");

        store.dismiss_error();
        assert!(store.snapshot().error_message.is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_are_notified() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/api/notes")
            .return_json(json!([{ "id": 1, "text": "a" }]));
        let store = store(&mock);
        let mut rx = store.subscribe();

        store.refresh().await;

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().items.len(), 1);
    }

    #[tokio::test]
    async fn test_stale_refresh_is_discarded() {
        let (transport, mut requests) = create_channel_transport(8);
        let store = Arc::new(ResourceStore::<Note>::new(
            Arc::new(transport),
            Endpoint::new("/api/notes"),
        ));

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.refresh().await }
        });
        let slow = expect_request(&mut requests).await.unwrap();

        let second = tokio::spawn({
            let store = store.clone();
            async move { store.refresh().await }
        });
        let fast = expect_request(&mut requests).await.unwrap();
        assert!(store.is_pending());

        fast.respond_json(json!([{ "id": 2, "text": "new" }]));
        assert_eq!(second.await.unwrap(), Outcome::Applied);
        assert!(store.is_pending(), "first call still outstanding");

        slow.respond_json(json!([{ "id": 1, "text": "old" }]));
        assert_eq!(first.await.unwrap(), Outcome::Discarded);

        let state = store.snapshot();
        assert_eq!(state.items, vec![note(2, "new")]);
        assert!(!state.pending);
    }

    #[tokio::test]
    async fn test_latest_resolved_policy_applies_last_arrival() {
        let (transport, mut requests) = create_channel_transport(8);
        let store = Arc::new(ResourceStore::<Note>::with_policy(
            Arc::new(transport),
            Endpoint::new("/api/notes"),
            StalePolicy::LatestResolved,
        ));

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.refresh().await }
        });
        let slow = expect_request(&mut requests).await.unwrap();
        let second = tokio::spawn({
            let store = store.clone();
            async move { store.refresh().await }
        });
        let fast = expect_request(&mut requests).await.unwrap();

        fast.respond_json(json!([{ "id": 2, "text": "new" }]));
        second.await.unwrap();
        slow.respond_json(json!([{ "id": 1, "text": "old" }]));
        first.await.unwrap();

        assert_eq!(store.snapshot().items, vec![note(1, "old")]);
    }
}

//! # Collection State
//!
//! [`CollectionState`] is the client-held copy of one remote collection plus its
//! request-lifecycle flags. Only [`ResourceStore`](crate::ResourceStore) mutates it;
//! everything else reads snapshots or subscribes to changes.
//!
//! The reconciliation helpers here keep `items` unique by id at all times.

use crate::entity::{entity_type, SyncEntity};
use tracing::{debug, warn};

/// Mirrored collection plus request-lifecycle metadata.
#[derive(Debug, Clone)]
pub struct CollectionState<T: SyncEntity> {
    /// Server order, unique by id.
    pub items: Vec<T>,
    /// True while at least one request of this store is outstanding.
    pub pending: bool,
    /// Last failure text; empty when there is none.
    pub error_message: String,
    /// Detached copy of the entity being edited; `None` when creating.
    pub editing: Option<T>,
    in_flight: usize,
}

impl<T: SyncEntity> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pending: false,
            error_message: String::new(),
            editing: None,
            in_flight: 0,
        }
    }
}

impl<T: SyncEntity> CollectionState<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_error(&self) -> bool {
        !self.error_message.is_empty()
    }

    pub fn find(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.find(id).is_some()
    }

    // --- Lifecycle ---

    pub(crate) fn begin(&mut self) {
        self.in_flight += 1;
        self.pending = true;
        self.error_message.clear();
    }

    pub(crate) fn finish(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.pending = self.in_flight > 0;
    }

    // --- Reconciliation ---

    /// Replaces `items` wholesale. Duplicate ids keep their first occurrence.
    /// Returns how many duplicates were dropped.
    pub(crate) fn replace_all(&mut self, incoming: Vec<T>) -> usize {
        let mut items: Vec<T> = Vec::with_capacity(incoming.len());
        let mut dropped = 0;
        for item in incoming {
            if items.iter().any(|existing| existing.id() == item.id()) {
                dropped += 1;
                continue;
            }
            items.push(item);
        }
        if dropped > 0 {
            warn!(
                entity_type = entity_type::<T>(),
                dropped, "Collection contained duplicate ids"
            );
        }
        self.items = items;
        dropped
    }

    /// Replaces the item with the same id in place, or appends it.
    /// Returns `true` when the item was appended.
    pub(crate) fn upsert(&mut self, entity: T) -> bool {
        match self.items.iter_mut().find(|item| item.id() == entity.id()) {
            Some(slot) => {
                *slot = entity;
                false
            }
            None => {
                self.items.push(entity);
                true
            }
        }
    }

    /// Replaces the first item whose id matches `entity`, and releases `editing`
    /// if it pointed at the same id. Returns `false` when no item matched.
    pub(crate) fn replace(&mut self, entity: T) -> bool {
        if self
            .editing
            .as_ref()
            .is_some_and(|editing| editing.id() == entity.id())
        {
            self.editing = None;
        }
        match self.items.iter_mut().find(|item| item.id() == entity.id()) {
            Some(slot) => {
                *slot = entity;
                true
            }
            None => {
                debug!(
                    entity_type = entity_type::<T>(),
                    id = %entity.id(),
                    "Updated entity not present locally"
                );
                false
            }
        }
    }

    /// Removes the item with `id` and releases `editing` if it referenced it.
    pub(crate) fn remove(&mut self, id: &T::Id) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        if self
            .editing
            .as_ref()
            .is_some_and(|editing| editing.id() == id)
        {
            self.editing = None;
        }
        self.items.len() != before
    }
}

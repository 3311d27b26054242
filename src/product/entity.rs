//! `SyncEntity` implementation for the Product wire type.
//!
//! Products use the plain CRUD routes: `PUT /{id}` replaces the whole product with a
//! [`ProductDraft`], and there are no custom actions.

use crate::model::{Product, ProductDraft};
use sync_framework::{ActionRoute, NoAction, SyncEntity};

impl SyncEntity for Product {
    type Id = u64;
    type Draft = ProductDraft;
    type Patch = ProductDraft;
    type Action = NoAction;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn action_route(action: &NoAction) -> ActionRoute {
        match *action {}
    }
}

//! `SyncEntity` implementation for the Order wire type.

use super::actions::OrderAction;
use crate::model::{Order, OrderDraft};
use sync_framework::{ActionRoute, Method, SyncEntity};

impl SyncEntity for Order {
    type Id = u64;
    type Draft = OrderDraft;
    // Orders are never updated wholesale; see `OrderAction`.
    type Patch = ();
    type Action = OrderAction;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn action_route(action: &OrderAction) -> ActionRoute {
        match action {
            OrderAction::Transition(status) => ActionRoute::new(Method::Patch)
                .segment("status")
                .query("status", status.as_str()),
            OrderAction::Reserve => ActionRoute::new(Method::Post).segment("reserve"),
        }
    }
}

//! `SyncEntity` implementation for stock records.
//!
//! The client only reads stock. Drafts and patches are `()` and never sent.

use crate::model::StockRecord;
use sync_framework::{ActionRoute, NoAction, SyncEntity};

impl SyncEntity for StockRecord {
    type Id = u64;
    type Draft = ();
    type Patch = ();
    type Action = NoAction;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn action_route(action: &NoAction) -> ActionRoute {
        match *action {}
    }
}

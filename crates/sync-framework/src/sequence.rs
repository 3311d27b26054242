//! # Request Sequencing
//!
//! Every store operation takes a [`Ticket`] before its request is sent. When the
//! request resolves, the store asks the [`Sequencer`] whether that ticket may still be
//! reconciled into state.
//!
//! With [`StalePolicy::LatestIssued`] only the most recently issued ticket is applied,
//! so a slow response can never overwrite the result of a call issued after it.
//! [`StalePolicy::LatestResolved`] applies every resolution in arrival order.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Which resolutions a store reconciles when calls overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Only the latest issued call is reconciled; older ones are discarded.
    #[default]
    LatestIssued,
    /// Every call is reconciled when it resolves; the last one to arrive wins.
    LatestResolved,
}

/// Monotonic sequence number of one issued call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

/// Issues tickets and decides whether a resolving call is stale.
#[derive(Debug)]
pub struct Sequencer {
    issued: AtomicU64,
    policy: StalePolicy,
}

impl Sequencer {
    pub fn new(policy: StalePolicy) -> Self {
        Self {
            issued: AtomicU64::new(0),
            policy,
        }
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether a call holding `ticket` may reconcile its result.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        match self.policy {
            StalePolicy::LatestIssued => self.issued.load(Ordering::SeqCst) == ticket.0,
            StalePolicy::LatestResolved => true,
        }
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(StalePolicy::default())
    }
}

//! # Session Store
//!
//! Auth specialization of the store pattern. Instead of a list it tracks who (if anyone)
//! is signed in. Credentials live in the transport's cookie jar; this store only
//! mirrors the identity the server reports from its `me` route.
//!
//! ```text
//!                 check_session / login / register / logout
//!  Unauthenticated ──────────────► Authenticating ──► Authenticated
//!        ▲                              │
//!        └──────────────────────────────┴──► Error (login/register rejected)
//! ```
//!
//! A `401` from `me` means "nobody is signed in" and is never reported as an error.
//! No other route gets that treatment.

use crate::error::TransportError;
use crate::request::{Endpoint, Method, Request};
use crate::sequence::{Sequencer, StalePolicy, Ticket};
use crate::store::Outcome;
use crate::transport::{decode_body, Transport};
use crate::view::Loadable;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// The signed-in user as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub role: String,
}

/// Login/registration payload.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    Authenticating,
    Authenticated,
    Error,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    /// `None` means unauthenticated.
    pub identity: Option<Identity>,
    pub status: SessionStatus,
    pub pending: bool,
    /// False until the first session check has completed.
    pub resolved: bool,
    pub error_message: String,
    in_flight: usize,
    /// Sequence number of the latest logout; calls issued before it never sign in.
    signed_out_at: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            identity: None,
            status: SessionStatus::Unauthenticated,
            pending: true,
            resolved: false,
            error_message: String::new(),
            in_flight: 0,
            signed_out_at: 0,
        }
    }
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    fn begin(&mut self) {
        self.in_flight += 1;
        self.pending = true;
        self.status = SessionStatus::Authenticating;
        self.error_message.clear();
    }

    fn finish(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.pending = self.in_flight > 0;
    }

    fn sign_out(&mut self) {
        self.identity = None;
        self.status = SessionStatus::Unauthenticated;
    }
}

/// Mirrors the server-side session.
pub struct SessionStore {
    transport: Arc<dyn Transport>,
    endpoint: Endpoint,
    state: watch::Sender<SessionState>,
    sequencer: Sequencer,
}

impl SessionStore {
    pub fn new(transport: Arc<dyn Transport>, endpoint: Endpoint) -> Self {
        Self::with_policy(transport, endpoint, StalePolicy::default())
    }

    pub fn with_policy(
        transport: Arc<dyn Transport>,
        endpoint: Endpoint,
        policy: StalePolicy,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            transport,
            endpoint,
            state,
            sequencer: Sequencer::new(policy),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.borrow().identity.clone()
    }

    /// Asks the server who is signed in.
    #[tracing::instrument(skip(self))]
    pub async fn check_session(&self) -> Outcome {
        let ticket = self.sequencer.issue();
        self.state.send_modify(SessionState::begin);

        let result = self.probe().await;

        let mut outcome = Outcome::Discarded;
        self.state.send_modify(|state| {
            state.finish();
            state.resolved = true;
            if !self.accepts(state, ticket) {
                return;
            }
            outcome = apply_probe(state, result);
        });
        log_outcome("check_session", ticket.seq(), &outcome);
        outcome
    }

    /// Signs in, then re-checks the session to hydrate the identity.
    #[tracing::instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Outcome {
        self.authenticate("login", credentials).await
    }

    /// Creates an account; the server signs it in, so this hydrates like `login`.
    #[tracing::instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn register(&self, credentials: &Credentials) -> Outcome {
        self.authenticate("register", credentials).await
    }

    /// Signs out. The local identity is cleared whether or not the server call succeeds,
    /// and even when a newer session call resolved first.
    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) -> Outcome {
        let ticket = self.sequencer.issue();
        self.state.send_modify(|state| {
            state.begin();
            state.identity = None;
            state.signed_out_at = state.signed_out_at.max(ticket.seq());
        });

        let request = Request::new(Method::Post, self.endpoint.sub("logout"));
        let result = self.transport.request(request).await;

        let mut outcome = Outcome::Discarded;
        self.state.send_modify(|state| {
            state.finish();
            state.sign_out();
            let current = self.sequencer.is_current(ticket);
            outcome = match result {
                Ok(_) => Outcome::Applied,
                Err(e) if current => {
                    state.error_message = e.to_string();
                    Outcome::Failed(e)
                }
                Err(_) => Outcome::Discarded,
            };
        });
        log_outcome("logout", ticket.seq(), &outcome);
        outcome
    }

    pub fn dismiss_error(&self) {
        self.state.send_modify(|state| {
            state.error_message.clear();
            if state.status == SessionStatus::Error {
                state.status = SessionStatus::Unauthenticated;
            }
        });
    }

    async fn authenticate(&self, route: &'static str, credentials: &Credentials) -> Outcome {
        let ticket = self.sequencer.issue();
        self.state.send_modify(SessionState::begin);

        let sign_in = match Request::new(Method::Post, self.endpoint.sub(route)).with_json(credentials) {
            Ok(request) => self.transport.request(request).await.map(|_| ()),
            Err(e) => Err(e),
        };
        let result = match sign_in {
            Ok(()) => Ok(self.probe().await),
            Err(e) => Err(e),
        };

        let mut outcome = Outcome::Discarded;
        self.state.send_modify(|state| {
            state.finish();
            if !self.accepts(state, ticket) {
                return;
            }
            outcome = match result {
                Ok(probe) => apply_probe(state, probe),
                Err(e) => {
                    state.identity = None;
                    state.status = SessionStatus::Error;
                    state.error_message = e.to_string();
                    Outcome::Failed(e)
                }
            };
        });
        log_outcome(route, ticket.seq(), &outcome);
        outcome
    }

    /// Whether a resolving call may write its result. Runs under the state lock.
    fn accepts(&self, state: &SessionState, ticket: Ticket) -> bool {
        self.sequencer.is_current(ticket) && ticket.seq() > state.signed_out_at
    }

    /// `GET me`. `Ok(None)` when nobody is signed in.
    async fn probe(&self) -> Result<Option<Identity>, TransportError> {
        let request = Request::new(Method::Get, self.endpoint.sub("me"));
        match self.transport.request(request).await {
            Ok(Some(body)) => decode_body(Some(body)).map(Some),
            Ok(None) => Ok(None),
            Err(e) if e.is_unauthorized() => {
                debug!("No active session");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

fn apply_probe(state: &mut SessionState, result: Result<Option<Identity>, TransportError>) -> Outcome {
    match result {
        Ok(Some(identity)) => {
            state.identity = Some(identity);
            state.status = SessionStatus::Authenticated;
            Outcome::Applied
        }
        Ok(None) => {
            state.sign_out();
            Outcome::Applied
        }
        Err(e) => {
            state.sign_out();
            state.error_message = e.to_string();
            Outcome::Failed(e)
        }
    }
}

fn log_outcome(op: &'static str, seq: u64, outcome: &Outcome) {
    match outcome {
        Outcome::Applied => info!(op, seq, "Session updated"),
        Outcome::Failed(e) => warn!(op, seq, error = %e, "Session operation failed"),
        Outcome::Discarded => warn!(op, seq, "Stale session response discarded"),
    }
}

#[async_trait]
impl Loadable for SessionStore {
    async fn load(&self) -> Outcome {
        self.check_session().await
    }

    fn is_pending(&self) -> bool {
        self.state.borrow().pending
    }
}

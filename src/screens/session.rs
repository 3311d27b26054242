use std::sync::Arc;
use sync_framework::{Credentials, Intent, Outcome, SessionState, SessionStore, ViewBinding};
use tokio::sync::watch;

/// Sign-in panel.
///
/// Controls start disabled: the session is pending until the first check resolves.
pub struct SessionPanel {
    view: ViewBinding<SessionStore>,
}

impl SessionPanel {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self {
            view: ViewBinding::new(store),
        }
    }

    /// Runs the initial session check once.
    pub async fn mount(&self) -> Option<Outcome> {
        self.view.mount().await
    }

    pub fn state(&self) -> SessionState {
        self.view.store().snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.view.store().subscribe()
    }

    pub fn controls_enabled(&self) -> bool {
        self.view.controls_enabled()
    }

    /// Re-checks the session, e.g. after the cookie may have expired.
    pub async fn check(&self) -> Intent {
        self.view.dispatch(|store| store.check_session()).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Intent {
        let credentials = Credentials::new(username.trim(), password);
        self.view.dispatch(|store| store.login(&credentials)).await
    }

    pub async fn register(&self, username: &str, password: &str) -> Intent {
        let credentials = Credentials::new(username.trim(), password);
        self.view.dispatch(|store| store.register(&credentials)).await
    }

    pub async fn logout(&self) -> Intent {
        self.view.dispatch(|store| store.logout()).await
    }

    pub fn dismiss_error(&self) {
        self.view.store().dismiss_error();
    }
}

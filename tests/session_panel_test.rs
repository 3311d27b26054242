use serde_json::json;
use std::sync::Arc;
use storefront::lifecycle::{AppContext, ClientConfig};
use storefront::model::StockLevel;
use sync_framework::mock::MockTransport;
use sync_framework::{Intent, Method, Outcome, SessionStatus};

fn context(mock: &MockTransport) -> AppContext {
    AppContext::with_transport(Arc::new(mock.clone()), &ClientConfig::default())
}

#[tokio::test]
async fn test_panel_is_disabled_until_first_check() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "/api/auth/me")
        .return_status(401, "Unauthorized", "");

    let panel = context(&mock).session_panel();
    let state = panel.state();
    assert!(state.pending);
    assert!(!state.resolved);
    assert_eq!(panel.login("alice", "secret").await, Intent::Blocked);

    assert_eq!(panel.mount().await, Some(Outcome::Applied));
    let state = panel.state();
    assert!(panel.controls_enabled());
    assert!(state.resolved);
    assert_eq!(state.status, SessionStatus::Unauthenticated);
    assert!(state.error_message.is_empty());
    mock.verify();
}

#[tokio::test]
async fn test_login_failure_then_success() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "/api/auth/me")
        .return_status(401, "Unauthorized", "");
    mock.expect(Method::Post, "/api/auth/login")
        .return_status(401, "Unauthorized", "Bad credentials");
    mock.expect(Method::Post, "/api/auth/login")
        .return_json(json!({ "token": "abc", "type": "Bearer" }));
    mock.expect(Method::Get, "/api/auth/me")
        .return_json(json!({ "username": "alice", "role": "USER" }));

    let panel = context(&mock).session_panel();
    panel.mount().await;

    let failed = panel.login("alice", "wrong").await;
    assert!(failed.outcome().unwrap().is_failed());
    let state = panel.state();
    assert_eq!(state.status, SessionStatus::Error);
    assert_eq!(state.error_message, "HTTP 401 Unauthorized: Bad credentials");
    assert!(state.identity.is_none());

    panel.dismiss_error();
    let state = panel.state();
    assert_eq!(state.status, SessionStatus::Unauthenticated);
    assert!(state.error_message.is_empty());

    assert!(panel.login("  alice ", "secret").await.is_applied());
    let state = panel.state();
    assert_eq!(state.status, SessionStatus::Authenticated);
    assert_eq!(state.identity.unwrap().username, "alice");
    assert_eq!(
        mock.requests()[2].body,
        Some(json!({ "username": "alice", "password": "secret" }))
    );
    mock.verify();
}

#[tokio::test]
async fn test_logout_clears_identity_even_when_server_fails() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "/api/auth/me")
        .return_json(json!({ "username": "alice", "role": "ADMIN" }));
    mock.expect(Method::Post, "/api/auth/logout")
        .return_status(500, "Internal Server Error", "");

    let panel = context(&mock).session_panel();
    panel.mount().await;
    assert!(panel.state().is_authenticated());

    let intent = panel.logout().await;
    assert!(intent.outcome().unwrap().is_failed());
    let state = panel.state();
    assert!(state.identity.is_none());
    assert_eq!(state.status, SessionStatus::Unauthenticated);
    assert_eq!(state.error_message, "HTTP 500 Internal Server Error");
    mock.verify();
}

#[tokio::test]
async fn test_register_signs_in() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "/api/auth/me")
        .return_status(401, "Unauthorized", "");
    mock.expect(Method::Post, "/api/auth/register")
        .return_json(json!({ "token": "abc", "type": "Bearer" }));
    mock.expect(Method::Get, "/api/auth/me")
        .return_json(json!({ "username": "bob", "role": "USER" }));

    let panel = context(&mock).session_panel();
    panel.mount().await;

    assert!(panel.register("bob", "hunter22").await.is_applied());
    assert_eq!(panel.state().identity.unwrap().username, "bob");
    mock.verify();
}

#[tokio::test]
async fn test_inventory_rows_carry_stock_level() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "/api/inventory/stock").return_json(json!([
        { "id": 10, "productId": 1, "available": 3, "reserved": 0 },
        { "id": 11, "productId": 2, "available": 15, "reserved": 1 },
        { "id": 12, "productId": 3, "available": 80, "reserved": 5 }
    ]));
    mock.expect(Method::Get, "/api/inventory/stock/1").return_json(json!(
        { "id": 10, "productId": 1, "available": 30, "reserved": 0 }
    ));

    let screen = context(&mock).inventory_screen();
    screen.mount().await;

    let levels: Vec<_> = screen.rows().into_iter().map(|(_, level)| level).collect();
    assert_eq!(
        levels,
        vec![StockLevel::Low, StockLevel::Medium, StockLevel::InStock]
    );

    assert!(screen.lookup(1).await.is_applied());
    let rows = screen.rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].1, StockLevel::InStock);
    mock.verify();
}

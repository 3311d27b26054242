use serde_json::{json, Value};
use std::sync::Arc;
use storefront::lifecycle::{AppContext, ClientConfig};
use storefront::model::OrderStatus;
use storefront::order::{OrderCommand, OrderError, OrderForm, OrderLine};
use storefront::screens::offered_transitions;
use sync_framework::mock::{create_channel_transport, expect_request, MockTransport};
use sync_framework::{CollectionHandle, Method, Outcome};

fn order_json(id: u64, status: &str) -> Value {
    json!({
        "id": id,
        "customerName": "Ada",
        "status": status,
        "total": 19.98,
        "createdAt": "2024-03-01T10:15:30Z",
        "items": [{ "id": 1, "productId": 1, "quantity": 2, "unitPrice": 9.99 }]
    })
}

fn context(mock: &MockTransport) -> AppContext {
    AppContext::with_transport(Arc::new(mock.clone()), &ClientConfig::default())
}

#[tokio::test]
async fn test_create_order_prices_lines_from_catalog() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "/api/orders").return_json(json!([]));
    mock.expect(Method::Get, "/api/products")
        .return_json(json!([{ "id": 1, "name": "Widget", "price": 9.99 }]));
    mock.expect(Method::Post, "/api/orders")
        .return_json(order_json(7, "CREATED"));

    let screen = context(&mock).orders_screen();
    assert_eq!(screen.mount().await, Some(Outcome::Applied));
    assert_eq!(screen.products().len(), 1);

    let mut form = OrderForm::default();
    assert_eq!(
        screen.create(&form).await.unwrap_err(),
        OrderError::CustomerNameRequired
    );

    form.customer_name = " Ada ".to_string();
    form.lines = vec![OrderLine::new(1, 2)];
    assert!(screen.create(&form).await.unwrap().is_applied());

    let body = mock.requests()[2].body.clone().unwrap();
    assert_eq!(
        body,
        json!({
            "customerName": "Ada",
            "items": [{ "productId": 1, "quantity": 2, "unitPrice": 9.99 }]
        })
    );
    let order = screen.state().items[0].clone();
    assert_eq!(order.id, 7);
    assert_eq!(order.status, OrderStatus::Created);
    assert!(order.created_at.is_some());
    mock.verify();
}

#[tokio::test]
async fn test_cancelled_order_offers_no_commands() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "/api/orders")
        .return_json(json!([order_json(7, "CREATED")]));
    mock.expect(Method::Get, "/api/products").return_json(json!([]));
    mock.expect(Method::Patch, "/api/orders/7/status")
        .with_query("status", "CANCELLED")
        .return_json(order_json(7, "CANCELLED"));
    mock.expect(Method::Patch, "/api/orders/7/status")
        .with_query("status", "COMPLETED")
        .return_json(order_json(7, "COMPLETED"));

    let screen = context(&mock).orders_screen();
    screen.mount().await;

    let order = screen.state().items[0].clone();
    assert_eq!(
        screen.commands(&order),
        vec![OrderCommand::Reserve, OrderCommand::Cancel]
    );
    screen.apply(&order, OrderCommand::Cancel).await.unwrap();

    let cancelled = screen.state().items[0].clone();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert!(screen.commands(&cancelled).is_empty());
    assert!(offered_transitions(&cancelled).is_empty());

    let err = screen
        .apply(&cancelled, OrderCommand::Complete)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Complete is not available for CANCELLED orders");

    // The store itself sends whatever it is asked to.
    let intent = screen.transition(7, OrderStatus::Completed).await;
    assert!(intent.is_applied());
    assert_eq!(screen.state().items[0].status, OrderStatus::Completed);
    mock.verify();
}

#[tokio::test]
async fn test_reserve_then_complete() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "/api/orders")
        .return_json(json!([order_json(7, "CREATED")]));
    mock.expect(Method::Get, "/api/products").return_json(json!([]));
    mock.expect(Method::Post, "/api/orders/7/reserve")
        .return_json(order_json(7, "RESERVED"));
    mock.expect(Method::Patch, "/api/orders/7/status")
        .with_query("status", "COMPLETED")
        .return_json(order_json(7, "COMPLETED"));

    let screen = context(&mock).orders_screen();
    screen.mount().await;

    let order = screen.state().items[0].clone();
    screen.reserve(&order).await.unwrap();
    let reserved = screen.state().items[0].clone();
    assert_eq!(
        offered_transitions(&reserved),
        vec![OrderStatus::Completed, OrderStatus::Cancelled]
    );

    screen.apply(&reserved, OrderCommand::Complete).await.unwrap();
    assert_eq!(screen.state().items[0].status, OrderStatus::Completed);
    mock.verify();
}

#[tokio::test]
async fn test_failed_transition_keeps_order() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "/api/orders")
        .return_json(json!([order_json(7, "CREATED")]));
    mock.expect(Method::Get, "/api/products").return_json(json!([]));
    mock.expect(Method::Post, "/api/orders/7/reserve").return_status(
        400,
        "Bad Request",
        "Insufficient stock for product 1",
    );

    let screen = context(&mock).orders_screen();
    screen.mount().await;
    let order = screen.state().items[0].clone();

    let intent = screen.reserve(&order).await.unwrap();
    assert!(!intent.is_applied());
    let state = screen.state();
    assert_eq!(state.items[0].status, OrderStatus::Created);
    assert_eq!(
        state.error_message,
        "HTTP 400 Bad Request: Insufficient stock for product 1"
    );
    mock.verify();
}

#[tokio::test]
async fn test_older_transition_resolving_last_is_discarded() {
    let (transport, mut rx) = create_channel_transport(8);
    let context = AppContext::with_transport(Arc::new(transport), &ClientConfig::default());
    let orders = context.orders.clone();

    let seed = {
        let orders = orders.clone();
        tokio::spawn(async move { orders.fetch(7).await })
    };
    expect_request(&mut rx)
        .await
        .unwrap()
        .respond_json(order_json(7, "CREATED"));
    assert_eq!(seed.await.unwrap(), Outcome::Applied);

    let first = {
        let orders = orders.clone();
        tokio::spawn(async move { orders.transition(7, OrderStatus::Cancelled).await })
    };
    let first_request = expect_request(&mut rx).await.unwrap();

    let second = {
        let orders = orders.clone();
        tokio::spawn(async move { orders.reserve(7).await })
    };
    let second_request = expect_request(&mut rx).await.unwrap();
    assert_eq!(second_request.request.path, "/api/orders/7/reserve");

    second_request.respond_json(order_json(7, "RESERVED"));
    assert_eq!(second.await.unwrap(), Outcome::Applied);
    assert!(orders.is_pending());

    first_request.respond_json(order_json(7, "CANCELLED"));
    assert_eq!(first.await.unwrap(), Outcome::Discarded);

    let state = orders.snapshot();
    assert!(!state.pending);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].status, OrderStatus::Reserved);
}

use actix_web::test::{self, TestRequest};
use actix_web::{http::StatusCode, App};
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use coffee_orders::{
    catalog_service::BeverageCatalog,
    entities::{
        beverage::Beverage,
        order::{Order, OrderStatus},
    },
    errors::CatalogError,
    order_service::{OrderService, OrderStatistics},
    repositories::in_memory::InMemoryOrderRepository,
    routes,
    state::AppState,
};

#[derive(Clone, Default)]
struct StubCatalog {
    down: Arc<AtomicBool>,
}

impl StubCatalog {
    fn price(name: &str) -> Option<Decimal> {
        match name {
            "Latte" => Some(dec!(4.0)),
            "Cappuccino" => Some(dec!(4.5)),
            _ => None,
        }
    }
}

#[async_trait]
impl BeverageCatalog for StubCatalog {
    async fn exists(&self, name: &str) -> Result<bool, CatalogError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(CatalogError::Unavailable("connection refused".into()));
        }
        Ok(Self::price(name).is_some())
    }

    async fn lookup(&self, name: &str) -> Result<Option<Beverage>, CatalogError> {
        Ok(Self::price(name).map(|price| Beverage {
            id: None,
            name: name.to_string(),
            size: "medium".into(),
            price,
        }))
    }
}

fn test_app(
    catalog: StubCatalog,
) -> actix_web::App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = AppState::new(OrderService::new(
        InMemoryOrderRepository::default(),
        catalog,
    ));
    App::new().app_data(state).configure(routes::config)
}

fn order_body(beverage: &str, size: &str, customer: Option<&str>) -> Value {
    json!({
        "beverageName": beverage,
        "size": size,
        "customerName": customer,
    })
}

#[actix_web::test]
async fn health_ok() {
    let app = test::init_service(test_app(StubCatalog::default())).await;

    for uri in ["/health", "/orders/health"] {
        let req = TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success(), "{uri}");
    }
}

#[actix_web::test]
async fn orders_create_and_get() {
    let app = test::init_service(test_app(StubCatalog::default())).await;

    let req = TestRequest::post()
        .uri("/orders")
        .set_json(order_body("Cappuccino", "medium", Some("Juan")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Order = test::read_body_json(resp).await;
    assert_eq!(created.id, 1);
    assert_eq!(created.beverage_name, "Cappuccino");
    assert_eq!(created.status, OrderStatus::Confirmed);
    assert_eq!(created.price, Some(dec!(4.5)));

    let req = TestRequest::get()
        .uri(&format!("/orders/{}", created.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Order = test::read_body_json(resp).await;
    assert_eq!(fetched, created);

    let req = TestRequest::get().uri("/orders/42").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ORDER_NOT_FOUND");
}

#[actix_web::test]
async fn create_maps_failures_to_client_and_server_errors() {
    let catalog = StubCatalog::default();
    let app = test::init_service(test_app(catalog.clone())).await;

    let req = TestRequest::post()
        .uri("/orders")
        .set_json(order_body("Latte", "huge", None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let req = TestRequest::post()
        .uri("/orders")
        .set_json(json!({ "size": "small" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let req = TestRequest::post()
        .uri("/orders")
        .set_json(order_body("Invalid", "small", None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BEVERAGE_NOT_FOUND");

    catalog.down.store(true, Ordering::SeqCst);
    let req = TestRequest::post()
        .uri("/orders")
        .set_json(order_body("Latte", "small", None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "SERVICE_UNAVAILABLE");

    // only the rejected order was stored
    let req = TestRequest::get().uri("/orders").to_request();
    let list: Vec<Order> = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].status, OrderStatus::Rejected);
    assert!(list[0].rejection_reason.is_some());
}

#[actix_web::test]
async fn list_filters_statistics_and_clear() {
    let app = test::init_service(test_app(StubCatalog::default())).await;

    for body in [
        order_body("Latte", "medium", Some("Ana")),
        order_body("Latte", "large", Some("Luis")),
        order_body("Invalid", "small", Some("Ana")),
    ] {
        let req = TestRequest::post().uri("/orders").set_json(body).to_request();
        test::call_service(&app, req).await;
    }

    let app_ref = &app;
    let list_len = move |uri: &'static str| async move {
        let req = TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(app_ref, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        let items: Vec<Order> = test::read_body_json(resp).await;
        items.len()
    };

    assert_eq!(list_len("/orders").await, 3);
    assert_eq!(list_len("/orders?status=CONFIRMED").await, 2);
    assert_eq!(list_len("/orders?status=rejected").await, 1);
    assert_eq!(list_len("/orders?customer=ana").await, 2);
    assert_eq!(list_len("/orders?status=REJECTED&customer=Luis").await, 1);
    assert_eq!(list_len("/orders?status=&customer=Luis").await, 1);
    assert_eq!(list_len("/orders/status/confirmed").await, 2);
    assert_eq!(list_len("/orders/customer/LUIS").await, 1);

    let req = TestRequest::get().uri("/orders/statistics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let stats: OrderStatistics = test::read_body_json(resp).await;
    assert_eq!(
        stats,
        OrderStatistics {
            total_orders: 3,
            confirmed_orders: 2,
            rejected_orders: 1,
            pending_orders: 0,
            total_sales: dec!(8.0),
        }
    );

    let req = TestRequest::delete().uri("/orders").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(list_len("/orders").await, 0);

    let req = TestRequest::post()
        .uri("/orders")
        .set_json(order_body("Latte", "small", None))
        .to_request();
    let created: Order = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(created.id, 1);
}

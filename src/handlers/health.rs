use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Health {
    status: &'static str,
    service: &'static str,
    total_orders: usize,
    confirmed_orders: usize,
    rejected_orders: usize,
}

pub async fn health(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let stats = state.orders.get_statistics().await?;
    Ok(HttpResponse::Ok().json(Health {
        status: "healthy",
        service: "orders-api",
        total_orders: stats.total_orders,
        confirmed_orders: stats.confirmed_orders,
        rejected_orders: stats.rejected_orders,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_service::HttpBeverageCatalog;
    use crate::order_service::OrderService;
    use crate::repositories::in_memory::InMemoryOrderRepository;
    use actix_web::{test, App};
    use std::time::Duration;

    #[actix_web::test]
    async fn health_reports_empty_store() {
        let catalog = HttpBeverageCatalog::new(
            url::Url::parse("http://127.0.0.1:1/").unwrap(),
            Duration::from_millis(100),
        )
        .unwrap();
        let state = AppState::new(OrderService::new(
            InMemoryOrderRepository::default(),
            catalog,
        ));
        let app = test::init_service(
            App::new()
                .app_data(state)
                .route("/health", web::get().to(health)),
        )
        .await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["totalOrders"], 0);
    }
}

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::entities::order::NewOrder;
use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub customer: Option<String>,
}

pub async fn create_order(
    state: web::Data<AppState>,
    payload: web::Json<NewOrder>,
) -> Result<HttpResponse, ApiError> {
    let created = state.orders.create_order(payload.into_inner()).await?;
    info!(order_id = created.id, status = %created.status, "order created");
    Ok(HttpResponse::Created().json(created))
}

/// A non-empty `status` filter takes precedence over `customer`.
pub async fn list_orders(
    state: web::Data<AppState>,
    q: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let status = q.status.as_deref().filter(|s| !s.is_empty());
    let customer = q.customer.as_deref().filter(|c| !c.is_empty());
    let items = match (status, customer) {
        (Some(status), _) => state.orders.get_orders_by_status(status).await?,
        (None, Some(customer)) => state.orders.get_orders_by_customer(customer).await?,
        (None, None) => state.orders.get_all_orders().await?,
    };
    Ok(HttpResponse::Ok().json(items))
}

pub async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let order = state
        .orders
        .get_order_by_id(id)
        .await?
        .ok_or(ApiError::OrderNotFound(id))?;
    Ok(HttpResponse::Ok().json(order))
}

pub async fn orders_by_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let items = state.orders.get_orders_by_status(&path).await?;
    Ok(HttpResponse::Ok().json(items))
}

pub async fn orders_by_customer(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let items = state.orders.get_orders_by_customer(&path).await?;
    Ok(HttpResponse::Ok().json(items))
}

pub async fn statistics(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let stats = state.orders.get_statistics().await?;
    Ok(HttpResponse::Ok().json(stats))
}

pub async fn clear_orders(state: web::Data<AppState>) -> HttpResponse {
    state.orders.clear_orders().await;
    HttpResponse::NoContent().finish()
}

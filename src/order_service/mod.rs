use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{field, info, instrument, warn, Span};

use crate::catalog_service::BeverageCatalog;
use crate::entities::order::{NewOrder, Order, OrderSize, OrderStatus, REJECTION_REASON};
use crate::errors::{OrderError, RepoErr, ValidationError};
use crate::repositories::{ListOrdersQuery, OrderRepository};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatistics {
    pub total_orders: usize,
    pub confirmed_orders: usize,
    pub rejected_orders: usize,
    /// Always zero today: orders are resolved before they are stored.
    pub pending_orders: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sales: Decimal,
}

#[derive(Clone)]
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
    catalog: Arc<dyn BeverageCatalog>,
}

impl OrderService {
    pub fn new<R, C>(repo: R, catalog: C) -> Self
    where
        R: OrderRepository + 'static,
        C: BeverageCatalog + 'static,
    {
        Self {
            repo: Arc::new(repo),
            catalog: Arc::new(catalog),
        }
    }

    /// Validates the request, checks the catalog and stores the resolved order.
    ///
    /// An unknown beverage still leaves a `REJECTED` order in the store even
    /// though the call returns [`OrderError::BeverageNotFound`]. A catalog that
    /// cannot be reached leaves the store untouched. The identifier is assigned
    /// by the store on append, so store order and id order always agree.
    #[instrument(
        name = "create_order",
        skip(self, new),
        fields(beverage = %new.beverage_name, size = field::Empty)
    )]
    pub async fn create_order(&self, new: NewOrder) -> Result<Order, OrderError> {
        let size = validate(&new)?;
        Span::current().record("size", size.as_str());
        let NewOrder {
            beverage_name,
            customer_name,
            ..
        } = new;

        let mut order = Order::new(beverage_name.trim().to_string(), size, customer_name);

        if !self.catalog.exists(&beverage_name).await? {
            order.reject(REJECTION_REASON)?;
            let rejected = self.repo.append(order).await?;
            warn!(order_id = rejected.id, "order rejected: beverage not on the menu");
            return Err(OrderError::BeverageNotFound(beverage_name));
        }

        let price = match self.catalog.lookup(&beverage_name).await {
            Ok(beverage) => beverage.map(|b| b.price),
            Err(e) => {
                warn!(err = %e, "price lookup failed; confirming without a price");
                None
            }
        };

        order.confirm(price)?;
        let confirmed = self.repo.append(order).await?;
        info!(order_id = confirmed.id, price = ?confirmed.price, "order confirmed");
        Ok(confirmed)
    }

    pub async fn get_all_orders(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.repo.list(ListOrdersQuery::default()).await?)
    }

    pub async fn get_order_by_id(&self, id: u64) -> Result<Option<Order>, OrderError> {
        match self.repo.get_by_id(id).await {
            Ok(order) => Ok(Some(order)),
            Err(RepoErr::NotFound) => Ok(None),
        }
    }

    /// Case-insensitive; an unknown status name matches nothing.
    pub async fn get_orders_by_status(&self, status: &str) -> Result<Vec<Order>, OrderError> {
        let Some(status) = OrderStatus::parse(status) else {
            return Ok(Vec::new());
        };
        Ok(self.repo.list(ListOrdersQuery::by_status(status)).await?)
    }

    pub async fn get_orders_by_customer(&self, name: &str) -> Result<Vec<Order>, OrderError> {
        Ok(self.repo.list(ListOrdersQuery::by_customer(name)).await?)
    }

    pub async fn count_orders_by_status(&self, status: &str) -> Result<usize, OrderError> {
        Ok(self.get_orders_by_status(status).await?.len())
    }

    pub async fn calculate_total_sales(&self) -> Result<Decimal, OrderError> {
        Ok(total_sales(&self.get_all_orders().await?))
    }

    pub async fn get_statistics(&self) -> Result<OrderStatistics, OrderError> {
        let orders = self.get_all_orders().await?;
        Ok(OrderStatistics {
            total_orders: orders.len(),
            confirmed_orders: orders.iter().filter(|o| o.is_confirmed()).count(),
            rejected_orders: orders.iter().filter(|o| o.is_rejected()).count(),
            pending_orders: orders.iter().filter(|o| o.is_pending()).count(),
            total_sales: total_sales(&orders),
        })
    }

    pub async fn clear_orders(&self) {
        self.repo.clear().await;
        warn!("all orders cleared");
    }
}

fn validate(new: &NewOrder) -> Result<OrderSize, ValidationError> {
    if new.beverage_name.trim().is_empty() {
        return Err(ValidationError::EmptyBeverageName);
    }
    let size = new.size.parse::<OrderSize>()?;
    if new
        .customer_name
        .as_deref()
        .is_some_and(|c| c.trim().is_empty())
    {
        return Err(ValidationError::BlankCustomerName);
    }
    Ok(size)
}

fn total_sales(orders: &[Order]) -> Decimal {
    orders
        .iter()
        .filter(|o| o.is_confirmed())
        .filter_map(|o| o.price)
        .sum()
}

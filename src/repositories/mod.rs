pub mod in_memory;

use async_trait::async_trait;

use crate::{
    entities::order::{Order, OrderStatus},
    errors::RepoErr,
};

#[derive(Debug, Clone, Default)]
pub struct ListOrdersQuery {
    pub status: Option<OrderStatus>,
    /// Matched case-insensitively against the whole customer name.
    pub customer: Option<String>,
}

impl ListOrdersQuery {
    pub fn by_status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            customer: None,
        }
    }

    pub fn by_customer(customer: impl Into<String>) -> Self {
        Self {
            status: None,
            customer: Some(customer.into()),
        }
    }

    pub fn matches(&self, order: &Order) -> bool {
        let status_ok = self.status.map_or(true, |s| order.status == s);
        let customer_ok = self.customer.as_deref().map_or(true, |c| {
            order
                .customer_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase() == c.to_lowercase())
        });
        status_ok && customer_ok
    }
}

/// Append-only order store with its own identifier generator.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Stamps the next identifier onto `order` and stores it, as one step.
    /// Identifiers are never handed out twice until `clear`.
    async fn append(&self, order: Order) -> Result<Order, RepoErr>;
    async fn get_by_id(&self, id: u64) -> Result<Order, RepoErr>;
    /// Snapshot in creation order.
    async fn list(&self, q: ListOrdersQuery) -> Result<Vec<Order>, RepoErr>;
    /// Empties the store and restarts identifiers at the first value.
    async fn clear(&self);
}

use crate::entities::order::Order;
use crate::errors::RepoErr;
use crate::repositories::{ListOrdersQuery, OrderRepository};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const FIRST_ID: u64 = 1;

struct Store {
    orders: Vec<Order>,
    next_id: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            orders: Vec::new(),
            next_id: FIRST_ID,
        }
    }
}

#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    inner: Arc<RwLock<Store>>,
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn append(&self, mut order: Order) -> Result<Order, RepoErr> {
        let mut store = self.inner.write().await;
        order.id = store.next_id;
        store.next_id += 1;
        store.orders.push(order.clone());
        Ok(order)
    }

    async fn get_by_id(&self, id: u64) -> Result<Order, RepoErr> {
        let store = self.inner.read().await;
        store
            .orders
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or(RepoErr::NotFound)
    }

    async fn list(&self, q: ListOrdersQuery) -> Result<Vec<Order>, RepoErr> {
        let store = self.inner.read().await;
        Ok(store
            .orders
            .iter()
            .filter(|o| q.matches(o))
            .cloned()
            .collect())
    }

    async fn clear(&self) {
        let mut store = self.inner.write().await;
        *store = Store::default();
    }
}

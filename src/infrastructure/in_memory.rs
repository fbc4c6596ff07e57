use crate::domain::order::{GatewayId, Order, OrderId};
use crate::domain::ports::OrderStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory order store.
///
/// Stands in for the host commerce system's persistence. `Clone` shares
/// the underlying map, so the CLI can hand one boxed handle to the
/// adapter and keep another to read the final order states.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    next_id: OrderId,
    orders: HashMap<OrderId, Order>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, gateway: GatewayId, purchase_key: &str) -> Result<Order> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let order = Order::pending(inner.next_id, gateway, purchase_key);
        inner.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>> {
        let inner = self.inner.read().await;
        Ok(inner.orders.get(&id).cloned())
    }

    async fn store(&self, order: Order) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.orders.insert(order.id, order);
        Ok(())
    }

    async fn all_orders(&self) -> Result<Vec<Order>> {
        let inner = self.inner.read().await;
        let mut orders: Vec<Order> = inner.orders.values().cloned().collect();
        orders.sort_by_key(|order| order.id);
        Ok(orders)
    }
}

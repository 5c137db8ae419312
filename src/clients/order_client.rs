use crate::clients::{ApiClient, OrderService, ServiceError};
use crate::context::Context;
use crate::model::{Order, OrderCreate, PetId};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// HTTP client for the store (order) endpoints.
#[derive(Debug, Clone)]
pub struct OrderClient {
    inner: ApiClient,
}

impl OrderClient {
    pub fn new(inner: ApiClient) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &ApiClient {
        &self.inner
    }

    /// Posts an arbitrary create payload, e.g. one carrying a quantity.
    #[instrument(skip(self, ctx))]
    pub async fn create_order(
        &self,
        ctx: &Context,
        payload: &OrderCreate,
    ) -> Result<Order, ServiceError> {
        debug!(?payload, "create_order called");
        let order: Order = self.inner.post_json(ctx, "/store/order", payload).await?;
        info!(order_id = order.id, "Order created");
        Ok(order)
    }
}

#[async_trait]
impl OrderService for OrderClient {
    async fn place_order(&self, ctx: &Context, pet_id: PetId) -> Result<Order, ServiceError> {
        self.create_order(ctx, &OrderCreate::for_pet(pet_id)).await
    }
}

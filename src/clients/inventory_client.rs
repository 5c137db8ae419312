use crate::clients::{ApiClient, InventoryService, ServiceError};
use crate::context::Context;
use crate::model::{Pet, PetId};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// HTTP client for the inventory (pet) endpoints.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    inner: ApiClient,
}

impl InventoryClient {
    pub fn new(inner: ApiClient) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &ApiClient {
        &self.inner
    }
}

#[async_trait]
impl InventoryService for InventoryClient {
    #[instrument(skip(self, ctx))]
    async fn get_pet(&self, ctx: &Context, pet_id: PetId) -> Result<Pet, ServiceError> {
        debug!("Sending request");
        let pet: Pet = self.inner.get_json(ctx, &format!("/pet/{pet_id}")).await?;
        debug!(?pet, "Pet fetched");
        Ok(pet)
    }
}

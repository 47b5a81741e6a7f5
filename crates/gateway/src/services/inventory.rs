use common::types::InventoryDto;
use tracing::{info, instrument};

use super::validation;
use crate::{client::InventoryClient, errors::GatewayError};

#[derive(Clone, Debug)]
pub struct InventoryService {
    client: InventoryClient,
}

impl InventoryService {
    pub fn new(client: InventoryClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<InventoryDto>, GatewayError> {
        self.client.list().await
    }

    pub async fn get(&self, id: i32) -> Result<InventoryDto, GatewayError> {
        self.client.get(id).await
    }

    pub async fn by_product(&self, product_id: i32) -> Result<Vec<InventoryDto>, GatewayError> {
        self.client.by_product(product_id).await
    }

    pub async fn by_product_name(&self, name: &str) -> Result<Vec<InventoryDto>, GatewayError> {
        validation::require_text(name, "Product name cannot be null or empty")?;
        self.client.by_product_name(name).await
    }

    pub async fn by_location(&self, location: &str) -> Result<Vec<InventoryDto>, GatewayError> {
        validation::require_text(location, "Location cannot be null or empty")?;
        self.client.by_location(location).await
    }

    pub async fn quantity_less_than(&self, quantity: i32) -> Result<Vec<InventoryDto>, GatewayError> {
        self.client.quantity_less_than(quantity).await
    }

    pub async fn quantity_greater_than(&self, quantity: i32) -> Result<Vec<InventoryDto>, GatewayError> {
        self.client.quantity_greater_than(quantity).await
    }

    pub async fn quantity_range(&self, min: i32, max: i32) -> Result<Vec<InventoryDto>, GatewayError> {
        validation::quantity_range(min, max)?;
        self.client.quantity_range(min, max).await
    }

    pub async fn by_category(&self, category_id: i32) -> Result<Vec<InventoryDto>, GatewayError> {
        self.client.by_category(category_id).await
    }

    pub async fn out_of_stock(&self) -> Result<Vec<InventoryDto>, GatewayError> {
        self.client.out_of_stock().await
    }

    #[instrument(skip(self, input), fields(product_id = ?input.product_id()))]
    pub async fn create(&self, input: &InventoryDto) -> Result<InventoryDto, GatewayError> {
        validation::inventory(input)?;
        let created = self.client.create(input).await?;
        info!(id = ?created.id, "inventory created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: &InventoryDto) -> Result<InventoryDto, GatewayError> {
        validation::inventory(input)?;
        self.client.update(id, input).await
    }

    #[instrument(skip(self))]
    pub async fn set_quantity(&self, id: i32, quantity: i32) -> Result<InventoryDto, GatewayError> {
        validation::quantity(quantity)?;
        self.client.set_quantity(id, quantity).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), GatewayError> {
        self.client.delete(id).await?;
        info!("inventory deleted");
        Ok(())
    }
}

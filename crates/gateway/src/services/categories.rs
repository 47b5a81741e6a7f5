use common::types::CategoryDto;
use tracing::{info, instrument};

use super::validation;
use crate::{client::CategoryClient, errors::GatewayError};

#[derive(Clone, Debug)]
pub struct CategoryService {
    client: CategoryClient,
}

impl CategoryService {
    pub fn new(client: CategoryClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<CategoryDto>, GatewayError> {
        self.client.list().await
    }

    pub async fn get(&self, id: i32) -> Result<CategoryDto, GatewayError> {
        self.client.get(id).await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<CategoryDto, GatewayError> {
        validation::require_text(name, "Category name cannot be null or empty")?;
        self.client.get_by_name(name).await
    }

    pub async fn search(&self, name: &str) -> Result<Vec<CategoryDto>, GatewayError> {
        validation::require_text(name, "Search name cannot be empty")?;
        self.client.search(name).await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: &CategoryDto) -> Result<CategoryDto, GatewayError> {
        validation::category(input)?;
        let created = self.client.create(input).await?;
        info!(id = ?created.id, "category created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: &CategoryDto) -> Result<CategoryDto, GatewayError> {
        validation::category(input)?;
        self.client.update(id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), GatewayError> {
        self.client.delete(id).await?;
        info!("category deleted");
        Ok(())
    }
}

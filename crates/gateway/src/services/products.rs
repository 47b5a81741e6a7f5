use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use common::types::{InventoryDto, ProductDetails, ProductDto};
use rust_decimal::Decimal;
use tracing::{info, instrument};

use super::validation;
use crate::{
    client::{InventoryClient, ProductClient},
    errors::GatewayError,
};

#[derive(Clone, Debug)]
pub struct ProductService {
    client: ProductClient,
    inventory: InventoryClient,
    low_stock_threshold: i64,
}

impl ProductService {
    pub fn new(client: ProductClient, inventory: InventoryClient, low_stock_threshold: i64) -> Self {
        Self { client, inventory, low_stock_threshold }
    }

    pub async fn list(&self) -> Result<Vec<ProductDto>, GatewayError> {
        self.client.list().await
    }

    pub async fn get(&self, id: i32) -> Result<ProductDto, GatewayError> {
        self.client.get(id).await
    }

    pub async fn search(&self, name: &str) -> Result<Vec<ProductDto>, GatewayError> {
        validation::require_text(name, "Search name cannot be empty")?;
        self.client.search(name).await
    }

    pub async fn by_category(&self, category_id: i32) -> Result<Vec<ProductDto>, GatewayError> {
        self.client.by_category(category_id).await
    }

    pub async fn by_category_name(&self, name: &str) -> Result<Vec<ProductDto>, GatewayError> {
        validation::require_text(name, "Category name cannot be null or empty")?;
        self.client.by_category_name(name).await
    }

    pub async fn by_max_price(&self, max: Decimal) -> Result<Vec<ProductDto>, GatewayError> {
        self.client.by_max_price(max).await
    }

    pub async fn by_min_price(&self, min: Decimal) -> Result<Vec<ProductDto>, GatewayError> {
        self.client.by_min_price(min).await
    }

    pub async fn by_price_range(&self, min: Decimal, max: Decimal) -> Result<Vec<ProductDto>, GatewayError> {
        validation::price_range(min, max)?;
        self.client.by_price_range(min, max).await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: &ProductDto) -> Result<ProductDto, GatewayError> {
        validation::product(input)?;
        let created = self.client.create(input).await?;
        info!(id = ?created.id, "product created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: &ProductDto) -> Result<ProductDto, GatewayError> {
        validation::product(input)?;
        self.client.update(id, input).await
    }

    #[instrument(skip(self))]
    pub async fn assign_category(&self, id: i32, category_id: i32) -> Result<ProductDto, GatewayError> {
        self.client.assign_category(id, category_id).await
    }

    #[instrument(skip(self))]
    pub async fn remove_category(&self, id: i32) -> Result<ProductDto, GatewayError> {
        self.client.remove_category(id).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), GatewayError> {
        self.client.delete(id).await?;
        info!("product deleted");
        Ok(())
    }

    /// Product plus a summary of its stock across all locations.
    #[instrument(skip(self))]
    pub async fn details(&self, id: i32) -> Result<ProductDetails, GatewayError> {
        let product = self.client.get(id).await?;
        let stock = self.inventory.by_product(id).await?;
        Ok(summarize(product, &stock, self.low_stock_threshold, Utc::now()))
    }
}

pub fn summarize(
    product: ProductDto,
    stock: &[InventoryDto],
    low_stock_threshold: i64,
    now: DateTime<Utc>,
) -> ProductDetails {
    let stock_quantity: i64 = stock.iter().filter_map(|i| i.quantity).map(i64::from).sum();
    let locations: BTreeSet<&str> = stock
        .iter()
        .filter_map(|i| i.location.as_deref())
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let location = if locations.is_empty() {
        None
    } else {
        Some(locations.into_iter().collect::<Vec<_>>().join(", "))
    };

    ProductDetails {
        id: product.id,
        name: product.name,
        description: product.description,
        price: product.price,
        category: product.category,
        stock_quantity,
        is_low_stock: stock_quantity < low_stock_threshold,
        location,
        last_updated: now,
    }
}

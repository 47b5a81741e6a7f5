use common::types::InventoryDto;
use reqwest::Method;

use super::DataServiceClient;
use crate::errors::GatewayError;

const BASE: [&str; 2] = ["data", "inventory"];

/// `/data/inventory` endpoints.
#[derive(Clone, Debug)]
pub struct InventoryClient {
    inner: DataServiceClient,
}

impl InventoryClient {
    pub fn new(inner: DataServiceClient) -> Self {
        Self { inner }
    }

    fn path<'a>(rest: &[&'a str]) -> Vec<&'a str> {
        BASE.iter().copied().chain(rest.iter().copied()).collect()
    }

    pub async fn list(&self) -> Result<Vec<InventoryDto>, GatewayError> {
        self.inner.get_list(&BASE, &[]).await
    }

    pub async fn get(&self, id: i32) -> Result<InventoryDto, GatewayError> {
        let id = id.to_string();
        self.inner.get_one(&Self::path(&[id.as_str()])).await
    }

    pub async fn by_product(&self, product_id: i32) -> Result<Vec<InventoryDto>, GatewayError> {
        let id = product_id.to_string();
        self.inner.get_list(&Self::path(&["product", id.as_str()]), &[]).await
    }

    pub async fn by_product_name(&self, name: &str) -> Result<Vec<InventoryDto>, GatewayError> {
        self.inner.get_list(&Self::path(&["product", "name", name]), &[]).await
    }

    pub async fn by_location(&self, location: &str) -> Result<Vec<InventoryDto>, GatewayError> {
        self.inner.get_list(&Self::path(&["location", location]), &[]).await
    }

    pub async fn quantity_less_than(&self, quantity: i32) -> Result<Vec<InventoryDto>, GatewayError> {
        let q = quantity.to_string();
        self.inner.get_list(&Self::path(&["quantity", "less", q.as_str()]), &[]).await
    }

    pub async fn quantity_greater_than(&self, quantity: i32) -> Result<Vec<InventoryDto>, GatewayError> {
        let q = quantity.to_string();
        self.inner.get_list(&Self::path(&["quantity", "greater", q.as_str()]), &[]).await
    }

    pub async fn quantity_range(&self, min: i32, max: i32) -> Result<Vec<InventoryDto>, GatewayError> {
        self.inner
            .get_list(
                &Self::path(&["quantity", "range"]),
                &[("minQuantity", min.to_string()), ("maxQuantity", max.to_string())],
            )
            .await
    }

    pub async fn by_category(&self, category_id: i32) -> Result<Vec<InventoryDto>, GatewayError> {
        let id = category_id.to_string();
        self.inner.get_list(&Self::path(&["category", id.as_str()]), &[]).await
    }

    pub async fn out_of_stock(&self) -> Result<Vec<InventoryDto>, GatewayError> {
        self.inner.get_list(&Self::path(&["out-of-stock"]), &[]).await
    }

    pub async fn create(&self, input: &InventoryDto) -> Result<InventoryDto, GatewayError> {
        self.inner.send_one(Method::POST, &BASE, Some(input)).await
    }

    pub async fn update(&self, id: i32, input: &InventoryDto) -> Result<InventoryDto, GatewayError> {
        let id = id.to_string();
        self.inner.send_one(Method::PUT, &Self::path(&[id.as_str()]), Some(input)).await
    }

    pub async fn set_quantity(&self, id: i32, quantity: i32) -> Result<InventoryDto, GatewayError> {
        let (id, q) = (id.to_string(), quantity.to_string());
        self.inner
            .send_one::<_, ()>(Method::PATCH, &Self::path(&[id.as_str(), "quantity", q.as_str()]), None)
            .await
    }

    pub async fn delete(&self, id: i32) -> Result<(), GatewayError> {
        let id = id.to_string();
        self.inner.delete(&Self::path(&[id.as_str()])).await
    }
}

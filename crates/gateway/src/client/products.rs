use common::types::ProductDto;
use reqwest::Method;
use rust_decimal::Decimal;

use super::DataServiceClient;
use crate::errors::GatewayError;

const BASE: [&str; 2] = ["data", "products"];

/// `/data/products` endpoints.
#[derive(Clone, Debug)]
pub struct ProductClient {
    inner: DataServiceClient,
}

impl ProductClient {
    pub fn new(inner: DataServiceClient) -> Self {
        Self { inner }
    }

    fn path<'a>(rest: &[&'a str]) -> Vec<&'a str> {
        BASE.iter().copied().chain(rest.iter().copied()).collect()
    }

    pub async fn list(&self) -> Result<Vec<ProductDto>, GatewayError> {
        self.inner.get_list(&BASE, &[]).await
    }

    pub async fn get(&self, id: i32) -> Result<ProductDto, GatewayError> {
        let id = id.to_string();
        self.inner.get_one(&Self::path(&[id.as_str()])).await
    }

    pub async fn search(&self, name: &str) -> Result<Vec<ProductDto>, GatewayError> {
        self.inner
            .get_list(&Self::path(&["search"]), &[("name", name.to_string())])
            .await
    }

    pub async fn by_category(&self, category_id: i32) -> Result<Vec<ProductDto>, GatewayError> {
        let id = category_id.to_string();
        self.inner.get_list(&Self::path(&["category", id.as_str()]), &[]).await
    }

    pub async fn by_category_name(&self, name: &str) -> Result<Vec<ProductDto>, GatewayError> {
        self.inner.get_list(&Self::path(&["category", "name", name]), &[]).await
    }

    pub async fn by_max_price(&self, max: Decimal) -> Result<Vec<ProductDto>, GatewayError> {
        let max = max.to_string();
        self.inner.get_list(&Self::path(&["price", "max", max.as_str()]), &[]).await
    }

    pub async fn by_min_price(&self, min: Decimal) -> Result<Vec<ProductDto>, GatewayError> {
        let min = min.to_string();
        self.inner.get_list(&Self::path(&["price", "min", min.as_str()]), &[]).await
    }

    pub async fn by_price_range(&self, min: Decimal, max: Decimal) -> Result<Vec<ProductDto>, GatewayError> {
        self.inner
            .get_list(
                &Self::path(&["price", "range"]),
                &[("minPrice", min.to_string()), ("maxPrice", max.to_string())],
            )
            .await
    }

    pub async fn create(&self, input: &ProductDto) -> Result<ProductDto, GatewayError> {
        self.inner.send_one(Method::POST, &BASE, Some(input)).await
    }

    pub async fn update(&self, id: i32, input: &ProductDto) -> Result<ProductDto, GatewayError> {
        let id = id.to_string();
        self.inner.send_one(Method::PUT, &Self::path(&[id.as_str()]), Some(input)).await
    }

    pub async fn assign_category(&self, id: i32, category_id: i32) -> Result<ProductDto, GatewayError> {
        let (id, category_id) = (id.to_string(), category_id.to_string());
        self.inner
            .send_one::<_, ()>(Method::PUT, &Self::path(&[id.as_str(), "category", category_id.as_str()]), None)
            .await
    }

    pub async fn remove_category(&self, id: i32) -> Result<ProductDto, GatewayError> {
        let id = id.to_string();
        self.inner
            .send_one::<_, ()>(Method::DELETE, &Self::path(&[id.as_str(), "category"]), None)
            .await
    }

    pub async fn delete(&self, id: i32) -> Result<(), GatewayError> {
        let id = id.to_string();
        self.inner.delete(&Self::path(&[id.as_str()])).await
    }
}

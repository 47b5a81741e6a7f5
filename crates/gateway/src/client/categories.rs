use common::types::CategoryDto;
use reqwest::Method;

use super::DataServiceClient;
use crate::errors::GatewayError;

const BASE: [&str; 2] = ["data", "categories"];

/// `/data/categories` endpoints.
#[derive(Clone, Debug)]
pub struct CategoryClient {
    inner: DataServiceClient,
}

impl CategoryClient {
    pub fn new(inner: DataServiceClient) -> Self {
        Self { inner }
    }

    pub async fn list(&self) -> Result<Vec<CategoryDto>, GatewayError> {
        self.inner.get_list(&BASE, &[]).await
    }

    pub async fn get(&self, id: i32) -> Result<CategoryDto, GatewayError> {
        self.inner.get_one(&[BASE[0], BASE[1], id.to_string().as_str()]).await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<CategoryDto, GatewayError> {
        self.inner.get_one(&[BASE[0], BASE[1], "name", name]).await
    }

    pub async fn search(&self, name: &str) -> Result<Vec<CategoryDto>, GatewayError> {
        self.inner
            .get_list(&[BASE[0], BASE[1], "search"], &[("name", name.to_string())])
            .await
    }

    pub async fn create(&self, input: &CategoryDto) -> Result<CategoryDto, GatewayError> {
        self.inner.send_one(Method::POST, &BASE, Some(input)).await
    }

    pub async fn update(&self, id: i32, input: &CategoryDto) -> Result<CategoryDto, GatewayError> {
        self.inner
            .send_one(Method::PUT, &[BASE[0], BASE[1], id.to_string().as_str()], Some(input))
            .await
    }

    pub async fn delete(&self, id: i32) -> Result<(), GatewayError> {
        self.inner.delete(&[BASE[0], BASE[1], id.to_string().as_str()]).await
    }
}

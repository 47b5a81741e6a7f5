//! Wire contract shared by the data service and the business service.
//!
//! Both tiers serialize and deserialize these records, so a request body sent by
//! the business service is exactly what the data service expects and vice versa.
//! Optional fields are optional on input only; responses always fill them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CategoryDto {
    /// Reference to an existing category, as used inside product requests.
    pub fn reference(id: i32) -> Self {
        Self { id: Some(id), ..Default::default() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "499.99")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub category: Option<CategoryDto>,
}

impl ProductDto {
    /// Reference to an existing product, as used inside inventory requests.
    pub fn reference(id: i32) -> Self {
        Self { id: Some(id), ..Default::default() }
    }

    pub fn category_id(&self) -> Option<i32> {
        self.category.as_ref().and_then(|c| c.id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InventoryDto {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub product: Option<ProductDto>,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub location: Option<String>,
}

impl InventoryDto {
    pub fn product_id(&self) -> Option<i32> {
        self.product.as_ref().and_then(|p| p.id)
    }
}

/// Product enriched with its stock summary, assembled by the business service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    pub id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, example = "499.99")]
    pub price: Option<Decimal>,
    pub category: Option<CategoryDto>,
    pub stock_quantity: i64,
    pub is_low_stock: bool,
    pub location: Option<String>,
    pub last_updated: DateTime<Utc>,
}

/// Uniform error payload returned by both services.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub timestamp: String,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

//! Entity -> wire DTO conversions.

use common::types::{CategoryDto, InventoryDto, ProductDto};
use models::{category, inventory, product};

pub fn category_dto(m: category::Model) -> CategoryDto {
    CategoryDto { id: Some(m.id), name: m.name, description: m.description }
}

pub fn product_dto(p: product::Model, c: Option<category::Model>) -> ProductDto {
    ProductDto {
        id: Some(p.id),
        name: p.name,
        description: p.description,
        price: Some(product::normalize_price(p.price)),
        category: c.map(category_dto),
    }
}

pub fn inventory_dto(i: inventory::Model, p: Option<ProductDto>) -> InventoryDto {
    InventoryDto {
        id: Some(i.id),
        product: p,
        quantity: Some(i.quantity),
        location: Some(i.location),
    }
}

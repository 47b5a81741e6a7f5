//! Checks applied before a request is forwarded to the data service.

use std::collections::BTreeMap;

use common::types::{CategoryDto, InventoryDto, ProductDto};
use rust_decimal::Decimal;

use crate::errors::GatewayError;

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn collect(message: &str, errors: BTreeMap<String, String>) -> Result<(), GatewayError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(GatewayError::BadRequest { message: message.to_string(), errors: Some(errors) })
    }
}

/// Non-blank free-text parameter (search terms, names, locations).
pub fn require_text(value: &str, message: &str) -> Result<(), GatewayError> {
    if blank(value) {
        return Err(GatewayError::bad_request(message));
    }
    Ok(())
}

pub fn category(input: &CategoryDto) -> Result<(), GatewayError> {
    let mut errors = BTreeMap::new();
    if blank(&input.name) {
        errors.insert("name".into(), "Category name is required".into());
    }
    collect("Category validation failed", errors)
}

pub fn product(input: &ProductDto) -> Result<(), GatewayError> {
    let mut errors = BTreeMap::new();
    if blank(&input.name) {
        errors.insert("name".into(), "Product name is required".into());
    }
    match input.price {
        None => {
            errors.insert("price".into(), "Product price is required".into());
        }
        Some(p) if p <= Decimal::ZERO => {
            errors.insert("price".into(), "Product price must be positive".into());
        }
        Some(_) => {}
    }
    collect("Product validation failed", errors)
}

pub fn inventory(input: &InventoryDto) -> Result<(), GatewayError> {
    let mut errors = BTreeMap::new();
    if input.product_id().is_none() {
        errors.insert("product".into(), "Product is required".into());
    }
    match input.quantity {
        None => {
            errors.insert("quantity".into(), "Quantity is required".into());
        }
        Some(q) if q < 0 => {
            errors.insert("quantity".into(), "Quantity cannot be negative".into());
        }
        Some(_) => {}
    }
    if input.location.as_deref().map_or(true, blank) {
        errors.insert("location".into(), "Location is required".into());
    }
    collect("Inventory validation failed", errors)
}

pub fn quantity(q: i32) -> Result<(), GatewayError> {
    if q < 0 {
        return Err(GatewayError::bad_request("Quantity cannot be negative"));
    }
    Ok(())
}

pub fn quantity_range(min: i32, max: i32) -> Result<(), GatewayError> {
    if min > max {
        return Err(GatewayError::bad_request("Min quantity cannot be greater than max quantity"));
    }
    Ok(())
}

pub fn price_range(min: Decimal, max: Decimal) -> Result<(), GatewayError> {
    if min > max {
        return Err(GatewayError::bad_request("Min price cannot be greater than max price"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_errors(e: GatewayError) -> BTreeMap<String, String> {
        match e {
            GatewayError::BadRequest { errors: Some(errors), .. } => errors,
            other => panic!("expected field errors, got {other:?}"),
        }
    }

    #[test]
    fn category_requires_name() {
        let errors = field_errors(category(&CategoryDto { name: "  ".into(), ..Default::default() }).unwrap_err());
        assert_eq!(errors["name"], "Category name is required");
        assert!(category(&CategoryDto { name: "Toys".into(), ..Default::default() }).is_ok());
    }

    #[test]
    fn product_collects_every_field() {
        let errors = field_errors(product(&ProductDto::default()).unwrap_err());
        assert_eq!(errors["name"], "Product name is required");
        assert_eq!(errors["price"], "Product price is required");

        let zero = ProductDto { name: "Pen".into(), price: Some(Decimal::ZERO), ..Default::default() };
        assert_eq!(field_errors(product(&zero).unwrap_err())["price"], "Product price must be positive");
    }

    #[test]
    fn inventory_requires_product_reference() {
        let input = InventoryDto {
            product: Some(ProductDto { name: "no id".into(), ..Default::default() }),
            quantity: Some(-1),
            location: Some(" ".into()),
            ..Default::default()
        };
        let errors = field_errors(inventory(&input).unwrap_err());
        assert_eq!(errors.len(), 3);
        assert_eq!(errors["product"], "Product is required");
        assert_eq!(errors["quantity"], "Quantity cannot be negative");

        let ok = InventoryDto {
            product: Some(ProductDto::reference(1)),
            quantity: Some(0),
            location: Some("A1".into()),
            ..Default::default()
        };
        assert!(inventory(&ok).is_ok());
    }

    #[test]
    fn ranges_and_params() {
        assert!(quantity_range(1, 1).is_ok());
        assert_eq!(quantity_range(5, 1).unwrap_err().status(), axum::http::StatusCode::BAD_REQUEST);
        assert!(price_range(Decimal::new(250, 2), Decimal::ONE).is_err());
        assert!(quantity(-3).is_err());
        assert!(require_text("", "Search name cannot be empty").is_err());
        assert!(require_text("lamp", "Search name cannot be empty").is_ok());
    }
}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors::{FieldErrors, ModelError}, product};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub location: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Product }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Product => Entity::belongs_to(product::Entity)
                .from(Column::ProductId)
                .to(product::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate(quantity: Option<i32>, location: Option<&str>) -> Result<(), ModelError> {
    let mut errors = FieldErrors::default();
    match quantity {
        None => errors.add("quantity", "Quantity is required"),
        Some(q) if q < 0 => errors.add("quantity", "Quantity cannot be negative"),
        Some(_) => {}
    }
    if location.map_or(true, |l| l.trim().is_empty()) {
        errors.add("location", "Location is required");
    }
    errors.into_result("Inventory validation failed")
}

pub fn validate_quantity(quantity: i32) -> Result<(), ModelError> {
    let mut errors = FieldErrors::default();
    if quantity < 0 {
        errors.add("quantity", "Quantity cannot be negative");
    }
    errors.into_result("Quantity cannot be negative")
}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{category, errors::{FieldErrors, ModelError}, inventory};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub price: Decimal,
    pub category_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Category, Inventory }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .into(),
            Relation::Inventory => Entity::has_many(inventory::Entity).into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate(name: &str, price: Option<Decimal>) -> Result<(), ModelError> {
    let mut errors = FieldErrors::default();
    if name.trim().is_empty() {
        errors.add("name", "Product name is required");
    }
    match price {
        None => errors.add("price", "Product price is required"),
        Some(p) if p <= Decimal::ZERO => errors.add("price", "Product price must be positive"),
        Some(_) => {}
    }
    errors.into_result("Product validation failed")
}

/// Prices are stored with two decimal places.
pub fn normalize_price(price: Decimal) -> Decimal {
    let mut p = price;
    p.rescale(2);
    p
}

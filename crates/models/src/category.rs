use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors::{FieldErrors, ModelError}, product};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Product }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Product => Entity::has_many(product::Entity).into(),
        }
    }
}

impl Related<product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate(name: &str) -> Result<(), ModelError> {
    let mut errors = FieldErrors::default();
    if name.trim().is_empty() {
        errors.add("name", "Category name is required");
    }
    errors.into_result("Category validation failed")
}

use std::collections::HashMap;

use common::types::InventoryDto;
use models::{category, inventory::{self, Entity as InventoryEntity}, product};
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Select, SelectTwo, Set,
};
use tracing::{info, instrument};

use crate::dto::{inventory_dto, product_dto};
use crate::errors::{db_err, ServiceError};
use crate::product_service::find_product;

fn with_product(select: Select<InventoryEntity>) -> SelectTwo<InventoryEntity, product::Entity> {
    select
        .find_also_related(product::Entity)
        .order_by_asc(inventory::Column::Id)
}

/// Loads rows with their product, then the products' categories in one query.
async fn fetch(
    db: &DatabaseConnection,
    select: SelectTwo<InventoryEntity, product::Entity>,
) -> Result<Vec<InventoryDto>, ServiceError> {
    let rows = select.all(db).await.map_err(db_err)?;
    let category_ids: Vec<i32> = rows
        .iter()
        .filter_map(|(_, p)| p.as_ref().and_then(|p| p.category_id))
        .collect();
    let categories: HashMap<i32, category::Model> = if category_ids.is_empty() {
        HashMap::new()
    } else {
        category::Entity::find()
            .filter(category::Column::Id.is_in(category_ids))
            .all(db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|c| (c.id, c))
            .collect()
    };
    Ok(rows
        .into_iter()
        .map(|(i, p)| {
            let p = p.map(|p| {
                let c = p.category_id.and_then(|cid| categories.get(&cid).cloned());
                product_dto(p, c)
            });
            inventory_dto(i, p)
        })
        .collect())
}

async fn fetch_one(db: &DatabaseConnection, id: i32) -> Result<InventoryDto, ServiceError> {
    fetch(db, with_product(InventoryEntity::find_by_id(id)))
        .await?
        .pop()
        .ok_or_else(|| ServiceError::not_found("Inventory", "id", id))
}

async fn find_inventory(db: &DatabaseConnection, id: i32) -> Result<inventory::Model, ServiceError> {
    InventoryEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("Inventory", "id", id))
}

pub async fn list_inventory(db: &DatabaseConnection) -> Result<Vec<InventoryDto>, ServiceError> {
    fetch(db, with_product(InventoryEntity::find())).await
}

pub async fn get_inventory(db: &DatabaseConnection, id: i32) -> Result<InventoryDto, ServiceError> {
    fetch_one(db, id).await
}

pub async fn inventory_by_product(db: &DatabaseConnection, product_id: i32) -> Result<Vec<InventoryDto>, ServiceError> {
    find_product(db, product_id).await?;
    let select = with_product(InventoryEntity::find())
        .filter(inventory::Column::ProductId.eq(product_id));
    fetch(db, select).await
}

/// Substring match on the product name, ignoring case.
pub async fn inventory_by_product_name(db: &DatabaseConnection, name: &str) -> Result<Vec<InventoryDto>, ServiceError> {
    let pattern = format!("%{}%", name.trim().to_lowercase());
    let select = with_product(InventoryEntity::find()).filter(
        Expr::expr(Func::lower(Expr::col((product::Entity, product::Column::Name)))).like(pattern),
    );
    fetch(db, select).await
}

/// Exact location match, ignoring case.
pub async fn inventory_by_location(db: &DatabaseConnection, location: &str) -> Result<Vec<InventoryDto>, ServiceError> {
    let select = with_product(InventoryEntity::find()).filter(
        Expr::expr(Func::lower(Expr::col((InventoryEntity, inventory::Column::Location))))
            .eq(location.trim().to_lowercase()),
    );
    fetch(db, select).await
}

pub async fn inventory_quantity_less_than(db: &DatabaseConnection, quantity: i32) -> Result<Vec<InventoryDto>, ServiceError> {
    let select = with_product(InventoryEntity::find()).filter(inventory::Column::Quantity.lt(quantity));
    fetch(db, select).await
}

pub async fn inventory_quantity_greater_than(db: &DatabaseConnection, quantity: i32) -> Result<Vec<InventoryDto>, ServiceError> {
    let select = with_product(InventoryEntity::find()).filter(inventory::Column::Quantity.gt(quantity));
    fetch(db, select).await
}

/// Inclusive quantity range.
pub async fn inventory_quantity_range(
    db: &DatabaseConnection,
    min: i32,
    max: i32,
) -> Result<Vec<InventoryDto>, ServiceError> {
    if min > max {
        return Err(ServiceError::Validation("minQuantity must not be greater than maxQuantity".into()));
    }
    let select = with_product(InventoryEntity::find())
        .filter(inventory::Column::Quantity.between(min, max));
    fetch(db, select).await
}

/// Rows whose product belongs to the category.
pub async fn inventory_by_category(db: &DatabaseConnection, category_id: i32) -> Result<Vec<InventoryDto>, ServiceError> {
    let select = with_product(InventoryEntity::find())
        .filter(product::Column::CategoryId.eq(category_id));
    fetch(db, select).await
}

pub async fn out_of_stock(db: &DatabaseConnection) -> Result<Vec<InventoryDto>, ServiceError> {
    let select = with_product(InventoryEntity::find()).filter(inventory::Column::Quantity.eq(0));
    fetch(db, select).await
}

#[instrument(skip(db, input), fields(product_id = ?input.product_id()))]
pub async fn create_inventory(db: &DatabaseConnection, input: &InventoryDto) -> Result<InventoryDto, ServiceError> {
    let Some(product_id) = input.product_id() else {
        let mut errors = std::collections::BTreeMap::new();
        errors.insert("product".to_string(), "Product is required".to_string());
        return Err(models::errors::ModelError::InvalidFields {
            message: "Product is required for inventory item".into(),
            errors,
        }
        .into());
    };
    inventory::validate(input.quantity, input.location.as_deref())?;
    find_product(db, product_id).await?;
    let am = inventory::ActiveModel {
        id: NotSet,
        product_id: Set(product_id),
        quantity: Set(input.quantity.unwrap_or_default()),
        location: Set(input.location.clone().unwrap_or_default().trim().to_string()),
    };
    let created = am.insert(db).await.map_err(db_err)?;
    info!(inventory_id = created.id, product_id, "inventory_created");
    fetch_one(db, created.id).await
}

/// Replaces quantity and location; the product changes only when a different id is given.
#[instrument(skip(db, input))]
pub async fn update_inventory(
    db: &DatabaseConnection,
    id: i32,
    input: &InventoryDto,
) -> Result<InventoryDto, ServiceError> {
    let existing = find_inventory(db, id).await?;
    inventory::validate(input.quantity, input.location.as_deref())?;
    let mut am: inventory::ActiveModel = existing.clone().into();
    if let Some(pid) = input.product_id() {
        if pid != existing.product_id {
            find_product(db, pid).await?;
            am.product_id = Set(pid);
        }
    }
    am.quantity = Set(input.quantity.unwrap_or_default());
    am.location = Set(input.location.clone().unwrap_or_default().trim().to_string());
    am.update(db).await.map_err(db_err)?;
    fetch_one(db, id).await
}

#[instrument(skip(db))]
pub async fn set_quantity(db: &DatabaseConnection, id: i32, quantity: i32) -> Result<InventoryDto, ServiceError> {
    let existing = find_inventory(db, id).await?;
    inventory::validate_quantity(quantity)?;
    let mut am: inventory::ActiveModel = existing.into();
    am.quantity = Set(quantity);
    am.update(db).await.map_err(db_err)?;
    fetch_one(db, id).await
}

#[instrument(skip(db))]
pub async fn delete_inventory(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    find_inventory(db, id).await?;
    InventoryEntity::delete_by_id(id).exec(db).await.map_err(db_err)?;
    info!(inventory_id = id, "inventory_deleted");
    Ok(())
}

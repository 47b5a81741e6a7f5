use common::types::ProductDto;
use models::{category, inventory, product::{self, Entity as ProductEntity}};
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::{Expr, Func, SimpleExpr},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Select, SelectTwo, Set, TransactionTrait,
};
use tracing::{info, instrument};

use crate::category_service::find_category;
use crate::dto::product_dto;
use crate::errors::{db_err, ServiceError};
use crate::pattern::contains_ignore_case;

fn with_category(select: Select<ProductEntity>) -> SelectTwo<ProductEntity, category::Entity> {
    select
        .find_also_related(category::Entity)
        .order_by_asc(product::Column::Id)
}

async fn fetch(
    db: &DatabaseConnection,
    select: SelectTwo<ProductEntity, category::Entity>,
) -> Result<Vec<ProductDto>, ServiceError> {
    let rows = select.all(db).await.map_err(db_err)?;
    Ok(rows.into_iter().map(|(p, c)| product_dto(p, c)).collect())
}

fn lower(col: SimpleExpr) -> Expr {
    Expr::expr(Func::lower(col))
}

pub(crate) async fn find_product(db: &DatabaseConnection, id: i32) -> Result<product::Model, ServiceError> {
    ProductEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("Product", "id", id))
}

async fn load(db: &DatabaseConnection, p: product::Model) -> Result<ProductDto, ServiceError> {
    let c = match p.category_id {
        Some(cid) => category::Entity::find_by_id(cid).one(db).await.map_err(db_err)?,
        None => None,
    };
    Ok(product_dto(p, c))
}

pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<ProductDto>, ServiceError> {
    fetch(db, with_category(ProductEntity::find())).await
}

pub async fn get_product(db: &DatabaseConnection, id: i32) -> Result<ProductDto, ServiceError> {
    let p = find_product(db, id).await?;
    load(db, p).await
}

/// Substring match on product name, ignoring case.
pub async fn search_products(db: &DatabaseConnection, name: &str) -> Result<Vec<ProductDto>, ServiceError> {
    let select = with_category(ProductEntity::find())
        .filter(lower(Expr::col((ProductEntity, product::Column::Name)).into()).like(contains_ignore_case(name)));
    fetch(db, select).await
}

pub async fn products_by_category(db: &DatabaseConnection, category_id: i32) -> Result<Vec<ProductDto>, ServiceError> {
    find_category(db, category_id).await?;
    let select = with_category(ProductEntity::find())
        .filter(product::Column::CategoryId.eq(category_id));
    fetch(db, select).await
}

/// Exact category name match, ignoring case.
pub async fn products_by_category_name(db: &DatabaseConnection, name: &str) -> Result<Vec<ProductDto>, ServiceError> {
    let select = with_category(ProductEntity::find()).filter(
        lower(Expr::col((category::Entity, category::Column::Name)).into())
            .eq(name.trim().to_lowercase()),
    );
    fetch(db, select).await
}

pub async fn products_by_max_price(db: &DatabaseConnection, max: Decimal) -> Result<Vec<ProductDto>, ServiceError> {
    let select = with_category(ProductEntity::find()).filter(product::Column::Price.lte(max));
    fetch(db, select).await
}

pub async fn products_by_min_price(db: &DatabaseConnection, min: Decimal) -> Result<Vec<ProductDto>, ServiceError> {
    let select = with_category(ProductEntity::find()).filter(product::Column::Price.gte(min));
    fetch(db, select).await
}

/// Inclusive price range.
pub async fn products_by_price_range(
    db: &DatabaseConnection,
    min: Decimal,
    max: Decimal,
) -> Result<Vec<ProductDto>, ServiceError> {
    if min > max {
        return Err(ServiceError::Validation("minPrice must not be greater than maxPrice".into()));
    }
    let select = with_category(ProductEntity::find())
        .filter(product::Column::Price.between(min, max));
    fetch(db, select).await
}

async fn resolve_category(
    db: &DatabaseConnection,
    input: &ProductDto,
) -> Result<Option<category::Model>, ServiceError> {
    match input.category_id() {
        Some(cid) => Ok(Some(find_category(db, cid).await?)),
        None => Ok(None),
    }
}

#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn create_product(db: &DatabaseConnection, input: &ProductDto) -> Result<ProductDto, ServiceError> {
    product::validate(&input.name, input.price)?;
    let category = resolve_category(db, input).await?;
    let am = product::ActiveModel {
        id: NotSet,
        name: Set(input.name.trim().to_string()),
        description: Set(input.description.clone()),
        price: Set(product::normalize_price(input.price.unwrap_or_default())),
        category_id: Set(category.as_ref().map(|c| c.id)),
    };
    let created = am.insert(db).await.map_err(db_err)?;
    info!(product_id = created.id, "product_created");
    Ok(product_dto(created, category))
}

/// Replaces every field; a request without a category clears it.
#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn update_product(
    db: &DatabaseConnection,
    id: i32,
    input: &ProductDto,
) -> Result<ProductDto, ServiceError> {
    let existing = find_product(db, id).await?;
    product::validate(&input.name, input.price)?;
    let category = resolve_category(db, input).await?;
    let mut am: product::ActiveModel = existing.into();
    am.name = Set(input.name.trim().to_string());
    am.description = Set(input.description.clone());
    am.price = Set(product::normalize_price(input.price.unwrap_or_default()));
    am.category_id = Set(category.as_ref().map(|c| c.id));
    let updated = am.update(db).await.map_err(db_err)?;
    Ok(product_dto(updated, category))
}

#[instrument(skip(db))]
pub async fn assign_category(
    db: &DatabaseConnection,
    id: i32,
    category_id: i32,
) -> Result<ProductDto, ServiceError> {
    let existing = find_product(db, id).await?;
    let category = find_category(db, category_id).await?;
    let mut am: product::ActiveModel = existing.into();
    am.category_id = Set(Some(category.id));
    let updated = am.update(db).await.map_err(db_err)?;
    Ok(product_dto(updated, Some(category)))
}

#[instrument(skip(db))]
pub async fn remove_category(db: &DatabaseConnection, id: i32) -> Result<ProductDto, ServiceError> {
    let existing = find_product(db, id).await?;
    let mut am: product::ActiveModel = existing.into();
    am.category_id = Set(None);
    let updated = am.update(db).await.map_err(db_err)?;
    Ok(product_dto(updated, None))
}

/// Deletes the product and its stock rows in one transaction.
#[instrument(skip(db))]
pub async fn delete_product(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    find_product(db, id).await?;
    let txn = db.begin().await.map_err(db_err)?;
    let stock = inventory::Entity::delete_many()
        .filter(inventory::Column::ProductId.eq(id))
        .exec(&txn)
        .await
        .map_err(db_err)?;
    ProductEntity::delete_by_id(id).exec(&txn).await.map_err(db_err)?;
    txn.commit().await.map_err(db_err)?;
    info!(product_id = id, inventory_rows = stock.rows_affected, "product_deleted");
    Ok(())
}

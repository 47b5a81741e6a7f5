use common::types::CategoryDto;
use models::{category::{self, Entity as CategoryEntity}, product};
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::{info, instrument};

use crate::dto::category_dto;
use crate::errors::{db_err, ServiceError};
use crate::pattern::contains_ignore_case;

fn lower_name() -> sea_orm::sea_query::SimpleExpr {
    Func::lower(Expr::col((CategoryEntity, category::Column::Name))).into()
}

/// Categories ordered by id.
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<CategoryDto>, ServiceError> {
    let rows = CategoryEntity::find()
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(db_err)?;
    Ok(rows.into_iter().map(category_dto).collect())
}

pub(crate) async fn find_category(db: &DatabaseConnection, id: i32) -> Result<category::Model, ServiceError> {
    CategoryEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("Category", "id", id))
}

pub async fn get_category(db: &DatabaseConnection, id: i32) -> Result<CategoryDto, ServiceError> {
    Ok(category_dto(find_category(db, id).await?))
}

async fn find_by_name_ignore_case(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<category::Model>, ServiceError> {
    CategoryEntity::find()
        .filter(Expr::expr(lower_name()).eq(name.trim().to_lowercase()))
        .one(db)
        .await
        .map_err(db_err)
}

/// Exact name match, ignoring case.
pub async fn get_category_by_name(db: &DatabaseConnection, name: &str) -> Result<CategoryDto, ServiceError> {
    find_by_name_ignore_case(db, name)
        .await?
        .map(category_dto)
        .ok_or_else(|| ServiceError::not_found("Category", "name", name))
}

/// Substring match on name, ignoring case.
pub async fn search_categories(db: &DatabaseConnection, name: &str) -> Result<Vec<CategoryDto>, ServiceError> {
    let rows = CategoryEntity::find()
        .filter(Expr::expr(lower_name()).like(contains_ignore_case(name)))
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(db_err)?;
    Ok(rows.into_iter().map(category_dto).collect())
}

#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn create_category(db: &DatabaseConnection, input: &CategoryDto) -> Result<CategoryDto, ServiceError> {
    category::validate(&input.name)?;
    let name = input.name.trim();
    if find_by_name_ignore_case(db, name).await?.is_some() {
        return Err(ServiceError::duplicate("Category", "name", name));
    }
    let am = category::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        description: Set(input.description.clone()),
    };
    let created = am.insert(db).await.map_err(db_err)?;
    info!(category_id = created.id, "category_created");
    Ok(category_dto(created))
}

/// Replaces name and description; renaming onto another category's name is a conflict.
#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn update_category(
    db: &DatabaseConnection,
    id: i32,
    input: &CategoryDto,
) -> Result<CategoryDto, ServiceError> {
    let existing = find_category(db, id).await?;
    category::validate(&input.name)?;
    let name = input.name.trim();
    if existing.name.to_lowercase() != name.to_lowercase() {
        if let Some(other) = find_by_name_ignore_case(db, name).await? {
            if other.id != id {
                return Err(ServiceError::duplicate("Category", "name", name));
            }
        }
    }
    let mut am: category::ActiveModel = existing.into();
    am.name = Set(name.to_string());
    am.description = Set(input.description.clone());
    let updated = am.update(db).await.map_err(db_err)?;
    Ok(category_dto(updated))
}

/// Deletes the category; its products stay, without a category.
#[instrument(skip(db))]
pub async fn delete_category(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    find_category(db, id).await?;
    let txn = db.begin().await.map_err(db_err)?;
    product::Entity::update_many()
        .col_expr(product::Column::CategoryId, Expr::value(Option::<i32>::None))
        .filter(product::Column::CategoryId.eq(id))
        .exec(&txn)
        .await
        .map_err(db_err)?;
    CategoryEntity::delete_by_id(id).exec(&txn).await.map_err(db_err)?;
    txn.commit().await.map_err(db_err)?;
    info!(category_id = id, "category_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::errors::ModelError;

    fn cat(name: &str) -> CategoryDto {
        CategoryDto { id: None, name: name.into(), description: Some(format!("{name} things")) }
    }

    #[tokio::test]
    async fn category_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let c = create_category(&db, &cat("Electronics")).await?;
        let id = c.id.unwrap();
        let found = get_category(&db, id).await?;
        assert_eq!(found.name, "Electronics");
        assert_eq!(found.description.as_deref(), Some("Electronics things"));

        let by_name = get_category_by_name(&db, "electronics").await?;
        assert_eq!(by_name.id, Some(id));

        let updated = update_category(&db, id, &cat("Gadgets")).await?;
        assert_eq!(updated.name, "Gadgets");

        delete_category(&db, id).await?;
        assert!(matches!(get_category(&db, id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_names_conflict_ignoring_case() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_category(&db, &cat("Books")).await?;
        let dup = create_category(&db, &cat("BOOKS")).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));

        let other = create_category(&db, &cat("Music")).await?;
        let renamed = update_category(&db, other.id.unwrap(), &cat("books")).await;
        assert!(matches!(renamed, Err(ServiceError::Conflict(_))));

        // changing only the case of its own name is fine
        let same = update_category(&db, other.id.unwrap(), &cat("MUSIC")).await?;
        assert_eq!(same.name, "MUSIC");
        Ok(())
    }

    #[tokio::test]
    async fn blank_name_is_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let res = create_category(&db, &cat("  ")).await;
        match res {
            Err(ServiceError::Model(ModelError::InvalidFields { errors, .. })) => {
                assert_eq!(errors.get("name").map(String::as_str), Some("Category name is required"));
            }
            other => panic!("unexpected: {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn search_matches_substring() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_category(&db, &cat("Home Appliances")).await?;
        create_category(&db, &cat("Garden")).await?;
        let hits = search_categories(&db, "APPLI").await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Home Appliances");
        assert!(search_categories(&db, "zzz").await?.is_empty());
        assert_eq!(list_categories(&db).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_category(&db, &cat("Garden")).await?;
        create_category(&db, &cat("Tools")).await?;
        create_category(&db, &cat("50% Off")).await?;

        assert!(search_categories(&db, "_").await?.is_empty());
        let hits = search_categories(&db, "%").await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "50% Off");
        assert_eq!(search_categories(&db, "0% o").await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn renaming_to_own_name_in_other_case_keeps_non_ascii() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let c = create_category(&db, &cat("Électronique")).await?;
        let renamed = update_category(&db, c.id.unwrap(), &cat("éLECTRONIQUE")).await?;
        assert_eq!(renamed.name, "éLECTRONIQUE");
        Ok(())
    }

    #[tokio::test]
    async fn missing_category_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        assert!(matches!(delete_category(&db, 42).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(
            update_category(&db, 42, &cat("X")).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            get_category_by_name(&db, "nope").await,
            Err(ServiceError::NotFound(_))
        ));
        Ok(())
    }
}

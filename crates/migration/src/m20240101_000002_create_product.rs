//! Create `product` table.
//!
//! Products outlive their category: deleting a category nulls `category_id`.
use sea_orm_migration::{prelude::*, schema::*, sea_orm::DatabaseBackend};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // sqlite caps decimal precision at 16
        let price = match manager.get_database_backend() {
            DatabaseBackend::Sqlite => decimal_len(Product::Price, 16, 2),
            _ => decimal_len(Product::Price, 19, 2),
        };
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(pk_auto(Product::Id))
                    .col(string_len(Product::Name, 255))
                    .col(string_len_null(Product::Description, 1000))
                    .col(price)
                    .col(integer_null(Product::CategoryId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_category")
                            .from(Product::Table, Product::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Product::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Product { Table, Id, Name, Description, Price, CategoryId }

#[derive(DeriveIden)]
enum Category { Table, Id }

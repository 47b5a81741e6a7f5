use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Category: unique name
        manager
            .create_index(
                Index::create()
                    .name("uniq_category_name")
                    .table(Category::Table)
                    .col(Category::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Product: lookups by category and name
        manager
            .create_index(
                Index::create()
                    .name("idx_product_category")
                    .table(Product::Table)
                    .col(Product::CategoryId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_product_name")
                    .table(Product::Table)
                    .col(Product::Name)
                    .to_owned(),
            )
            .await?;

        // Inventory: lookups by product and location
        manager
            .create_index(
                Index::create()
                    .name("idx_inventory_product")
                    .table(Inventory::Table)
                    .col(Inventory::ProductId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_inventory_location")
                    .table(Inventory::Table)
                    .col(Inventory::Location)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_category_name").table(Category::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_product_category").table(Product::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_product_name").table(Product::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_inventory_product").table(Inventory::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_inventory_location").table(Inventory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Category { Table, Name }

#[derive(DeriveIden)]
enum Product { Table, CategoryId, Name }

#[derive(DeriveIden)]
enum Inventory { Table, ProductId, Location }

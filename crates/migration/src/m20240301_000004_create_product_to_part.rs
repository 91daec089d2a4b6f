//! Create `product_to_part` join table.
//!
//! Many-to-many between products and animal parts. `quantity` is unchecked.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductToPart::Table)
                    .if_not_exists()
                    .col(pk_auto(ProductToPart::Id))
                    .col(integer(ProductToPart::ProductId).not_null())
                    .col(integer(ProductToPart::PartId).not_null())
                    .col(integer(ProductToPart::Quantity).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ProductToPart::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ProductToPart { Table, Id, ProductId, PartId, Quantity }

//! Create `animal_part` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AnimalPart::Table)
                    .if_not_exists()
                    .col(pk_auto(AnimalPart::Id))
                    .col(integer(AnimalPart::AnimalId).not_null())
                    .col(string_len(AnimalPart::PartType, 64).not_null())
                    .col(double(AnimalPart::Weight).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AnimalPart::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AnimalPart { Table, Id, AnimalId, PartType, Weight }

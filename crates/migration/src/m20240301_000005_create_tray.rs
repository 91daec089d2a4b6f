//! Create `tray` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tray::Table)
                    .if_not_exists()
                    .col(pk_auto(Tray::Id))
                    .col(string_len(Tray::PartType, 64).not_null())
                    .col(double(Tray::MaxWeight).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Tray::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Tray { Table, Id, PartType, MaxWeight }

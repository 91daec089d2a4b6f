//! Create `animal` table.
//!
//! Arrival time is stored with the offset it was recorded in. Date filters
//! convert it to the server's local zone before comparing.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Animal::Table)
                    .if_not_exists()
                    .col(pk_auto(Animal::Id))
                    .col(string_len(Animal::RegistrationNumber, 64).not_null())
                    .col(double(Animal::Weight).not_null())
                    .col(string_len(Animal::Origin, 128).not_null())
                    .col(timestamp_with_time_zone(Animal::ArrivalTime).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Animal::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Animal { Table, Id, RegistrationNumber, Weight, Origin, ArrivalTime }

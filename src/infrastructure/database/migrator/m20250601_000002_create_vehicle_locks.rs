//! Create vehicle_locks table
//!
//! One row per vehicle; reserve transactions upsert it first to serialize
//! conflicting writers at the storage layer.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VehicleLocks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VehicleLocks::VehicleId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VehicleLocks::LockedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VehicleLocks::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum VehicleLocks {
    Table,
    VehicleId,
    LockedAt,
}

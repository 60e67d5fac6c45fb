//! Create reservations table
//!
//! Stores committed rental reservations. The compound
//! (vehicle_id, start_at, end_at, status) index backs the overlap
//! conflict check; (vehicle_id, status) backs calendar lookups.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reservations::UserId).string().not_null())
                    .col(ColumnDef::new(Reservations::VehicleId).string().not_null())
                    .col(
                        ColumnDef::new(Reservations::StartAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::EndAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::DailyRate).double().not_null())
                    .col(ColumnDef::new(Reservations::TotalDays).integer().not_null())
                    .col(ColumnDef::new(Reservations::TotalPrice).double().not_null())
                    .col(
                        ColumnDef::new(Reservations::PickupLocation)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::Status)
                            .string()
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(Reservations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_vehicle_status")
                    .table(Reservations::Table)
                    .col(Reservations::VehicleId)
                    .col(Reservations::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_conflict_check")
                    .table(Reservations::Table)
                    .col(Reservations::VehicleId)
                    .col(Reservations::StartAt)
                    .col(Reservations::EndAt)
                    .col(Reservations::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_user")
                    .table(Reservations::Table)
                    .col(Reservations::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Reservations {
    Table,
    Id,
    UserId,
    VehicleId,
    StartAt,
    EndAt,
    DailyRate,
    TotalDays,
    TotalPrice,
    PickupLocation,
    Status,
    CreatedAt,
    UpdatedAt,
}

//! Reservation entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    /// UUID v4, assigned at creation
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub user_id: String,
    pub vehicle_id: String,

    /// Rental window, half-open [start_at, end_at)
    pub start_at: DateTimeUtc,
    pub end_at: DateTimeUtc,

    pub daily_rate: f64,
    pub total_days: i32,
    pub total_price: f64,

    /// Location code: HANOI, HOCHIMINH, DANANG
    pub pickup_location: String,

    /// Reservation status: PENDING, CONFIRMED, CANCELLED, COMPLETED, REJECTED
    pub status: String,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

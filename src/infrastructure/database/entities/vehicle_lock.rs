//! Per-vehicle write-serialization row
//!
//! Upserted as the first statement of every reserve transaction so that
//! racing writers for the same vehicle queue on the storage engine's write
//! lock instead of interleaving their overlap checks.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicle_locks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub vehicle_id: String,

    /// Last lock acquisition time
    pub locked_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

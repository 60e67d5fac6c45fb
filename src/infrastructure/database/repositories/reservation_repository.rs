//! SeaORM implementation of ReservationStore
//!
//! Conflict guard: every `reserve` runs in one transaction whose FIRST
//! statement upserts the vehicle's `vehicle_locks` row. That write makes the
//! transaction a writer immediately, so the storage engine serializes racing
//! reserve calls for the same vehicle (across replicas sharing the store,
//! not just tasks in this process). The overlap re-check that follows runs
//! under that lock; the loser of a race observes the winner's committed row
//! and maps it to `ScheduleConflict`.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::reservation::{
    NewReservation, PickupLocation, Reservation, ReservationStatus, ReservationStore,
};
use crate::domain::{BookingError, BookingResult};
use crate::infrastructure::database::entities::{reservation, vehicle_lock};

/// Statuses that occupy a vehicle's calendar.
const BLOCKING_STATUSES: [&str; 2] = ["PENDING", "CONFIRMED"];

pub struct SeaOrmReservationStore {
    db: DatabaseConnection,
}

impl SeaOrmReservationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> BookingResult<Reservation> {
    let status = ReservationStatus::parse(&m.status).ok_or_else(|| {
        BookingError::Internal(format!("corrupt status '{}' on reservation {}", m.status, m.id))
    })?;
    let pickup_location = PickupLocation::parse(&m.pickup_location).ok_or_else(|| {
        BookingError::Internal(format!(
            "corrupt pickup_location '{}' on reservation {}",
            m.pickup_location, m.id
        ))
    })?;

    Ok(Reservation {
        id: m.id,
        user_id: m.user_id,
        vehicle_id: m.vehicle_id,
        start_at: m.start_at,
        end_at: m.end_at,
        daily_rate: m.daily_rate,
        total_days: m.total_days,
        total_price: m.total_price,
        pickup_location,
        status,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

// ── ReservationStore impl ───────────────────────────────────────

#[async_trait]
impl ReservationStore for SeaOrmReservationStore {
    async fn reserve(&self, new: NewReservation) -> BookingResult<Reservation> {
        let txn = self.db.begin().await?;

        // Must stay the first statement of the transaction: the upsert takes
        // the write lock that serializes conflicting reserve calls before
        // either of them gets to the overlap check below.
        vehicle_lock::Entity::insert(vehicle_lock::ActiveModel {
            vehicle_id: Set(new.vehicle_id.clone()),
            locked_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(vehicle_lock::Column::VehicleId)
                .update_column(vehicle_lock::Column::LockedAt)
                .to_owned(),
        )
        .exec(&txn)
        .await?;

        // Overlap: [s1,e1) and [s2,e2) intersect iff s1 < e2 AND s2 < e1
        let blocking = reservation::Entity::find()
            .filter(reservation::Column::VehicleId.eq(new.vehicle_id.as_str()))
            .filter(reservation::Column::Status.is_in(BLOCKING_STATUSES))
            .filter(reservation::Column::StartAt.lt(new.end_at))
            .filter(reservation::Column::EndAt.gt(new.start_at))
            .all(&txn)
            .await?;

        // An at-least-once client retry carries the same intent; hand back
        // the record that retry already committed instead of a conflict.
        if let Some(existing) = blocking
            .iter()
            .find(|m| m.user_id == new.user_id && m.start_at == new.start_at && m.end_at == new.end_at)
        {
            let duplicate = model_to_domain(existing.clone())?;
            txn.rollback().await?;
            debug!(reservation_id = %duplicate.id, "Duplicate reservation intent, returning existing record");
            return Ok(duplicate);
        }

        if !blocking.is_empty() {
            txn.rollback().await?;
            return Err(BookingError::ScheduleConflict {
                vehicle_id: new.vehicle_id,
            });
        }

        let now = Utc::now();
        let model = reservation::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(new.user_id),
            vehicle_id: Set(new.vehicle_id),
            start_at: Set(new.start_at),
            end_at: Set(new.end_at),
            daily_rate: Set(new.daily_rate),
            total_days: Set(new.total_days),
            total_price: Set(new.total_price),
            pickup_location: Set(new.pickup_location.as_str().to_string()),
            status: Set(ReservationStatus::Pending.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let inserted = model.insert(&txn).await?;
        txn.commit().await?;

        debug!(reservation_id = %inserted.id, vehicle_id = %inserted.vehicle_id, "Reservation persisted");
        model_to_domain(inserted)
    }

    async fn find_by_id(&self, id: &str) -> BookingResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id).one(&self.db).await?;
        model.map(model_to_domain).transpose()
    }

    async fn set_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> BookingResult<Reservation> {
        let existing = reservation::Entity::find_by_id(id).one(&self.db).await?;

        let Some(existing) = existing else {
            return Err(BookingError::NotFound {
                entity: "Reservation",
                field: "id",
                value: id.to_string(),
            });
        };

        let current = ReservationStatus::parse(&existing.status).ok_or_else(|| {
            BookingError::Internal(format!("corrupt status '{}' on reservation {}", existing.status, id))
        })?;

        if !current.can_transition_to(status) {
            return Err(BookingError::InvalidTransition {
                from: current.to_string(),
                to: status.to_string(),
            });
        }

        let mut active: reservation::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now());
        let updated = active.update(&self.db).await?;

        model_to_domain(updated)
    }

    async fn find_blocking(&self, vehicle_id: &str) -> BookingResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::VehicleId.eq(vehicle_id))
            .filter(reservation::Column::Status.is_in(BLOCKING_STATUSES))
            .order_by_asc(reservation::Column::StartAt)
            .all(&self.db)
            .await?;
        models.into_iter().map(model_to_domain).collect()
    }
}

// ── Tests ──────────────────────────────────────────────────────

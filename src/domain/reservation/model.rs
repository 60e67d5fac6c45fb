//! Reservation domain entity

use chrono::{DateTime, Utc};

/// Reservation status
///
/// `Pending` and `Confirmed` block the vehicle's calendar; the terminal
/// states free the window again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Created, awaiting payment confirmation
    Pending,
    /// Payment confirmed
    Confirmed,
    /// Cancelled by user or system
    Cancelled,
    /// Rental finished
    Completed,
    /// Rejected (e.g. payment declined)
    Rejected,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
            Self::Rejected => "REJECTED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "CONFIRMED" => Some(Self::Confirmed),
            "CANCELLED" => Some(Self::Cancelled),
            "COMPLETED" => Some(Self::Completed),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Whether reservations in this status occupy the vehicle's calendar.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Legal transitions:
    /// PENDING -> CONFIRMED | CANCELLED | REJECTED,
    /// CONFIRMED -> COMPLETED | CANCELLED.
    pub fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Pending, Self::Rejected)
                | (Self::Confirmed, Self::Completed)
                | (Self::Confirmed, Self::Cancelled)
        )
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pickup location code, also the data-partitioning key of the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupLocation {
    Hanoi,
    Hochiminh,
    Danang,
}

impl PickupLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hanoi => "HANOI",
            Self::Hochiminh => "HOCHIMINH",
            Self::Danang => "DANANG",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "HANOI" => Some(Self::Hanoi),
            "HOCHIMINH" => Some(Self::Hochiminh),
            "DANANG" => Some(Self::Danang),
            _ => None,
        }
    }
}

impl std::fmt::Display for PickupLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A vehicle booked for a rental window by a requester.
///
/// Rental windows are half-open `[start_at, end_at)`.
#[derive(Debug, Clone)]
pub struct Reservation {
    /// Unique reservation ID (UUID v4), assigned at creation
    pub id: String,
    /// Requester reference (validated out-of-process before creation)
    pub user_id: String,
    /// Vehicle reference
    pub vehicle_id: String,
    /// Rental window start (inclusive)
    pub start_at: DateTime<Utc>,
    /// Rental window end (exclusive); strictly after `start_at`
    pub end_at: DateTime<Utc>,
    /// Per-day rate at booking time
    pub daily_rate: f64,
    /// Billed day count (fractional days round up)
    pub total_days: i32,
    /// daily_rate * total_days, stored for audit immutability
    pub total_price: f64,
    pub pickup_location: PickupLocation,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Half-open interval overlap: `[s1,e1)` and `[s2,e2)` overlap iff
    /// `s1 < e2 && s2 < e1`.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_at < end && start < self.end_at
    }

    /// Whether this reservation blocks the vehicle for the given window.
    pub fn blocks(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.status.is_blocking() && self.overlaps(start, end)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, day, hour, 0, 0).unwrap()
    }

    fn sample(start: DateTime<Utc>, end: DateTime<Utc>, status: ReservationStatus) -> Reservation {
        Reservation {
            id: "r-1".into(),
            user_id: "u-1".into(),
            vehicle_id: "v-1".into(),
            start_at: start,
            end_at: end,
            daily_rate: 500.0,
            total_days: 4,
            total_price: 2000.0,
            pickup_location: PickupLocation::Hanoi,
            status,
            created_at: at(1, 0),
            updated_at: at(1, 0),
        }
    }

    #[test]
    fn overlap_is_half_open() {
        let r = sample(at(1, 10), at(5, 10), ReservationStatus::Pending);
        // Interior overlap
        assert!(r.overlaps(at(3, 0), at(4, 0)));
        // Touching at the end boundary is not overlap
        assert!(!r.overlaps(at(5, 10), at(7, 0)));
        // Touching at the start boundary is not overlap
        assert!(!r.overlaps(at(1, 0), at(1, 10)));
        // Fully covering
        assert!(r.overlaps(at(1, 0), at(6, 0)));
    }

    #[test]
    fn cancelled_reservation_does_not_block() {
        let r = sample(at(1, 10), at(5, 10), ReservationStatus::Cancelled);
        assert!(!r.blocks(at(2, 0), at(3, 0)));

        let r = sample(at(1, 10), at(5, 10), ReservationStatus::Rejected);
        assert!(!r.blocks(at(2, 0), at(3, 0)));
    }

    #[test]
    fn pending_and_confirmed_block() {
        for status in [ReservationStatus::Pending, ReservationStatus::Confirmed] {
            let r = sample(at(1, 10), at(5, 10), status);
            assert!(r.blocks(at(2, 0), at(3, 0)));
        }
    }

    #[test]
    fn legal_transitions() {
        use ReservationStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Cancelled));
    }

    #[test]
    fn illegal_transitions() {
        use ReservationStatus::*;
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Confirmed.can_transition_to(Rejected));
        for terminal in [Cancelled, Completed, Rejected] {
            for next in [Pending, Confirmed, Cancelled, Completed, Rejected] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn status_codec_roundtrip() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::Cancelled,
            ReservationStatus::Completed,
            ReservationStatus::Rejected,
        ] {
            assert_eq!(ReservationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ReservationStatus::parse("EXPIRED"), None);
    }

    #[test]
    fn location_codec_roundtrip() {
        for loc in [
            PickupLocation::Hanoi,
            PickupLocation::Hochiminh,
            PickupLocation::Danang,
        ] {
            assert_eq!(PickupLocation::parse(loc.as_str()), Some(loc));
        }
        assert_eq!(PickupLocation::parse("HUE"), None);
    }
}

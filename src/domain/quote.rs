//! Quote calculator
//!
//! Pure pricing arithmetic for a rental window. Billing is per started day:
//! any fractional remainder rounds the day count up (3 days + 1 hour bills
//! as 4 days).

use chrono::{DateTime, Utc};

use crate::domain::{BookingError, BookingResult};

const SECONDS_PER_DAY: i64 = 86_400;

/// Priced rental window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub total_days: i32,
    pub total_price: f64,
}

/// Compute the billed day count and total price for `[start, end)` at
/// `daily_rate` per day. Rejects empty and negative windows.
pub fn quote(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    daily_rate: f64,
) -> BookingResult<Quote> {
    if end <= start {
        return Err(BookingError::InvalidInput(
            "end_at must be strictly after start_at".to_string(),
        ));
    }

    let seconds = (end - start).num_seconds();
    let total_days = ((seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY) as i32;

    Ok(Quote {
        total_days,
        total_price: daily_rate * f64::from(total_days),
    })
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, day, hour, min, 0).unwrap()
    }

    #[test]
    fn whole_days_bill_exactly() {
        let q = quote(at(1, 10, 0), at(4, 10, 0), 500.0).unwrap();
        assert_eq!(q.total_days, 3);
        assert_eq!(q.total_price, 1500.0);
    }

    #[test]
    fn fractional_day_rounds_up() {
        let q = quote(at(1, 10, 0), at(4, 11, 0), 500.0).unwrap();
        assert_eq!(q.total_days, 4);
        assert_eq!(q.total_price, 2000.0);
    }

    #[test]
    fn one_minute_bills_one_day() {
        let q = quote(at(1, 10, 0), at(1, 10, 1), 500.0).unwrap();
        assert_eq!(q.total_days, 1);
        assert_eq!(q.total_price, 500.0);
    }

    #[test]
    fn four_day_spec_scenario() {
        // [2025-12-01T10:00, 2025-12-05T10:00) at 500/day
        let q = quote(at(1, 10, 0), at(5, 10, 0), 500.0).unwrap();
        assert_eq!(q.total_days, 4);
        assert_eq!(q.total_price, 2000.0);
    }

    #[test]
    fn empty_window_is_rejected() {
        let err = quote(at(1, 10, 0), at(1, 10, 0), 500.0).unwrap_err();
        assert!(matches!(err, BookingError::InvalidInput(_)));
    }

    #[test]
    fn negative_window_is_rejected() {
        let err = quote(at(4, 10, 0), at(1, 10, 0), 500.0).unwrap_err();
        assert!(matches!(err, BookingError::InvalidInput(_)));
    }
}

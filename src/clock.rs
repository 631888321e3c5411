//! Date source for the borrow-session validator.
//!
//! "Today" is injected rather than read from the global clock so that
//! date-boundary rules can be tested deterministically.

use chrono::{NaiveDate, Utc};

#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    /// Current date at day granularity (UTC).
    fn today(&self) -> NaiveDate;
}

/// Production clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_clock_pins_today() {
        let mut clock = MockClock::new();
        let pinned = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        clock.expect_today().return_const(pinned);

        assert_eq!(clock.today(), pinned);
        assert_eq!(clock.today(), pinned);
    }

    #[test]
    fn system_clock_is_day_granular() {
        let clock = SystemClock;
        assert_eq!(clock.today(), Utc::now().date_naive());
    }
}

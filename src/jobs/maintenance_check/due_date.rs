use chrono::{Duration, NaiveDate};

use crate::constants::*;

/// Usage rate assumed for projecting when the next service becomes due.
/// Kept as an explicit value so the projection stays testable with
/// other rates than the configured default.
#[derive(Debug, Clone, Copy)]
pub struct UsageRate {
    pub hours_per_active_day: f64,
    pub active_days_per_week: f64,
    pub days_per_week: f64,
}

impl Default for UsageRate {
    fn default() -> Self {
        Self {
            hours_per_active_day: USAGE_HOURS_PER_ACTIVE_DAY,
            active_days_per_week: USAGE_ACTIVE_DAYS_PER_WEEK,
            days_per_week: USAGE_DAYS_PER_WEEK,
        }
    }
}

impl UsageRate {
    /// Average usage hours accumulated per calendar day
    pub fn hours_per_day(&self) -> f64 {
        self.hours_per_active_day * self.active_days_per_week / self.days_per_week
    }
}

/// Calendar date on which the next service becomes due, given the date
/// of the last service and the usage hours the equipment can run before
/// the next one. Date only arithmetic, the time of day plays no role.
/// A non positive usage rate returns the last serviced date unchanged.
pub fn next_due_date(last_serviced: NaiveDate, hours_limit: f64, rate: &UsageRate) -> NaiveDate {
    let hours_per_day = rate.hours_per_day();
    if !hours_per_day.is_finite() || hours_per_day <= 0.0 {
        return last_serviced;
    }
    let days_until_next = (hours_limit / hours_per_day).ceil() as i64;
    last_serviced
        .checked_add_signed(Duration::days(days_until_next))
        .unwrap_or(last_serviced)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_rate_hours_per_day() {
        let rate = UsageRate::default();
        // (6.5 * 6) / 7
        assert!((rate.hours_per_day() - 39.0 / 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_next_due_date_small_limit() {
        // less than one day of usage still moves the date by one day
        let due = next_due_date(date(2024, 1, 1), 1.0, &UsageRate::default());
        assert_eq!(due, date(2024, 1, 2));
    }

    #[test]
    fn test_next_due_date_exact_week() {
        // 39 hours at 39/7 hours per day is exactly 7 days
        let due = next_due_date(date(2024, 1, 1), 39.0, &UsageRate::default());
        assert_eq!(due, date(2024, 1, 8));
    }

    #[test]
    fn test_next_due_date_forty_hours() {
        // ceil(40 / 5.571..) = 8
        let due = next_due_date(date(2024, 1, 1), 40.0, &UsageRate::default());
        assert_eq!(due, date(2024, 1, 9));
    }

    #[test]
    fn test_next_due_date_hundred_hours() {
        // ceil(100 / 5.571..) = 18
        let due = next_due_date(date(2024, 1, 1), 100.0, &UsageRate::default());
        assert_eq!(due, date(2024, 1, 19));
    }

    #[test]
    fn test_next_due_date_month_rollover() {
        let due = next_due_date(date(2024, 1, 28), 40.0, &UsageRate::default());
        assert_eq!(due, date(2024, 2, 5));
    }

    #[test]
    fn test_next_due_date_zero_rate() {
        let rate = UsageRate {
            hours_per_active_day: 0.0,
            active_days_per_week: 6.0,
            days_per_week: 7.0,
        };
        let due = next_due_date(date(2024, 1, 1), 40.0, &rate);
        assert_eq!(due, date(2024, 1, 1));
    }

    #[test]
    fn test_next_due_date_negative_rate() {
        let rate = UsageRate {
            hours_per_active_day: -1.0,
            active_days_per_week: 6.0,
            days_per_week: 7.0,
        };
        let due = next_due_date(date(2024, 1, 1), 40.0, &rate);
        assert_eq!(due, date(2024, 1, 1));
    }

    #[test]
    fn test_next_due_date_zero_days_per_week() {
        let rate = UsageRate {
            hours_per_active_day: 6.5,
            active_days_per_week: 6.0,
            days_per_week: 0.0,
        };
        let due = next_due_date(date(2024, 1, 1), 40.0, &rate);
        assert_eq!(due, date(2024, 1, 1));
    }
}

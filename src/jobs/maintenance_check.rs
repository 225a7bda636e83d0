use chrono::{Duration as ChronoDuration, Local, NaiveDateTime, NaiveTime};
use std::{sync::Arc, time::Duration};
use tokio::time::sleep;

use self::due_date::UsageRate;
use crate::constants::MAINTENANCE_JOB_RUN_HOUR;

#[cfg(test)]
use mockall_double::double;

#[cfg_attr(test, double)]
use crate::database::AppDatabase;
#[cfg_attr(test, double)]
use crate::push::client::PushClient;

pub mod due_date;
pub mod scan;

/// Runs the maintenance due date scan once per day at the configured
/// local wall clock hour
pub async fn maintenance_check_job(db: Arc<AppDatabase>) {
    tracing::debug!("initializing maintenance check scheduler job");
    let mut push_client = PushClient::new();
    let rate = UsageRate::default();
    loop {
        let delay = duration_till_next_run(Local::now().naive_local());
        sleep(delay).await;
        let today = Local::now().date_naive();
        scan::check_maintenance_due_dates(&db, &mut push_client, today, &rate).await;
    }
}

/// Time left until the next daily run, from the given local time
fn duration_till_next_run(now: NaiveDateTime) -> Duration {
    let run_time =
        NaiveTime::from_hms_opt(MAINTENANCE_JOB_RUN_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);
    let todays_run = now.date().and_time(run_time);
    let next_run = if now < todays_run {
        todays_run
    } else {
        todays_run + ChronoDuration::days(1)
    };
    (next_run - now).to_std().unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_duration_till_next_run_before_run_hour() {
        let delay = duration_till_next_run(at(6, 30, 0));
        assert_eq!(delay, Duration::from_secs(30 * 60));
    }

    #[test]
    fn test_duration_till_next_run_at_run_hour() {
        let delay = duration_till_next_run(at(7, 0, 0));
        assert_eq!(delay, Duration::from_secs(24 * 60 * 60));
    }

    #[test]
    fn test_duration_till_next_run_after_run_hour() {
        let delay = duration_till_next_run(at(8, 0, 0));
        assert_eq!(delay, Duration::from_secs(23 * 60 * 60));
    }
}

use std::sync::Arc;

use self::maintenance_check::maintenance_check_job;

#[cfg(test)]
use mockall_double::double;

#[cfg_attr(test, double)]
use crate::database::AppDatabase;

pub mod maintenance_check;

pub fn spawn_all_jobs(db_client: Arc<AppDatabase>) {
    // spawn job to scan maintenance records and push out due reminders
    tokio::spawn(async {
        maintenance_check_job(db_client).await;
    });
}

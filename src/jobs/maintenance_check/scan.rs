use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::doc;
use std::{collections::HashMap, sync::Arc};

use super::due_date::{next_due_date, UsageRate};
use crate::{
    constants::*,
    models::{Equipment, MaintenanceRecord, User},
    utils::replace_placeholders,
};

#[cfg(test)]
use mockall_double::double;

#[cfg_attr(test, double)]
use crate::database::AppDatabase;
#[cfg_attr(test, double)]
use crate::push::client::PushClient;

/// Walks users -> equipment -> maintenance records, collects the records
/// becoming due today per user and pushes one combined reminder to all of
/// the user's devices. Running the scan twice on the same day re-notifies
/// still due records, there is no sent-marker kept anywhere.
pub async fn check_maintenance_due_dates(
    db: &Arc<AppDatabase>,
    push: &mut PushClient,
    today: NaiveDate,
    rate: &UsageRate,
) {
    tracing::info!("starting daily maintenance check, target date: {}", today);
    let users = match list_users(db).await {
        Ok(users) => users,
        Err(err) => {
            tracing::error!("not able to list users: {:?}", err);
            return;
        }
    };
    for user in users {
        let fcm_tokens = user.fcm_tokens.unwrap_or_default();
        if fcm_tokens.is_empty() {
            tracing::info!("skipping user {}, no fcm tokens found", user.id);
            continue;
        }
        tracing::debug!("checking maintenance for user: {}", user.id);
        // one failing user must not abort the remaining users
        match collect_due_messages(db, &user.id, today, rate).await {
            Ok(messages) if messages.is_empty() => {}
            Ok(messages) => {
                let body = messages.join("\n");
                send_notification_to_user(push, &user.id, &fcm_tokens, &body).await;
            }
            Err(err) => {
                tracing::error!("maintenance check failed for user {}: {:?}", user.id, err);
            }
        }
    }
    tracing::info!("finished daily maintenance check");
}

/// Collects the reminder message for every maintenance record under the
/// given user which becomes due on `today`
async fn collect_due_messages(
    db: &Arc<AppDatabase>,
    user_id: &str,
    today: NaiveDate,
    rate: &UsageRate,
) -> anyhow::Result<Vec<String>> {
    let mut messages = vec![];
    for equipment in list_equipment(db, user_id).await? {
        let Some(equipment_id) = equipment._id.as_deref() else {
            tracing::debug!("equipment without _id under user {}", user_id);
            continue;
        };
        for record in list_maintenance_records(db, equipment_id).await? {
            if is_due_on(&record, today, rate) {
                let message = due_message(&record, &equipment.name)?;
                tracing::info!("found due maintenance for {}: {}", user_id, message);
                messages.push(message);
            }
        }
    }
    Ok(messages)
}

async fn list_users(db: &Arc<AppDatabase>) -> anyhow::Result<Vec<User>> {
    let users = db.find::<User>(DB_NAME, COLL_USERS, None, None).await?;
    Ok(users)
}

async fn list_equipment(db: &Arc<AppDatabase>, user_id: &str) -> anyhow::Result<Vec<Equipment>> {
    let filter = doc! {"userId": user_id};
    let equipment = db
        .find::<Equipment>(DB_NAME, COLL_EQUIPMENT, Some(filter), None)
        .await?;
    Ok(equipment)
}

async fn list_maintenance_records(
    db: &Arc<AppDatabase>,
    equipment_id: &str,
) -> anyhow::Result<Vec<MaintenanceRecord>> {
    let filter = doc! {"equipmentId": equipment_id};
    let records = db
        .find::<MaintenanceRecord>(DB_NAME, COLL_MAINTENANCE_RECORDS, Some(filter), None)
        .await?;
    Ok(records)
}

/// Due check compares calendar date components only, never instants, so
/// time zone skew between the store and this host cannot shift a match
fn is_due_on(record: &MaintenanceRecord, today: NaiveDate, rate: &UsageRate) -> bool {
    let Some(last_serviced) = DateTime::<Utc>::from_timestamp(record.last_serviced_ts as i64, 0)
    else {
        tracing::debug!("invalid lastServicedTs in maintenance record: {:?}", record._id);
        return false;
    };
    next_due_date(last_serviced.date_naive(), record.hours_limit, rate) == today
}

fn due_message(record: &MaintenanceRecord, equipment_name: &str) -> anyhow::Result<String> {
    let options = HashMap::from([
        (
            "maintenanceType".to_string(),
            record.maintenance_type.clone(),
        ),
        ("equipmentName".to_string(), equipment_name.to_string()),
    ]);
    replace_placeholders(MAINTENANCE_MSG_TEMPLATE, options)
}

/// Pushes one multicast notification covering all device tokens of the
/// user. Absent tokens make this a no-op and a delivery failure is
/// logged and swallowed, the caller carries on with the next user.
async fn send_notification_to_user(
    push: &mut PushClient,
    user_id: &str,
    tokens: &[String],
    body: &str,
) {
    if tokens.is_empty() {
        tracing::warn!("no tokens found for user {}, cannot send message", user_id);
        return;
    }
    tracing::debug!("sending message to user: {}", user_id);
    match push
        .send_multicast(user_id, tokens, MAINTENANCE_PUSH_TITLE, body)
        .await
    {
        Ok(outcome) => {
            tracing::info!(
                "processed messages for user {}: {} sent successfully, {} failed",
                user_id,
                outcome.success_count,
                outcome.failure_count
            );
        }
        Err(err) => {
            tracing::error!("error sending message to user {}: {:?}", user_id, err);
        }
    }
}

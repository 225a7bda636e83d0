use serde::{Deserialize, Serialize};

use crate::utils::deserialize_helper;

/// Maintenance schedule entry of a piece of equipment.
/// `last_serviced_ts` is an UTC instant, `hours_limit` is the usage
/// capacity in hours before the next service becomes due.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    #[serde(rename = "_id")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "deserialize_helper")]
    #[serde(default)]
    pub _id: Option<String>,
    pub equipment_id: String,
    pub maintenance_type: String,
    pub last_serviced_ts: u64,
    pub hours_limit: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_ts: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_ts: Option<u64>,
}

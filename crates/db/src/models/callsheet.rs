//! Callsheet (one per project) and its schedule.

use serde::{Deserialize, Serialize};
use shootdesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Callsheet {
    pub id: DbId,
    pub project_id: DbId,
    pub call_time: Option<Timestamp>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub wrap_time: Option<Timestamp>,
    pub location_name: Option<String>,
    pub location_address: Option<String>,
    pub location_notes: Option<String>,
    pub parking_info: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub weather_info: Option<String>,
    pub dresscode: Option<String>,
    pub equipment_list: Option<String>,
    pub additional_notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScheduleItem {
    pub id: DbId,
    pub callsheet_id: DbId,
    pub time: Timestamp,
    pub duration_mins: Option<i32>,
    pub activity: String,
    pub notes: Option<String>,
    pub sort_order: i32,
}

/// Upsert body. Fields left out keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpsertCallsheet {
    pub call_time: Option<Timestamp>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub wrap_time: Option<Timestamp>,
    pub location_name: Option<String>,
    pub location_address: Option<String>,
    pub location_notes: Option<String>,
    pub parking_info: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub weather_info: Option<String>,
    pub dresscode: Option<String>,
    pub equipment_list: Option<String>,
    pub additional_notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateScheduleItem {
    pub time: Timestamp,
    pub duration_mins: Option<i32>,
    pub activity: String,
    pub notes: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

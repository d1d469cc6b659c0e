//! Repository for `callsheets` and `callsheet_schedule_items`.

use shootdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::callsheet::{Callsheet, CreateScheduleItem, ScheduleItem, UpsertCallsheet};

const COLUMNS: &str = "id, project_id, call_time, start_time, end_time, wrap_time, \
                       location_name, location_address, location_notes, parking_info, \
                       emergency_contact, emergency_phone, weather_info, dresscode, \
                       equipment_list, additional_notes, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, callsheet_id, time, duration_mins, activity, notes, sort_order";

pub struct CallsheetRepo;

impl CallsheetRepo {
    pub async fn find_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<Callsheet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM callsheets WHERE project_id = $1");
        sqlx::query_as::<_, Callsheet>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Create the project's callsheet or update the existing one. Fields
    /// that are `None` keep their stored value.
    pub async fn upsert(
        pool: &PgPool,
        project_id: DbId,
        input: &UpsertCallsheet,
    ) -> Result<Callsheet, sqlx::Error> {
        let query = format!(
            "INSERT INTO callsheets (project_id, call_time, start_time, end_time, wrap_time,
                 location_name, location_address, location_notes, parking_info,
                 emergency_contact, emergency_phone, weather_info, dresscode,
                 equipment_list, additional_notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             ON CONFLICT ON CONSTRAINT uq_callsheets_project_id DO UPDATE SET
                call_time = COALESCE(EXCLUDED.call_time, callsheets.call_time),
                start_time = COALESCE(EXCLUDED.start_time, callsheets.start_time),
                end_time = COALESCE(EXCLUDED.end_time, callsheets.end_time),
                wrap_time = COALESCE(EXCLUDED.wrap_time, callsheets.wrap_time),
                location_name = COALESCE(EXCLUDED.location_name, callsheets.location_name),
                location_address = COALESCE(EXCLUDED.location_address, callsheets.location_address),
                location_notes = COALESCE(EXCLUDED.location_notes, callsheets.location_notes),
                parking_info = COALESCE(EXCLUDED.parking_info, callsheets.parking_info),
                emergency_contact = COALESCE(EXCLUDED.emergency_contact, callsheets.emergency_contact),
                emergency_phone = COALESCE(EXCLUDED.emergency_phone, callsheets.emergency_phone),
                weather_info = COALESCE(EXCLUDED.weather_info, callsheets.weather_info),
                dresscode = COALESCE(EXCLUDED.dresscode, callsheets.dresscode),
                equipment_list = COALESCE(EXCLUDED.equipment_list, callsheets.equipment_list),
                additional_notes = COALESCE(EXCLUDED.additional_notes, callsheets.additional_notes)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Callsheet>(&query)
            .bind(project_id)
            .bind(input.call_time)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.wrap_time)
            .bind(&input.location_name)
            .bind(&input.location_address)
            .bind(&input.location_notes)
            .bind(&input.parking_info)
            .bind(&input.emergency_contact)
            .bind(&input.emergency_phone)
            .bind(&input.weather_info)
            .bind(&input.dresscode)
            .bind(&input.equipment_list)
            .bind(&input.additional_notes)
            .fetch_one(pool)
            .await
    }

    /// The project's callsheet, created empty if it does not exist yet.
    pub async fn get_or_create(pool: &PgPool, project_id: DbId) -> Result<Callsheet, sqlx::Error> {
        Self::upsert(pool, project_id, &UpsertCallsheet::default()).await
    }

    /// Schedule of a callsheet in display order.
    pub async fn list_schedule(
        pool: &PgPool,
        callsheet_id: DbId,
    ) -> Result<Vec<ScheduleItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM callsheet_schedule_items
             WHERE callsheet_id = $1
             ORDER BY sort_order, time, id"
        );
        sqlx::query_as::<_, ScheduleItem>(&query)
            .bind(callsheet_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create_schedule_item(
        pool: &PgPool,
        callsheet_id: DbId,
        input: &CreateScheduleItem,
    ) -> Result<ScheduleItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO callsheet_schedule_items
                (callsheet_id, time, duration_mins, activity, notes, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, ScheduleItem>(&query)
            .bind(callsheet_id)
            .bind(input.time)
            .bind(input.duration_mins)
            .bind(input.activity.trim())
            .bind(&input.notes)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }
}

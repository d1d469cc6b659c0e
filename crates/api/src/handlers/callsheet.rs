//! Handlers for the project callsheet and its schedule.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use shootdesk_core::error::CoreError;
use shootdesk_core::types::DbId;
use shootdesk_core::validation::{
    optional_text, require_text, validate_duration_mins, MAX_ACTIVITY_LEN, MAX_ADDRESS_LEN,
    MAX_LOCATION_LEN, MAX_LONG_TEXT_LEN, MAX_NAME_LEN, MAX_PARKING_INFO_LEN, MAX_PHONE_LEN,
    MAX_SCHEDULE_NOTES_LEN,
};
use shootdesk_db::models::callsheet::{
    Callsheet, CreateScheduleItem, ScheduleItem, UpsertCallsheet,
};
use shootdesk_db::repositories::CallsheetRepo;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::project_access::{require_edit, require_view};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CallsheetView {
    #[serde(flatten)]
    pub callsheet: Callsheet,
    pub schedule: Vec<ScheduleItem>,
}

pub(crate) async fn load_callsheet(
    pool: &PgPool,
    project_id: DbId,
) -> Result<Option<CallsheetView>, sqlx::Error> {
    let Some(callsheet) = CallsheetRepo::find_by_project(pool, project_id).await? else {
        return Ok(None);
    };
    let schedule = CallsheetRepo::list_schedule(pool, callsheet.id).await?;
    Ok(Some(CallsheetView {
        callsheet,
        schedule,
    }))
}

fn validate_callsheet(input: &UpsertCallsheet) -> Result<(), CoreError> {
    let fields: [(&str, Option<&str>, usize); 10] = [
        ("Location name", input.location_name.as_deref(), MAX_LOCATION_LEN),
        ("Location address", input.location_address.as_deref(), MAX_ADDRESS_LEN),
        ("Location notes", input.location_notes.as_deref(), MAX_PARKING_INFO_LEN),
        ("Parking info", input.parking_info.as_deref(), MAX_PARKING_INFO_LEN),
        ("Emergency contact", input.emergency_contact.as_deref(), MAX_NAME_LEN),
        ("Emergency phone", input.emergency_phone.as_deref(), MAX_PHONE_LEN),
        ("Weather info", input.weather_info.as_deref(), MAX_ADDRESS_LEN),
        ("Dresscode", input.dresscode.as_deref(), MAX_PARKING_INFO_LEN),
        ("Equipment list", input.equipment_list.as_deref(), MAX_LONG_TEXT_LEN),
        ("Additional notes", input.additional_notes.as_deref(), MAX_LONG_TEXT_LEN),
    ];
    for (field, value, max) in fields {
        optional_text(field, value, max)?;
    }
    Ok(())
}

/// GET /api/v1/projects/{id}/callsheet
///
/// `data` is `null` until the callsheet is first saved.
pub async fn get(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Option<CallsheetView>>>> {
    require_view(&state.pool, auth.user_id, project_id).await?;
    let view = load_callsheet(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: view }))
}

/// PUT /api/v1/projects/{id}/callsheet
///
/// Creates the callsheet on first save. Omitted fields keep their value.
pub async fn upsert(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<UpsertCallsheet>,
) -> AppResult<Json<DataResponse<CallsheetView>>> {
    require_edit(&state.pool, auth.user_id, project_id).await?;
    validate_callsheet(&input)?;

    let callsheet = CallsheetRepo::upsert(&state.pool, project_id, &input).await?;
    let schedule = CallsheetRepo::list_schedule(&state.pool, callsheet.id).await?;
    Ok(Json(DataResponse {
        data: CallsheetView {
            callsheet,
            schedule,
        },
    }))
}

/// POST /api/v1/projects/{id}/callsheet/schedule
pub async fn add_schedule_item(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateScheduleItem>,
) -> AppResult<(StatusCode, Json<DataResponse<ScheduleItem>>)> {
    require_edit(&state.pool, auth.user_id, project_id).await?;
    require_text("Activity", &input.activity, MAX_ACTIVITY_LEN)?;
    optional_text("Notes", input.notes.as_deref(), MAX_SCHEDULE_NOTES_LEN)?;
    validate_duration_mins(input.duration_mins)?;

    let callsheet = CallsheetRepo::get_or_create(&state.pool, project_id).await?;
    let item = CallsheetRepo::create_schedule_item(&state.pool, callsheet.id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

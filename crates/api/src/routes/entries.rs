use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use timetable_core::{check_entry, find_clashes, EntryConflict};
use types::{Assignment, Clash};
use utoipa::ToSchema;

use crate::{error::ApiError, routes::schedule::ScheduleIn, state::AppState};

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckEntryIn {
    /// The session's timetable, without the entry being edited.
    pub existing: Vec<Assignment>,
    pub candidate: Assignment,
}

#[derive(Serialize, ToSchema)]
pub struct CheckEntryOut {
    pub ok: bool,
}

#[utoipa::path(
    post,
    path = "/v1/entries/check",
    request_body = CheckEntryIn,
    responses(
        (status = 200, description = "Entry fits the timetable", body = CheckEntryOut),
        (status = 400, description = "Lecture outside the day"),
        (status = 409, description = "Class or teacher already booked in that slot")
    )
)]
pub async fn check(
    State(state): State<AppState>,
    Json(input): Json<CheckEntryIn>,
) -> Result<Json<CheckEntryOut>, ApiError> {
    match check_entry(&state.grid, &input.existing, &input.candidate) {
        Ok(()) => Ok(Json(CheckEntryOut { ok: true })),
        Err(e @ EntryConflict::InvalidSlot { .. }) => Err(ApiError::bad_request(e)),
        Err(e) => Err(ApiError::conflict(e)),
    }
}

#[utoipa::path(
    post,
    path = "/v1/audit",
    request_body = ScheduleIn,
    responses((status = 200, description = "Teachers and classes booked twice in a slot", body = [Clash]))
)]
pub async fn audit(Json(input): Json<ScheduleIn>) -> Json<Vec<Clash>> {
    Json(find_clashes(&input.assignments))
}

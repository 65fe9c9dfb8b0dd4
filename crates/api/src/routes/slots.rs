use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use timetable_core::SlotKey;
use types::Weekday;
use utoipa::ToSchema;

use crate::{error::ApiError, state::AppState};

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlotKeyOut {
    pub day: Weekday,
    pub lecture: u8,
    pub class_id: String,
}

#[utoipa::path(
    get,
    path = "/v1/slots/{key}",
    params(("key" = String, Path, description = "Slot key, e.g. Monday-3-c1")),
    responses(
        (status = 200, description = "Decoded slot key", body = SlotKeyOut),
        (status = 400, description = "Malformed key or lecture outside the day")
    )
)]
pub async fn parse(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SlotKeyOut>, ApiError> {
    let k = SlotKey::parse_in(&state.grid, &key).map_err(ApiError::bad_request)?;
    Ok(Json(SlotKeyOut {
        day: k.day,
        lecture: k.lecture,
        class_id: k.class_id.0,
    }))
}

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use timetable_core::{validate_demands, ValidationError};
use types::Demand;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateIn {
    pub demands: Vec<Demand>,
    #[serde(default)]
    pub max_lectures: Option<u8>,
}

#[derive(Serialize, ToSchema)]
pub struct ValidationReport {
    pub ok: bool,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/v1/validate",
    request_body = ValidateIn,
    responses(
    (status = 200, description = "Validation result", body = ValidationReport)
    )
)]
pub async fn validate_handler(
    State(state): State<AppState>,
    Json(input): Json<ValidateIn>,
) -> (StatusCode, Json<ValidationReport>) {
    let grid = match state.grid_for(input.max_lectures) {
        Ok(g) => g,
        Err(e) => {
            return (StatusCode::OK, Json(ValidationReport { ok: false, errors: vec![e.to_string()] }))
        }
    };
    match validate_demands(&input.demands, &grid) {
        Ok(()) => (StatusCode::OK, Json(ValidationReport { ok: true, errors: vec![] })),
        Err(ValidationError::Problems(errors)) => {
            (StatusCode::OK, Json(ValidationReport { ok: false, errors }))
        }
    }
}

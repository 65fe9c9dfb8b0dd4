use axum::{extract::{Path, State}, Json};
use crate::{error::ApiError, state::AppState};
use types::Allocation;

#[utoipa::path(
        get,
        path = "/v1/jobs/{id}",
        params(("id" = String, Path, description = "Job ID")),
        responses((status = 200, description = "Job status", body = jobs::JobStatus))
    )]
pub async fn status(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<serde_json::Value>, ApiError> {
    let st = state.jobs.get(&id);
    Ok(Json(match st {
        None => serde_json::json!({"status": "not_found"}),
        Some(s) => serde_json::to_value(s).map_err(ApiError::internal)?,
    }))
}

#[utoipa::path(
        get,
        path = "/v1/jobs/{id}/result",
        params(("id" = String, Path, description = "Job ID")),
        responses(
            (status = 200, description = "Allocation (if ready)", body = Allocation)
        )
    )]
pub async fn result(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<serde_json::Value>, ApiError> {
    let st = state.jobs.get(&id);
    Ok(Json(match st {
        Some(s) => match s.result() {
            Some(result) => serde_json::to_value(result).map_err(ApiError::internal)?,
            None => match &s {
                jobs::JobStatus::Failed { message } => serde_json::json!({"status": "failed", "message": message}),
                _ => serde_json::json!({"status": "not_ready"}),
            },
        },
        None => serde_json::json!({"status": "not_found"}),
    }))
}

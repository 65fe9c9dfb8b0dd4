use crate::{error::ApiError, state::AppState};
use axum::{extract::State, Json};
use types::AllocationRequest;
use utoipa::ToSchema;

#[derive(serde::Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobCreated {
    pub job_id: String,
    pub status: &'static str,
}

#[utoipa::path(
        post,
        path = "/v1/allocate",
        request_body = AllocationRequest,
        responses(
            (status = 200, description = "Allocation job enqueued", body = JobCreated),
            (status = 400, description = "Lecture count outside the grid")
        )
    )]
pub async fn allocate(
    State(state): State<AppState>,
    Json(req): Json<AllocationRequest>,
) -> Result<Json<JobCreated>, ApiError> {
    let id = state.jobs.enqueue(req).map_err(ApiError::bad_request)?;
    Ok(Json(JobCreated {
        job_id: id.0,
        status: "queued",
    }))
}

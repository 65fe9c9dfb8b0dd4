use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
    pub lectures_per_day: u8,
}

#[utoipa::path(
         get,
         path = "/v1/health",
         responses((status = 200, description = "Service is up", body = Health))
     )]
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        lectures_per_day: state.grid.max_lectures(),
    })
}

use axum::{extract::State, Json};
use serde::Serialize;
use types::{TimeBand, Weekday};
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GridInfo {
    pub days: Vec<Weekday>,
    pub lectures_per_day: u8,
    pub bells: Vec<TimeBand>,
}

#[utoipa::path(
    get,
    path = "/v1/grid",
    responses((status = 200, description = "Teaching days, lectures per day and bell times", body = GridInfo))
)]
pub async fn grid(State(state): State<AppState>) -> Json<GridInfo> {
    Json(GridInfo {
        days: Weekday::ALL.to_vec(),
        lectures_per_day: state.grid.max_lectures(),
        bells: state.bells.bands(&state.grid),
    })
}

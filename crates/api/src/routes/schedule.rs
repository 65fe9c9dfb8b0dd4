use std::collections::BTreeMap;

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use timetable_core::view::{by_class, by_teacher, teacher_load};
use types::{Assignment, TeacherLoad};

#[derive(Deserialize, ToSchema)]
pub struct ScheduleIn {
    pub assignments: Vec<Assignment>,
}

#[derive(Serialize, ToSchema)]
pub struct Grouped {
    pub groups: BTreeMap<String, Vec<Assignment>>,
}

#[derive(Serialize, ToSchema)]
pub struct Loads {
    pub teachers: BTreeMap<String, TeacherLoad>,
}

#[utoipa::path(
    post,
    path = "/v1/schedule/by-class",
    request_body = ScheduleIn,
    responses((status = 200, description = "Assignments grouped per class in slot order", body = Grouped))
)]
pub async fn class_view(Json(input): Json<ScheduleIn>) -> Json<Grouped> {
    let groups = by_class(&input.assignments)
        .into_iter()
        .map(|(k, v)| (k.0, v))
        .collect();
    Json(Grouped { groups })
}

#[utoipa::path(
    post,
    path = "/v1/schedule/by-teacher",
    request_body = ScheduleIn,
    responses((status = 200, description = "Assignments grouped per teacher in slot order", body = Grouped))
)]
pub async fn teacher_view(Json(input): Json<ScheduleIn>) -> Json<Grouped> {
    let groups = by_teacher(&input.assignments)
        .into_iter()
        .map(|(k, v)| (k.0, v))
        .collect();
    Json(Grouped { groups })
}

#[utoipa::path(
    post,
    path = "/v1/schedule/teacher-load",
    request_body = ScheduleIn,
    responses((status = 200, description = "Lectures per week and per day for each teacher", body = Loads))
)]
pub async fn load(Json(input): Json<ScheduleIn>) -> Json<Loads> {
    let teachers = teacher_load(&input.assignments)
        .into_iter()
        .map(|(k, v)| (k.0, v))
        .collect();
    Json(Loads { teachers })
}

use axum::{http::StatusCode, response::{IntoResponse, Response}};

#[derive(Debug)]
pub struct ApiError(pub StatusCode, pub String);

impl ApiError {
    pub fn bad_request(msg: impl ToString) -> Self { Self(StatusCode::BAD_REQUEST, msg.to_string()) }
    pub fn conflict(msg: impl ToString) -> Self { Self(StatusCode::CONFLICT, msg.to_string()) }
    pub fn internal(msg: impl ToString) -> Self { Self(StatusCode::INTERNAL_SERVER_ERROR, msg.to_string()) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response { (self.0, self.1).into_response() }
}

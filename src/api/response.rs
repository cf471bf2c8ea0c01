use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// Internal handler envelope: a status code plus the value that becomes the
/// JSON body. Handlers assemble replies; the HTTP translation happens once,
/// here, at the boundary.
#[derive(Debug)]
pub struct ApiReply<T: Serialize> {
    pub status_code: StatusCode,
    pub data: T,
}

impl<T: Serialize> ApiReply<T> {
    /// A 200 OK reply
    pub fn ok(data: T) -> Self {
        Self {
            status_code: StatusCode::OK,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiReply<T> {
    fn into_response(self) -> Response {
        (self.status_code, Json(self.data)).into_response()
    }
}

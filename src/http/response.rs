//! JSON response writing for operation outcomes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::oauth::types::{InternalServerErrorBody, ResponseSet};

pub(crate) const RESPONSE_NOT_SET: &str = "Handler implementation did not set a response.";

pub fn write_json<B: Serialize>(status: StatusCode, body: &B) -> Response {
    (status, Json(body)).into_response()
}

impl<T: Serialize, E: Serialize> IntoResponse for ResponseSet<T, E> {
    fn into_response(self) -> Response {
        match self {
            ResponseSet::Ok(body) => write_json(StatusCode::OK, &body),
            ResponseSet::BadRequest(body) => write_json(StatusCode::BAD_REQUEST, &body),
            ResponseSet::InternalServerError(body) => {
                write_json(StatusCode::INTERNAL_SERVER_ERROR, &body)
            }
            ResponseSet::Unset => {
                tracing::error!("handler returned without setting a response");
                write_json(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &InternalServerErrorBody {
                        error_message: RESPONSE_NOT_SET.to_string(),
                    },
                )
            }
        }
    }
}

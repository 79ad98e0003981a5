use core::str::FromStr;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use stockyard_core::{DomainError, DomainResult};

use crate::app::errors;

/// Parse a path identifier, mapping failures to `400 invalid_id`.
pub fn parse_id<T>(raw: &str) -> Result<T, Response>
where
    T: FromStr<Err = DomainError>,
{
    raw.parse().map_err(errors::domain_error_to_response)
}

/// Unwrap a JSON body, mapping malformed payloads to `400 validation_error`.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    body.map(|Json(v)| v)
        .map_err(|e| errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.body_text()))
}

/// Unwrap query parameters, mapping malformed input to `400 validation_error`.
pub fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, Response> {
    query
        .map(|Query(v)| v)
        .map_err(|e| errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.body_text()))
}

/// Serialize a domain result with `status`, or map the domain error.
pub fn respond<T: Serialize>(status: StatusCode, result: DomainResult<T>) -> Response {
    match result {
        Ok(v) => (status, Json(v)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub mod accounts;
pub mod state;
pub mod venues;

// Re-export the router entry points
pub use state::{build_router, AppState};

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::modules::accounts::validate::FieldError;

/// Caller-facing status payload shared by most endpoints
#[derive(Serialize, Debug)]
pub struct StatusReply {
    pub status: &'static str,
    pub message: String,
}

/// Payload describing rejected input fields
#[derive(Serialize, Debug)]
pub struct ValidationReply {
    pub status: &'static str,
    pub errors: Vec<FieldError>,
}

/// Reply for input that failed validation
pub(crate) fn validation_reply(errors: Vec<FieldError>) -> (StatusCode, Json<ValidationReply>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ValidationReply {
            status: "invalid",
            errors,
        }),
    )
}

/// Reply for infrastructure failures; details go to the log, not the caller
pub(crate) fn internal_error_reply() -> (StatusCode, Json<StatusReply>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(StatusReply {
            status: "error",
            message: "Something went wrong on our side. Please try again later.".to_string(),
        }),
    )
}

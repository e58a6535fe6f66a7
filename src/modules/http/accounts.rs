use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::state::AppState;
use super::{internal_error_reply, validation_reply, StatusReply};
use crate::modules::accounts::confirm::{ConfirmationOutcome, TokenLookup};
use crate::modules::accounts::register::RegistrationOutcome;
use crate::modules::accounts::validate::{validate_confirmation, validate_registration};

/// Body of a POST /confirm request
#[derive(Deserialize, Debug)]
pub struct ConfirmationRequest {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub password: String,
}

/// Query parameters of a GET /confirm probe
#[derive(Deserialize, Debug)]
pub struct ProbeParams {
    pub token: Option<String>,
}

/// Body of a GET /confirm probe response
#[derive(Serialize, Debug)]
pub struct ProbeReply {
    pub valid: bool,
}

/// Handler for POST /register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Map<String, Value>>,
) -> Response {
    let input = match validate_registration(payload) {
        Ok(input) => input,
        Err(errors) => return validation_reply(errors).into_response(),
    };

    match state.registration.register(input).await {
        Ok(outcome) => registration_reply(outcome).into_response(),
        Err(e) => {
            error!("Registration failed: {}", e);
            internal_error_reply().into_response()
        }
    }
}

/// Handler for GET /confirm, a read-only token probe
pub async fn probe_confirmation(
    State(state): State<AppState>,
    Query(params): Query<ProbeParams>,
) -> Response {
    let token = match params.token {
        Some(token) => token,
        None => return (StatusCode::OK, Json(ProbeReply { valid: false })).into_response(),
    };

    match state.confirmation.lookup_token(&token).await {
        Ok(lookup) => {
            let valid = matches!(lookup, TokenLookup::Valid(_));
            (StatusCode::OK, Json(ProbeReply { valid })).into_response()
        }
        Err(e) => {
            error!("Token probe failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ProbeReply { valid: false }),
            )
                .into_response()
        }
    }
}

/// Handler for POST /confirm
pub async fn confirm(
    State(state): State<AppState>,
    Json(request): Json<ConfirmationRequest>,
) -> Response {
    let input = match validate_confirmation(&request.token, &request.password) {
        Ok(input) => input,
        Err(errors) => return validation_reply(errors).into_response(),
    };

    match state.confirmation.confirm(&input.token, &input.password).await {
        Ok(outcome) => confirmation_reply(outcome).into_response(),
        Err(e) => {
            error!("Confirmation failed: {}", e);
            internal_error_reply().into_response()
        }
    }
}

/// Map a registration outcome onto the wire contract
fn registration_reply(outcome: RegistrationOutcome) -> (StatusCode, Json<StatusReply>) {
    match outcome {
        RegistrationOutcome::Pending { message, .. } => (
            StatusCode::OK,
            Json(StatusReply {
                status: "pending",
                message,
            }),
        ),
        RegistrationOutcome::AlreadyRegistered { message, .. } => (
            StatusCode::CONFLICT,
            Json(StatusReply {
                status: "already_registered",
                message,
            }),
        ),
    }
}

/// Map a confirmation outcome onto the wire contract
///
/// Replays and unknown tokens are reported identically; only the logs
/// keep them apart.
fn confirmation_reply(outcome: ConfirmationOutcome) -> (StatusCode, Json<StatusReply>) {
    match outcome {
        ConfirmationOutcome::Confirmed { message, .. } => (
            StatusCode::OK,
            Json(StatusReply {
                status: "confirmed",
                message,
            }),
        ),
        ConfirmationOutcome::InvalidToken { message }
        | ConfirmationOutcome::AlreadyConfirmed { message } => (
            StatusCode::BAD_REQUEST,
            Json(StatusReply {
                status: "invalid_token",
                message,
            }),
        ),
    }
}

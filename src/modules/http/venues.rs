use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde::{Deserialize, Serialize};

use super::state::AppState;
use super::{internal_error_reply, validation_reply, StatusReply};
use crate::modules::accounts::validate::FieldError;
use crate::modules::venues::model::{NewVenue, Venue};
use crate::DEFAULT_PAGE_SIZE;

/// Query parameters of a GET /venues listing
#[derive(Deserialize, Debug)]
pub struct PageParams {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

/// Body of a GET /venues listing response
#[derive(Serialize, Debug)]
pub struct VenuePage {
    pub venues: Vec<Venue>,
    pub total: usize,
}

/// Handler for GET /venues
pub async fn list_venues(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Json<VenuePage> {
    let offset = params.offset.unwrap_or(0);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE);

    let (venues, total) = state.venues.list(offset, limit).await;
    Json(VenuePage { venues, total })
}

/// Handler for GET /venues/{id}
pub async fn get_venue(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    match state.venues.get(id).await {
        Some(venue) => (StatusCode::OK, Json(venue)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(StatusReply {
                status: "not_found",
                message: format!("No venue with id {}", id),
            }),
        )
            .into_response(),
    }
}

/// Handler for POST /venues
pub async fn create_venue(
    State(state): State<AppState>,
    Json(new_venue): Json<NewVenue>,
) -> Response {
    if new_venue.name.trim().is_empty() {
        return validation_reply(vec![FieldError::new("name", "venue name must not be empty")])
            .into_response();
    }

    match state.venues.create(new_venue).await {
        Ok(venue) => (StatusCode::CREATED, Json(venue)).into_response(),
        Err(e) => {
            error!("Venue creation failed: {}", e);
            internal_error_reply().into_response()
        }
    }
}

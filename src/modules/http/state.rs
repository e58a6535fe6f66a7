use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use super::{accounts, venues};
use crate::modules::accounts::confirm::ConfirmationService;
use crate::modules::accounts::register::RegistrationService;
use crate::modules::utils::time::{format_timestamp, get_current_timestamp};
use crate::modules::venues::store::VenueStore;

/// Shared handles available to every request handler
#[derive(Clone)]
pub struct AppState {
    pub registration: Arc<RegistrationService>,
    pub confirmation: Arc<ConfirmationService>,
    pub venues: Arc<VenueStore>,
}

/// Function to assemble the full request router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(accounts::register))
        .route(
            "/confirm",
            get(accounts::probe_confirmation).post(accounts::confirm),
        )
        .route("/venues", get(venues::list_venues).post(venues::create_venue))
        .route("/venues/{id}", get(venues::get_venue))
        .route("/health", get(health))
        .with_state(state)
}

/// Liveness probe
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "time": format_timestamp(get_current_timestamp()),
    }))
}

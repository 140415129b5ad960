use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use serde::{Deserialize, Serialize};

use crate::chain::EventWriter;
use crate::state::AppState;
use crate::utils::response::success;

pub mod landing;
pub mod wizard;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

/// Optional wallet address sent by the client.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WalletParam {
    pub address: Option<String>,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "zkonnect-api",
    };

    success(payload, "Health check successful")
}

pub async fn theme<W: EventWriter>(State(state): State<Arc<AppState<W>>>) -> Response {
    success(state.theme.clone(), "Theme settings")
}

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use uuid::Uuid;

use crate::chain::EventWriter;
use crate::handlers::WalletParam;
use crate::models::Connection;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};
use crate::wizard::{Advance, StepUpdate};

type AppStateRef<W> = State<Arc<AppState<W>>>;

pub async fn open_wizard<W: EventWriter>(
    State(state): AppStateRef<W>,
    Json(param): Json<WalletParam>,
) -> Result<Response, AppError> {
    let connection = Connection::from_param(param.address.as_deref())?;
    let session = state.open_wizard(connection)?;
    Ok(created(session.view()?, "Wizard opened"))
}

pub async fn show_wizard<W: EventWriter>(
    State(state): AppStateRef<W>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let session = state.sessions.get(id)?;
    Ok(success(session.view()?, "Wizard state"))
}

pub async fn update_draft<W: EventWriter>(
    State(state): AppStateRef<W>,
    Path(id): Path<Uuid>,
    Json(update): Json<StepUpdate>,
) -> Result<Response, AppError> {
    let session = state.sessions.get(id)?;
    Ok(success(session.set_draft(update)?, "Draft updated"))
}

pub async fn next_step<W: EventWriter>(
    State(state): AppStateRef<W>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let session = state.sessions.get(id)?;
    let (outcome, view) = session.advance().await?;
    match outcome {
        Advance::Moved(step) => Ok(success(view, format!("Moved to {}", step.title()))),
        Advance::Submitted { tx_hash } => {
            state.sessions.discard(id);
            Ok(success(view, format!("Event created in transaction {tx_hash}")))
        }
        Advance::Rejected { message } => {
            let snapshot = serde_json::to_value(&view)
                .map_err(|e| AppError::InternalServerError(e.to_string()))?;
            Err(AppError::WriteRejected { message, snapshot })
        }
    }
}

pub async fn previous_step<W: EventWriter>(
    State(state): AppStateRef<W>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let session = state.sessions.get(id)?;
    let view = session.retreat()?;
    Ok(success(view, "Moved back"))
}

pub async fn close_wizard<W: EventWriter>(
    State(state): AppStateRef<W>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    state.sessions.close(id)?;
    Ok(empty_success("Wizard closed"))
}

//! Event creation wizard.
//!
//! Four fixed pages fill an [`EventDraft`]; advancing past the last page sends
//! `createEvent` through the injected [`EventWriter`]. Toasts and page changes
//! go out through [`Notifier`] and [`Navigator`].

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::chain::{EventWriter, WriteError};
use crate::models::transaction::ArgsError;
use crate::models::{Connection, CreateEventArgs, DraftIssue, EventDraft, Notification, Route};
use crate::utils::error::AppError;

pub mod effects;
pub mod session;
pub mod step;

pub use effects::{Effects, Navigator, Notifier, Outbox};
pub use session::{SessionStore, WizardSession};
pub use step::{Step, StepUpdate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Submission {
    Idle,
    Success { tx_hash: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardState {
    pub step: Step,
    pub draft: EventDraft,
    pub submission: Submission,
}

impl WizardState {
    pub fn new(draft: EventDraft) -> Self {
        Self {
            step: Step::BasicInfo,
            draft,
            submission: Submission::Idle,
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.submission, Submission::Success { .. })
    }
}

/// Result of a single `advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Moved(Step),
    Submitted { tx_hash: String },
    /// The write did not go through; step and draft are unchanged.
    Rejected { message: String },
}

#[derive(Debug, Error)]
enum SubmitError {
    #[error("Please connect your wallet")]
    NotConnected,
    #[error(transparent)]
    Args(#[from] ArgsError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

#[derive(Debug, Clone, Serialize)]
pub struct StepTab {
    pub number: u8,
    pub title: &'static str,
    pub active: bool,
}

/// Everything the client needs to render the wizard page.
#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    pub step: u8,
    pub title: &'static str,
    pub steps: Vec<StepTab>,
    pub can_go_back: bool,
    pub draft: EventDraft,
    pub submission: Submission,
    pub issues: Vec<String>,
    pub view_all: Option<Route>,
}

pub struct WizardController<W, N, R> {
    state: WizardState,
    connection: Connection,
    writer: Arc<W>,
    notifier: N,
    navigator: R,
}

impl<W, N, R> WizardController<W, N, R>
where
    W: EventWriter,
    N: Notifier,
    R: Navigator,
{
    pub fn new(
        draft: EventDraft,
        connection: Connection,
        writer: Arc<W>,
        notifier: N,
        navigator: R,
    ) -> Self {
        Self {
            state: WizardState::new(draft),
            connection,
            writer,
            notifier,
            navigator,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> Step {
        self.state.step
    }

    fn ensure_open(&self) -> Result<(), AppError> {
        if self.state.is_submitted() {
            return Err(AppError::Conflict("event has already been submitted".to_string()));
        }
        Ok(())
    }

    /// Merges an edit coming from the active page.
    pub fn set_draft(&mut self, update: StepUpdate) -> Result<(), AppError> {
        self.ensure_open()?;
        let target = update.step();
        if target != self.state.step {
            return Err(AppError::ValidationError(format!(
                "{} fields cannot be edited on the {} step",
                target.title(),
                self.state.step.title()
            )));
        }
        update.apply(&mut self.state.draft);
        Ok(())
    }

    pub fn retreat(&mut self) -> Result<Step, AppError> {
        self.ensure_open()?;
        if let Some(prev) = self.state.step.prev() {
            debug!(from = ?self.state.step, to = ?prev, "wizard step back");
            self.state.step = prev;
        }
        Ok(self.state.step)
    }

    pub async fn advance(&mut self) -> Result<Advance, AppError> {
        self.ensure_open()?;
        if let Some(next) = self.state.step.next() {
            debug!(from = ?self.state.step, to = ?next, "wizard step forward");
            self.state.step = next;
            return Ok(Advance::Moved(next));
        }

        match self.submit().await {
            Ok(tx_hash) => {
                info!(%tx_hash, "createEvent transaction mined");
                self.notifier.notify(Notification::success(format!(
                    "Event creation transaction sent! Hash: {tx_hash}"
                )));
                self.state.submission = Submission::Success {
                    tx_hash: tx_hash.clone(),
                };
                self.navigator.navigate(Route::Events);
                Ok(Advance::Submitted { tx_hash })
            }
            Err(e) => {
                warn!(error = %e, "Failed to create event");
                let message = format!("Failed to create event: {e}");
                self.notifier.notify(Notification::error(message.clone()));
                Ok(Advance::Rejected { message })
            }
        }
    }

    async fn submit(&self) -> Result<String, SubmitError> {
        let sender = self.connection.address().ok_or(SubmitError::NotConnected)?;
        let args = CreateEventArgs::try_from(&self.state.draft)?;
        Ok(self.writer.create_event(sender, args).await?)
    }

    /// "View All" target, offered once the event is on chain.
    pub fn view_all_route(&self) -> Option<Route> {
        match (self.state.is_submitted(), self.connection.address()) {
            (true, Some(organizer)) => Some(Route::ViewAll { organizer }),
            _ => None,
        }
    }

    pub fn draft_issues(&self) -> Vec<DraftIssue> {
        self.state.draft.issues()
    }

    pub fn view(&self) -> WizardView {
        let current = self.state.step;
        WizardView {
            step: current.number(),
            title: current.title(),
            steps: Step::ALL
                .iter()
                .map(|s| StepTab {
                    number: s.number(),
                    title: s.title(),
                    active: *s == current,
                })
                .collect(),
            can_go_back: current.prev().is_some(),
            draft: self.state.draft.clone(),
            submission: self.state.submission.clone(),
            issues: self.draft_issues().iter().map(ToString::to_string).collect(),
            view_all: self.view_all_route(),
        }
    }
}

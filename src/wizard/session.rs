use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::chain::EventWriter;
use crate::models::{Connection, EventDraft};
use crate::utils::error::AppError;
use crate::wizard::{Advance, Effects, Outbox, StepUpdate, WizardController, WizardView};

type Controller<W> = WizardController<W, Outbox, Outbox>;

/// Sessions untouched for this long are dropped.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Response payload for every wizard call.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub mining: bool,
    #[serde(flatten)]
    pub wizard: WizardView,
    #[serde(flatten)]
    pub effects: Effects,
}

/// One wizard instance of one browser tab.
pub struct WizardSession<W> {
    id: Uuid,
    controller: Mutex<Controller<W>>,
    outbox: Outbox,
    mining: AtomicBool,
    closed: AtomicBool,
    touched: std::sync::Mutex<Instant>,
    snapshot: RwLock<WizardView>,
}

/// Clears the mining flag however the write ends.
struct MiningGuard<'a>(&'a AtomicBool);

impl<'a> MiningGuard<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for MiningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("wizard session '{id}' was not found"))
}

impl<W: EventWriter> WizardSession<W> {
    fn new(id: Uuid, draft: EventDraft, connection: Connection, writer: Arc<W>) -> Self {
        let outbox = Outbox::new();
        let controller =
            WizardController::new(draft, connection, writer, outbox.clone(), outbox.clone());
        let snapshot = RwLock::new(controller.view());
        Self {
            id,
            controller: Mutex::new(controller),
            outbox,
            mining: AtomicBool::new(false),
            closed: AtomicBool::new(false),
            touched: std::sync::Mutex::new(Instant::now()),
            snapshot,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_mining(&self) -> bool {
        self.mining.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        *self.touched.lock().unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    fn idle_for(&self) -> Duration {
        self.touched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .elapsed()
    }

    /// Last rendered state. Never waits on an in-flight write and leaves
    /// pending effects to the action that produced them.
    pub fn view(&self) -> Result<SessionView, AppError> {
        self.touch();
        let wizard = self
            .snapshot
            .read()
            .map_err(|_| AppError::InternalServerError("wizard snapshot lock poisoned".into()))?
            .clone();
        Ok(SessionView {
            id: self.id,
            mining: self.is_mining(),
            wizard,
            effects: Effects::default(),
        })
    }

    // One action at a time per session; a second caller is turned away
    // instead of queueing behind a pending submission.
    fn acquire(&self) -> Result<MutexGuard<'_, Controller<W>>, AppError> {
        let controller = self.controller.try_lock().map_err(|_| {
            if self.is_mining() {
                AppError::Conflict("event creation is already in progress".to_string())
            } else {
                AppError::Conflict("wizard is busy, retry the action".to_string())
            }
        })?;
        if self.closed.load(Ordering::SeqCst) {
            return Err(not_found(self.id));
        }
        self.touch();
        Ok(controller)
    }

    /// Marks the session closed unless an action is running on it.
    fn retire(&self) -> Result<(), AppError> {
        let _controller = self.acquire()?;
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Stores the new snapshot and hands the queued effects to the caller.
    /// Only called by the action holding the controller.
    fn refresh(&self, controller: &Controller<W>) -> Result<SessionView, AppError> {
        let wizard = controller.view();
        *self
            .snapshot
            .write()
            .map_err(|_| AppError::InternalServerError("wizard snapshot lock poisoned".into()))? =
            wizard.clone();
        Ok(SessionView {
            id: self.id,
            mining: false,
            wizard,
            effects: self.outbox.drain(),
        })
    }

    pub fn set_draft(&self, update: StepUpdate) -> Result<SessionView, AppError> {
        let mut controller = self.acquire()?;
        controller.set_draft(update)?;
        self.refresh(&controller)
    }

    pub fn retreat(&self) -> Result<SessionView, AppError> {
        let mut controller = self.acquire()?;
        controller.retreat()?;
        self.refresh(&controller)
    }

    pub async fn advance(&self) -> Result<(Advance, SessionView), AppError> {
        let mut controller = self.acquire()?;
        // Held until the snapshot reflects the outcome of the write.
        let _mining = controller
            .step()
            .next()
            .is_none()
            .then(|| MiningGuard::raise(&self.mining));
        let outcome = controller.advance().await?;
        let view = self.refresh(&controller)?;
        Ok((outcome, view))
    }
}

/// In-memory wizard sessions. Nothing survives a restart.
pub struct SessionStore<W> {
    sessions: RwLock<HashMap<Uuid, Arc<WizardSession<W>>>>,
    idle_timeout: Duration,
}

impl<W> Default for SessionStore<W> {
    fn default() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

impl<W: EventWriter> SessionStore<W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            idle_timeout,
            ..Self::default()
        }
    }

    fn poisoned() -> AppError {
        AppError::InternalServerError("session store lock poisoned".into())
    }

    pub fn open(
        &self,
        draft: EventDraft,
        connection: Connection,
        writer: Arc<W>,
    ) -> Result<Arc<WizardSession<W>>, AppError> {
        self.evict_idle();
        let id = Uuid::new_v4();
        let session = Arc::new(WizardSession::new(id, draft, connection, writer));
        self.sessions
            .write()
            .map_err(|_| Self::poisoned())?
            .insert(id, session.clone());
        tracing::info!(%id, connected = connection.is_connected(), "wizard session opened");
        Ok(session)
    }

    pub fn get(&self, id: Uuid) -> Result<Arc<WizardSession<W>>, AppError> {
        self.sessions
            .read()
            .map_err(|_| Self::poisoned())?
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Navigation away from the wizard. Refused while an action, including a
    /// pending submission, is running on the session.
    pub fn close(&self, id: Uuid) -> Result<(), AppError> {
        let session = self.get(id)?;
        session.retire()?;
        self.sessions.write().map_err(|_| Self::poisoned())?.remove(&id);
        tracing::info!(%id, "wizard session closed");
        Ok(())
    }

    /// Drops a finished session. Already gone is fine.
    pub fn discard(&self, id: Uuid) {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
        if let Some(session) = removed {
            session.closed.store(true, Ordering::SeqCst);
            tracing::info!(%id, "wizard session finished");
        }
    }

    /// Removes sessions idle for longer than the timeout. Busy sessions are
    /// kept. Returns how many were dropped.
    pub fn evict_idle(&self) -> usize {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, session| {
            session.idle_for() < self.idle_timeout
                || matches!(session.retire(), Err(AppError::Conflict(_)))
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, remaining = sessions.len(), "idle wizard sessions evicted");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

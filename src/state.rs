use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::chain::EventWriter;
use crate::config::theme::ThemeSettings;
use crate::config::Config;
use crate::models::{Connection, EventDraft};
use crate::utils::error::AppError;
use crate::wizard::{SessionStore, WizardSession};

pub struct AppState<W> {
    pub config: Config,
    pub writer: Arc<W>,
    pub sessions: SessionStore<W>,
    pub theme: ThemeSettings,
}

impl<W: EventWriter> AppState<W> {
    pub fn new(config: Config, writer: W) -> Self {
        Self {
            writer: Arc::new(writer),
            sessions: SessionStore::with_idle_timeout(Duration::from_secs(
                config.session_idle_secs,
            )),
            theme: ThemeSettings::default(),
            config,
        }
    }

    /// Starts a wizard with the configured form defaults.
    pub fn open_wizard(&self, connection: Connection) -> Result<Arc<WizardSession<W>>, AppError> {
        let draft = EventDraft::new(self.config.default_media_ref.clone());
        self.sessions.open(draft, connection, self.writer.clone())
    }
}

/// Periodically drops wizard sessions nobody has touched for a while.
pub fn spawn_session_sweeper<W: EventWriter>(
    state: Arc<AppState<W>>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let evicted = state.sessions.evict_idle();
            tracing::debug!(evicted, "session sweep");
        }
    })
}

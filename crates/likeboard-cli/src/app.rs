//! Wiring of the client components for one CLI invocation.

use crate::terminal::{TerminalNavigator, TerminalNotifier};
use anyhow::{Context, Result};
use likeboard_application::{DirectoryView, LikeActions, LikeLedger, SessionStore};
use likeboard_core::navigation::View;
use likeboard_infrastructure::{ConfigLoader, JsonFileStore, LikeboardConfig, LikeboardPaths};
use likeboard_interaction::ReqwestTransport;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt};

/// Loads the config file and environment, then applies CLI overrides.
pub fn load_config(path: Option<PathBuf>, api_url: Option<String>) -> Result<LikeboardConfig> {
    let mut loader = ConfigLoader::new(LikeboardPaths::default());
    if let Some(path) = path {
        loader = loader.with_path(path);
    }

    let mut config = loader.load().context("Failed to load configuration")?;
    if let Some(url) = api_url {
        config.api.base_url = url;
    }
    if config.storage.session_file.is_none() {
        config.storage.session_file = Some(loader.session_file(&config)?);
    }
    Ok(config)
}

/// Logs to stderr. `RUST_LOG` wins over the configured level.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub struct App {
    pub config: LikeboardConfig,
    pub session: Arc<SessionStore>,
    pub notifier: Arc<TerminalNotifier>,
}

impl App {
    pub fn build(config: LikeboardConfig) -> Result<Self> {
        let session_file = config
            .storage
            .session_file
            .clone()
            .context("No session file location")?;
        tracing::debug!(
            path = %session_file.display(),
            base_url = config.base_url(),
            "Building client"
        );

        let storage = Arc::new(JsonFileStore::new(session_file));
        let transport = Arc::new(
            ReqwestTransport::new(config.base_url())
                .with_timeout(Duration::from_secs(config.api.timeout_secs)),
        );
        let navigator = Arc::new(TerminalNavigator);
        let session = Arc::new(SessionStore::load(storage, transport, navigator));

        Ok(Self {
            config,
            session,
            notifier: Arc::new(TerminalNotifier),
        })
    }

    pub fn ledger(&self) -> LikeLedger {
        LikeLedger::new(self.session.clone()).with_quota(self.config.likes.quota)
    }

    pub fn directory(&self) -> DirectoryView {
        DirectoryView::new(self.session.clone(), self.notifier.clone())
    }

    pub fn like_actions(&self) -> LikeActions {
        LikeActions::new(self.notifier.clone())
    }

    /// Applies the routing policy for a command that shows `view`.
    ///
    /// Returns `false` when the session store redirected elsewhere.
    pub async fn enter(&self, view: View) -> bool {
        self.session.route(view).await.is_none()
    }
}

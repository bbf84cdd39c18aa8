use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, bail};
use tracing::info;

use postcord_core::{MarkerConfig, Settings};
use postcord_discord::{DispatchServices, HttpTransport};
use postcord_provider::{DynTransport, LogTransport};
use postcord_state::MarkerStore;
use postcord_state_file::FileMarkerStore;
use postcord_state_memory::MemoryMarkerStore;

/// Global options shared by every command.
#[derive(Debug)]
pub struct Options {
    pub config: PathBuf,
    pub token: Option<String>,
    pub dry_run: bool,
}

impl Options {
    /// Load settings and apply command-line overrides.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = Settings::load(&self.config)
            .with_context(|| format!("failed to load {}", self.config.display()))?;
        if let Some(token) = &self.token {
            settings.bot.token.clone_from(token);
        }
        Ok(settings)
    }

    /// Build the dispatch services described by the configuration.
    pub fn services(&self) -> anyhow::Result<DispatchServices> {
        let settings = Arc::new(self.settings()?);

        let transport: Arc<dyn DynTransport> = if self.dry_run {
            info!("dry run: requests are logged, not sent");
            Arc::new(LogTransport::new())
        } else {
            Arc::new(HttpTransport::from_settings(&settings.http))
        };
        let markers = marker_store(&settings.markers)?;

        Ok(DispatchServices::new(settings, transport, markers))
    }
}

/// Create the marker backend named in the configuration.
pub fn marker_store(config: &MarkerConfig) -> anyhow::Result<Arc<dyn MarkerStore>> {
    match config.backend.as_str() {
        "memory" => Ok(Arc::new(MemoryMarkerStore::new())),
        "file" => {
            let path = config.path.as_deref().unwrap_or("postcord-markers.json");
            Ok(Arc::new(FileMarkerStore::new(path)))
        }
        other => bail!("unknown marker backend: {other}"),
    }
}

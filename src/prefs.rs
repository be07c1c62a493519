//! Storage for the lyrics display-mode preference.
//!
//! The synchronizer never touches storage itself; hosts read the mode once at
//! startup with [`restore`] and write it back after every mode change.

use crate::config::{self, Config};
use crate::lyrics::DisplayMode;
use std::path::PathBuf;

pub trait ModePreference {
    fn load(&self) -> anyhow::Result<Option<DisplayMode>>;
    fn store(&mut self, mode: DisplayMode) -> anyhow::Result<()>;
}

/// Mode to start with: the stored preference, or synced.
pub fn restore(pref: &dyn ModePreference) -> DisplayMode {
    match pref.load() {
        Ok(Some(mode)) => mode,
        Ok(None) => DisplayMode::default(),
        Err(e) => {
            tracing::warn!("lyrics mode preference unavailable: {e:#}");
            DisplayMode::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPreference {
    mode: Option<DisplayMode>,
}

impl MemoryPreference {
    pub fn new(mode: Option<DisplayMode>) -> Self {
        Self { mode }
    }
}

impl ModePreference for MemoryPreference {
    fn load(&self) -> anyhow::Result<Option<DisplayMode>> {
        Ok(self.mode)
    }

    fn store(&mut self, mode: DisplayMode) -> anyhow::Result<()> {
        self.mode = Some(mode);
        Ok(())
    }
}

/// Keeps the mode in the `[lyrics]` section of the config file.
#[derive(Debug, Clone)]
pub struct ConfigPreference {
    cfg: Config,
    path: PathBuf,
}

impl ConfigPreference {
    pub fn new(cfg: Config, path: PathBuf) -> Self {
        Self { cfg, path }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }
}

impl ModePreference for ConfigPreference {
    fn load(&self) -> anyhow::Result<Option<DisplayMode>> {
        Ok(self.cfg.lyrics.mode)
    }

    fn store(&mut self, mode: DisplayMode) -> anyhow::Result<()> {
        if self.cfg.lyrics.mode == Some(mode) {
            return Ok(());
        }
        self.cfg.lyrics.mode = Some(mode);
        config::save(&self.cfg, Some(&self.path))
    }
}

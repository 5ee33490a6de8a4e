use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::paths;

/// Persisted user settings.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    /// Directory wallpaper images are listed from, overriding the defaults.
    pub wallpapers_path: Option<String>,
}

impl Config {
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(paths::backdrop_config_dir()?.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let s = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&s).context("parsing config toml")
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("creating config directory")?;
        }

        let toml = toml::to_string_pretty(self).context("serializing config to toml")?;
        fs::write(path, toml).context("writing config file")?;
        Ok(())
    }

    /// Remember a wallpapers directory override for later runs.
    pub fn set_wallpapers_path(&mut self, path: &str) -> Result<()> {
        let expanded = shellexpand::tilde(path).to_string();
        self.wallpapers_path = Some(expanded);
        self.save()
    }
}

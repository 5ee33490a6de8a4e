//! Centralized path management for backdrop.
//!
//! Single source of truth for the config directory and the wallpapers
//! directory resolution chain.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::errors::BackdropError;

/// Get the backdrop config directory, creating it if missing.
pub fn backdrop_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Unable to determine user config directory")?
        .join("backdrop");

    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("creating config directory at {}", config_dir.display()))?;

    Ok(config_dir)
}

/// Resolve the directory wallpaper images are listed from.
///
/// Order: the configured override (when it is an existing directory), then
/// `<config>/backdrop/wallpapers`, then `<pictures>/wallpapers`.
pub fn resolve_wallpapers_dir(configured: Option<&str>) -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Unable to determine user config directory")?;
    let pictures_dir = dirs::picture_dir();
    resolve_from(configured, &config_dir, pictures_dir.as_deref())
}

fn resolve_from(
    configured: Option<&str>,
    config_dir: &Path,
    pictures_dir: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(configured) = configured {
        let path = PathBuf::from(configured);
        if path.is_dir() {
            return Ok(path);
        }
    }

    let default = config_dir.join("backdrop").join("wallpapers");
    if default.is_dir() {
        return Ok(default);
    }

    if let Some(pictures) = pictures_dir {
        let fallback = pictures.join("wallpapers");
        if fallback.is_dir() {
            return Ok(fallback);
        }
    }

    Err(BackdropError::NoWallpapersDir.into())
}

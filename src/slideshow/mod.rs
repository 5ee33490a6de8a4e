//! Slideshow composition.
//!
//! Materializes the rotation configuration consumed by the desktop
//! environment's own slideshow engine. Rotation timing is the engine's job;
//! backdrop only writes the artifacts and, where possible, activates them
//! like a single wallpaper.

pub mod gnome;
pub mod windows;

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::errors::BackdropError;
use crate::wallpaper::{DesktopBackend, WallpaperRef};

/// Ordered set of slides plus the per-slide duration in seconds.
///
/// The sequence is a closed cycle: the last image always transitions back to
/// the first, including the degenerate single-image self-loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideshowSpec {
    images: Vec<String>,
    duration_secs: u32,
}

impl SlideshowSpec {
    /// Rejects an empty image list and a zero duration before any filesystem
    /// effect, so a malformed descriptor can never be emitted.
    pub fn new(images: Vec<String>, duration_secs: u32) -> Result<Self> {
        if images.is_empty() {
            return Err(BackdropError::EmptySlideshow.into());
        }
        if duration_secs == 0 {
            return Err(BackdropError::InvalidDuration.into());
        }
        Ok(Self {
            images,
            duration_secs,
        })
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }
}

/// On-disk result of composing a slideshow.
///
/// Artifacts are replaced wholesale on every activation and intentionally
/// left behind on revert, so the desktop can resume the rotation later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideshowArtifact {
    /// GNOME-family rotation descriptor, settable like a single wallpaper.
    Descriptor(PathBuf),
    /// Windows slide directory plus synthesized theme file. Activation
    /// happens during composition; the theme pack has no form the wallpaper
    /// backend can set.
    ThemePack {
        slide_dir: PathBuf,
        theme_file: PathBuf,
    },
}

impl SlideshowArtifact {
    /// Reference the wallpaper backend can apply, when one exists.
    pub fn as_wallpaper(&self) -> Option<WallpaperRef> {
        match self {
            Self::Descriptor(path) => Some(WallpaperRef::from_path(path)),
            Self::ThemePack { .. } => None,
        }
    }
}

/// Compose the platform rotation configuration for `spec`, with image names
/// resolved against `wallpapers_dir`.
pub fn compose(
    backend: DesktopBackend,
    spec: &SlideshowSpec,
    wallpapers_dir: &Path,
) -> Result<SlideshowArtifact> {
    match backend {
        DesktopBackend::Gnome | DesktopBackend::Mate => gnome::compose(spec, wallpapers_dir),
        DesktopBackend::Windows => windows::compose(spec, wallpapers_dir),
    }
}

//! Desktop-environment wallpaper backends.
//!
//! The environment is detected once at startup and every later read or write
//! of the active wallpaper dispatches through [`DesktopBackend`].

pub mod gnome;
mod gsettings;
pub mod mate;
pub mod windows;

use std::fmt;
use std::path::Path;

use anyhow::Result;

use crate::errors::BackdropError;

/// Platform-native identifier of the current desktop background.
///
/// A bare filesystem path on GNOME/MATE (the URI scheme is stripped on read
/// and re-added on write), a raw file path on Windows. Only the backend that
/// produced a reference interprets its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallpaperRef(String);

impl WallpaperRef {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn from_path(path: &Path) -> Self {
        Self(path.to_string_lossy().into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WallpaperRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Desktop environments backdrop knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopEnvironment {
    /// GNOME-family desktop with light and dark picture URIs.
    GnomeLike,
    /// MATE desktop with a single picture URI.
    MateLike,
    Windows,
    /// Recognized host, no wallpaper support.
    Unsupported,
}

impl DesktopEnvironment {
    /// Detect the desktop environment for this process.
    ///
    /// Read-only: on Linux this queries the registered gsettings schemas and
    /// nothing else. A missing `gsettings` binary is reported as
    /// [`BackdropError::CommandNotFound`], which callers must keep
    /// distinguishable from an unsupported platform.
    pub fn detect() -> Result<Self> {
        if cfg!(target_os = "windows") {
            return Ok(Self::Windows);
        }
        if !cfg!(target_os = "linux") {
            return Ok(Self::Unsupported);
        }

        let schemas = gsettings::list_schemas()?;
        classify_schemas(&schemas)
            .ok_or_else(|| BackdropError::NoCompatibleDesktopEnvironment.into())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::GnomeLike => "GNOME",
            Self::MateLike => "MATE",
            Self::Windows => "Windows",
            Self::Unsupported => "unsupported",
        }
    }
}

fn classify_schemas(schemas: &str) -> Option<DesktopEnvironment> {
    if schemas.contains("gnome.desktop.background") {
        Some(DesktopEnvironment::GnomeLike)
    } else if schemas.contains("mate.desktop.background") {
        Some(DesktopEnvironment::MateLike)
    } else {
        None
    }
}

/// Read/write access to the active wallpaper.
///
/// The selection loop only depends on this seam, so tests can substitute an
/// in-memory store for the real desktop.
pub trait WallpaperStore {
    /// Platform-native reference to the currently active wallpaper.
    fn current(&self) -> Result<WallpaperRef>;

    /// Activate `wallpaper`, applying immediately and persisting.
    fn apply(&self, wallpaper: &WallpaperRef) -> Result<()>;
}

/// One wallpaper backend per supported desktop environment, selected once at
/// startup. All call sites dispatch through this enum instead of re-detecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopBackend {
    Gnome,
    Mate,
    Windows,
}

impl DesktopBackend {
    pub fn from_environment(environment: DesktopEnvironment) -> Result<Self> {
        match environment {
            DesktopEnvironment::GnomeLike => Ok(Self::Gnome),
            DesktopEnvironment::MateLike => Ok(Self::Mate),
            DesktopEnvironment::Windows => Ok(Self::Windows),
            DesktopEnvironment::Unsupported => Err(BackdropError::UnsupportedPlatform.into()),
        }
    }
}

impl WallpaperStore for DesktopBackend {
    fn current(&self) -> Result<WallpaperRef> {
        match self {
            Self::Gnome => gnome::current_wallpaper(),
            Self::Mate => mate::current_wallpaper(),
            Self::Windows => windows::current_wallpaper(),
        }
    }

    fn apply(&self, wallpaper: &WallpaperRef) -> Result<()> {
        match self {
            Self::Gnome => gnome::apply_wallpaper(wallpaper),
            Self::Mate => mate::apply_wallpaper(wallpaper),
            Self::Windows => windows::apply_wallpaper(wallpaper),
        }
    }
}

/// Strip the URI scheme prefix, leaving a bare filesystem path.
pub(crate) fn strip_uri_scheme(uri: &str) -> &str {
    match uri.split_once("://") {
        Some((_, path)) => path,
        None => uri,
    }
}

/// gsettings expects a `file://` URI for picture keys.
pub(crate) fn file_uri(path: &str) -> String {
    format!("file://{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gnome_schema_wins_over_mate() {
        let schemas = "org.gnome.desktop.background\norg.mate.desktop.background\n";
        assert_eq!(
            classify_schemas(schemas),
            Some(DesktopEnvironment::GnomeLike)
        );
    }

    #[test]
    fn mate_schema_is_recognized() {
        let schemas = "org.gtk.Settings\norg.mate.desktop.background\n";
        assert_eq!(classify_schemas(schemas), Some(DesktopEnvironment::MateLike));
    }

    #[test]
    fn unknown_schemas_are_not_a_desktop() {
        assert_eq!(classify_schemas("org.freedesktop.Tracker\n"), None);
    }

    #[test]
    fn scheme_strip_and_uri_rebuild_invert() {
        let path = "/home/user/Pictures/wallpapers/a.jpg";
        assert_eq!(strip_uri_scheme(&file_uri(path)), path);
    }

    #[test]
    fn bare_path_passes_through_scheme_strip() {
        assert_eq!(strip_uri_scheme("/tmp/a.png"), "/tmp/a.png");
    }

    #[test]
    fn unsupported_environment_has_no_backend() {
        let err = DesktopBackend::from_environment(DesktopEnvironment::Unsupported).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BackdropError>(),
            Some(BackdropError::UnsupportedPlatform)
        ));
    }
}

//! GNOME desktop background backend.

use anyhow::Result;

use super::{WallpaperRef, file_uri, gsettings, strip_uri_scheme};

const SCHEMA: &str = "org.gnome.desktop.background";

pub fn current_wallpaper() -> Result<WallpaperRef> {
    let raw = gsettings::get(SCHEMA, "picture-uri")?;
    let uri = raw.trim().replace('\'', "");
    Ok(WallpaperRef::new(strip_uri_scheme(&uri)))
}

/// Writes both the light and dark picture URIs.
///
/// The two writes are not transactional: if the dark write fails after the
/// light write applied, the properties are left mixed and the error is
/// surfaced as-is. Callers must treat a failure here as "state possibly
/// inconsistent", not "state unchanged".
pub fn apply_wallpaper(wallpaper: &WallpaperRef) -> Result<()> {
    let uri = file_uri(wallpaper.as_str());

    gsettings::set(SCHEMA, "picture-uri", &uri)?;
    gsettings::set(SCHEMA, "picture-uri-dark", &uri)?;

    Ok(())
}

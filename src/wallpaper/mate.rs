//! MATE desktop background backend.
//!
//! Same shape as the GNOME backend, but MATE has a single picture URI with no
//! dark variant.

use anyhow::Result;

use super::{WallpaperRef, file_uri, gsettings, strip_uri_scheme};

const SCHEMA: &str = "org.mate.desktop.background";

pub fn current_wallpaper() -> Result<WallpaperRef> {
    let raw = gsettings::get(SCHEMA, "picture-uri")?;
    let uri = raw.trim().replace('\'', "");
    Ok(WallpaperRef::new(strip_uri_scheme(&uri)))
}

pub fn apply_wallpaper(wallpaper: &WallpaperRef) -> Result<()> {
    let uri = file_uri(wallpaper.as_str());
    gsettings::set(SCHEMA, "picture-uri", &uri)
}

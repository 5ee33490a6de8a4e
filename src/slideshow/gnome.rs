//! GNOME-family slideshow descriptors.
//!
//! Two generated files: a wallpaper-list entry under
//! `gnome-background-properties` that names the slideshow, and the rotation
//! descriptor it points at, holding the static/transition cycle the
//! background engine plays.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use super::{SlideshowArtifact, SlideshowSpec};

const LIST_FILE: &str = "backdrop_slideshow.xml";
const ROTATION_FILE: &str = "backdrop_settings.xml";

/// Crossfade length between two slides, in seconds.
const CROSSFADE: &str = "0.5";

pub fn compose(spec: &SlideshowSpec, wallpapers_dir: &Path) -> Result<SlideshowArtifact> {
    let home = dirs::home_dir().context("unable to find user home directory")?;
    compose_under(&home, spec, wallpapers_dir)
}

fn compose_under(
    home: &Path,
    spec: &SlideshowSpec,
    wallpapers_dir: &Path,
) -> Result<SlideshowArtifact> {
    let (list_file, rotation_file) = descriptor_paths(home);

    for file in [&list_file, &rotation_file] {
        // parent() is always Some: descriptor_paths builds multi-segment paths
        let dir = file.parent().context("descriptor path has no parent")?;
        fs::create_dir_all(dir)
            .with_context(|| format!("creating slideshow directory {}", dir.display()))?;
    }

    write_descriptor(&list_file, &list_descriptor(&rotation_file))?;
    write_descriptor(
        &rotation_file,
        &rotation_descriptor(spec, wallpapers_dir),
    )?;

    Ok(SlideshowArtifact::Descriptor(rotation_file))
}

fn descriptor_paths(home: &Path) -> (PathBuf, PathBuf) {
    let list_file = home
        .join(".local")
        .join("share")
        .join("gnome-background-properties")
        .join(LIST_FILE);
    let rotation_file = home
        .join(".local")
        .join("share")
        .join("backgrounds")
        .join("backdrop_settings")
        .join(ROTATION_FILE);
    (list_file, rotation_file)
}

/// Wallpaper-list entry registering the slideshow with the desktop, pointing
/// at the rotation descriptor.
fn list_descriptor(rotation_file: &Path) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE wallpapers SYSTEM "gnome-wp-list.dtd">
<wallpapers>
  <wallpaper>
    <name>Backdrop Slideshow</name>
    <filename>{}</filename>
    <options>zoom</options>
    <pcolor>#2c001e</pcolor>
    <scolor>#2c001e</scolor>
    <shade_type>solid</shade_type>
  </wallpaper>
</wallpapers>
"#,
        rotation_file.display()
    )
}

/// Rotation descriptor: fixed epoch start time, then one static/transition
/// pair per consecutive image pair, closed by a wrap-around pair from the
/// last image back to the first. A single image wraps onto itself.
fn rotation_descriptor(spec: &SlideshowSpec, wallpapers_dir: &Path) -> String {
    let images = spec.images();
    let slide_path = |name: &str| wallpapers_dir.join(name).display().to_string();

    let mut content = String::new();
    let _ = writeln!(content, "<background>");
    let _ = writeln!(content, "  <starttime>");
    let _ = writeln!(content, "    <year>2012</year>");
    let _ = writeln!(content, "    <month>01</month>");
    let _ = writeln!(content, "    <day>01</day>");
    let _ = writeln!(content, "    <hour>00</hour>");
    let _ = writeln!(content, "    <minute>00</minute>");
    let _ = writeln!(content, "    <second>00</second>");
    let _ = writeln!(content, "  </starttime>");

    let mut write_pair = |from: &str, to: &str| {
        let _ = writeln!(content, "  <static>");
        let _ = writeln!(content, "    <duration>{}.0</duration>", spec.duration_secs());
        let _ = writeln!(content, "    <file>{from}</file>");
        let _ = writeln!(content, "  </static>");
        let _ = writeln!(content, "  <transition>");
        let _ = writeln!(content, "    <duration>{CROSSFADE}</duration>");
        let _ = writeln!(content, "    <from>{from}</from>");
        let _ = writeln!(content, "    <to>{to}</to>");
        let _ = writeln!(content, "  </transition>");
    };

    for pair in images.windows(2) {
        write_pair(&slide_path(&pair[0]), &slide_path(&pair[1]));
    }

    // Wrap around to the start
    let first = slide_path(&images[0]);
    let last = slide_path(&images[images.len() - 1]);
    write_pair(&last, &first);

    content.push_str("</background>\n");
    content
}

fn write_descriptor(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .with_context(|| format!("writing slideshow descriptor {}", path.display()))?;

    // The background engine runs outside this process; the original tool
    // leaves the descriptors world-writable and we keep that behavior.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o777)).with_context(|| {
            format!("setting permissions for descriptor {}", path.display())
        })?;
    }

    Ok(())
}

//! Windows slideshow theme pack.
//!
//! Copies the slides into a dedicated directory, points the per-user
//! slideshow registry values at it, and synthesizes a `.theme` file that is
//! activated to start the rotation. The registry write already enables the
//! rotation, so the resulting artifact is never routed through the wallpaper
//! backend's set path.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use super::{SlideshowArtifact, SlideshowSpec};
use crate::wallpaper::windows::{quote_single, run_powershell};

const SLIDE_DIR_NAME: &str = "BackdropSlideShow";
const THEME_FILE_NAME: &str = "backdrop.theme";

pub fn compose(spec: &SlideshowSpec, wallpapers_dir: &Path) -> Result<SlideshowArtifact> {
    let appdata = env_dir("APPDATA")?;
    let themes_dir = env_dir("LOCALAPPDATA")?
        .join("Microsoft")
        .join("Windows")
        .join("Themes");

    let slide_dir = appdata.join(SLIDE_DIR_NAME);
    populate_slide_dir(&slide_dir, spec.images(), wallpapers_dir)?;
    write_slideshow_registry(&slide_dir, spec.duration_secs())?;

    let first_slide = slide_dir.join(slide_name(&spec.images()[0]));
    let theme_file = themes_dir.join(THEME_FILE_NAME);
    fs::create_dir_all(&themes_dir)
        .with_context(|| format!("creating themes directory {}", themes_dir.display()))?;
    fs::write(
        &theme_file,
        theme_file_contents(&first_slide, &slide_dir, spec.duration_secs()),
    )
    .with_context(|| format!("writing theme file {}", theme_file.display()))?;

    activate_theme(&theme_file)?;

    Ok(SlideshowArtifact::ThemePack {
        slide_dir,
        theme_file,
    })
}

fn env_dir(var: &str) -> Result<PathBuf> {
    std::env::var_os(var)
        .map(PathBuf::from)
        .with_context(|| format!("{var} is not set"))
}

/// Replaces the slide directory contents wholesale.
///
/// Destructive: the previous slide set is removed before the new copy starts,
/// and a failure mid-copy leaves the directory partially populated with no
/// restore of the old contents.
fn populate_slide_dir(slide_dir: &Path, images: &[String], wallpapers_dir: &Path) -> Result<()> {
    fs::create_dir_all(slide_dir)
        .with_context(|| format!("creating slideshow directory {}", slide_dir.display()))?;

    for entry in fs::read_dir(slide_dir)
        .with_context(|| format!("reading slideshow directory {}", slide_dir.display()))?
    {
        let path = entry.context("reading slideshow directory entry")?.path();
        let removed = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.with_context(|| format!("removing existing file {}", path.display()))?;
    }

    for image in images {
        let src = wallpapers_dir.join(image);
        let dst = slide_dir.join(slide_name(image));
        fs::copy(&src, &dst).with_context(|| {
            format!("copying {} into slideshow folder", src.display())
        })?;
    }

    Ok(())
}

fn slide_name(image: &str) -> String {
    Path::new(image)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| image.to_string())
}

/// Rotation preferences: interval, shuffle, enable flag, and the slide
/// directory the engine rotates through. The stale transcoded wallpaper is
/// cleared, otherwise the desktop can come up black.
fn write_slideshow_registry(slide_dir: &Path, duration_secs: u32) -> Result<()> {
    let script = format!(
        r#"
$RegPath = "HKCU:\Control Panel\Personalization\Desktop Slideshow"
Set-ItemProperty -Path $RegPath -Name Interval -Value {duration_secs}
Set-ItemProperty -Path $RegPath -Name Shuffle -Value 1
Set-ItemProperty -Path $RegPath -Name SlideshowEnabled -Value 1

$ThemePath = "HKCU:\Software\Microsoft\Windows\CurrentVersion\Themes"
Set-ItemProperty -Path $ThemePath -Name SlideshowDirectory -Value '{slide_dir}'

$WallpaperPath = "HKCU:\Control Panel\Desktop"
Set-ItemProperty -Path $WallpaperPath -Name Wallpaper -Value ""
Set-ItemProperty -Path $WallpaperPath -Name WallpaperStyle -Value 10
Set-ItemProperty -Path $WallpaperPath -Name TileWallpaper -Value 0

$transcoded = "$env:APPDATA\Microsoft\Windows\Themes\TranscodedWallpaper"
if (Test-Path $transcoded) {{ Remove-Item $transcoded -Force -ErrorAction SilentlyContinue }}

RUNDLL32.EXE user32.dll, UpdatePerUserSystemParameters
"#,
        slide_dir = quote_single(&slide_dir.to_string_lossy()),
    );

    run_powershell(&script)
        .map(|_| ())
        .context("setting registry slideshow values")
}

fn theme_file_contents(first_slide: &Path, slide_dir: &Path, duration_secs: u32) -> String {
    let mut content = String::new();
    let _ = writeln!(content, "[Theme]");
    let _ = writeln!(content, "DisplayName=Backdrop Slideshow");
    let _ = writeln!(content);
    let _ = writeln!(content, "[Control Panel\\Desktop]");
    let _ = writeln!(content, "Wallpaper={}", first_slide.display());
    let _ = writeln!(content, "TileWallpaper=0");
    let _ = writeln!(content, "WallpaperStyle=10");
    let _ = writeln!(content, "PicturePosition=10");
    let _ = writeln!(content, "SlideshowEnabled=1");
    let _ = writeln!(content, "MultimonBackgrounds=1");
    let _ = writeln!(content);
    let _ = writeln!(content, "[Slideshow]");
    let _ = writeln!(content, "ImagesRootPath={}", slide_dir.display());
    let _ = writeln!(content, "Interval={duration_secs}");
    let _ = writeln!(content, "Shuffle=1");
    let _ = writeln!(content);
    let _ = writeln!(content, "[VisualStyles]");
    let _ = writeln!(
        content,
        "Path=%SystemRoot%\\resources\\Themes\\Aero\\Aero.msstyles"
    );
    let _ = writeln!(content, "ColorStyle=NormalColor");
    let _ = writeln!(content, "Size=NormalSize");
    let _ = writeln!(content, "AutoColorization=0");
    let _ = writeln!(content, "VisualStyleVersion=10");
    let _ = writeln!(content);
    let _ = writeln!(content, "[MasterThemeSelector]");
    let _ = writeln!(content, "MTSM=RJSPBS");
    let _ = writeln!(content);
    let _ = writeln!(content, "[Sounds]");
    let _ = writeln!(content, "SchemeName=@mmres.dll,-800");
    content
}

/// Registers the theme as current and launches it hidden, which is what
/// actually kicks the rotation off.
fn activate_theme(theme_file: &Path) -> Result<()> {
    let theme = quote_single(&theme_file.to_string_lossy());
    let script = format!(
        r#"
Set-ItemProperty -Path "HKCU:\Software\Microsoft\Windows\CurrentVersion\Themes" -Name "CurrentTheme" -Value '{theme}'

Set-ItemProperty -Path "HKCU:\Control Panel\Desktop" -Name "SlideshowEnabled" -Value 1
Set-ItemProperty -Path "HKCU:\Control Panel\Personalization\Desktop Slideshow" -Name "SlideshowEnabled" -Value 1
Set-ItemProperty -Path "HKCU:\Control Panel\Desktop\PerMonitorSettings" -Name "SlideshowEnabled" -Value 1 -ErrorAction SilentlyContinue

$transcoded = "$env:APPDATA\Microsoft\Windows\Themes\TranscodedWallpaper"
if (Test-Path $transcoded) {{ Remove-Item $transcoded -Force -ErrorAction SilentlyContinue }}

RUNDLL32.EXE user32.dll, UpdatePerUserSystemParameters

Start-Process -FilePath '{theme}' -WindowStyle Hidden

Start-Sleep -Milliseconds 500
"#
    );

    run_powershell(&script).map(|_| ()).context("applying theme")
}

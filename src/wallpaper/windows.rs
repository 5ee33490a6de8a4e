//! Windows desktop background backend, bridged through PowerShell.

use anyhow::{Context, Result};
use std::process::Command;

use super::WallpaperRef;
use crate::errors::BackdropError;

const POWERSHELL: &str = "powershell";

// SystemParametersInfo constants: set desktop wallpaper, write the change to
// the user profile and broadcast it so it applies immediately.
const SPI_SETDESKWALLPAPER: u32 = 20;
const SPIF_UPDATEINIFILE_AND_SENDCHANGE: u32 = 3;

pub fn current_wallpaper() -> Result<WallpaperRef> {
    let stdout = run_powershell(
        "(Get-ItemProperty -Path 'HKCU:\\Control Panel\\Desktop' -Name Wallpaper).Wallpaper",
    )?;
    Ok(WallpaperRef::new(stdout.trim()))
}

pub fn apply_wallpaper(wallpaper: &WallpaperRef) -> Result<()> {
    let script = format!(
        r#"
Add-Type -TypeDefinition @"
using System.Runtime.InteropServices;
public static class Wallpaper {{
    [DllImport("user32.dll", CharSet = CharSet.Unicode, SetLastError = true)]
    public static extern int SystemParametersInfo(uint uAction, uint uParam, string lpvParam, uint fuWinIni);
}}
"@
if ([Wallpaper]::SystemParametersInfo({SPI_SETDESKWALLPAPER}, 0, '{path}', {SPIF_UPDATEINIFILE_AND_SENDCHANGE}) -eq 0) {{ exit 1 }}
"#,
        path = quote_single(wallpaper.as_str()),
    );

    run_powershell(&script)
        .map(|_| ())
        .map_err(|err| match err.downcast_ref::<BackdropError>() {
            Some(BackdropError::CommandNotFound(_)) => err,
            _ => BackdropError::CouldNotSetBackground(format!("{err:#}")).into(),
        })
}

pub(crate) fn run_powershell(script: &str) -> Result<String> {
    which::which(POWERSHELL).map_err(|_| BackdropError::CommandNotFound(POWERSHELL))?;

    let output = Command::new(POWERSHELL)
        .args(["-NoProfile", "-ExecutionPolicy", "Bypass", "-Command", script])
        .output()
        .context("running powershell")?;
    if !output.status.success() {
        anyhow::bail!(
            "powershell command failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Escape a value for interpolation inside a single-quoted PowerShell string.
pub(crate) fn quote_single(value: &str) -> String {
    value.replace('\'', "''")
}

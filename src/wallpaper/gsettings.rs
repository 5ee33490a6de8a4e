//! Thin wrapper around the `gsettings` command line tool.

use anyhow::{Context, Result};
use std::process::Command;

use crate::errors::BackdropError;

const GSETTINGS: &str = "gsettings";

fn require_gsettings() -> Result<()> {
    which::which(GSETTINGS).map_err(|_| BackdropError::CommandNotFound(GSETTINGS))?;
    Ok(())
}

pub fn list_schemas() -> Result<String> {
    require_gsettings()?;

    let output = Command::new(GSETTINGS)
        .arg("list-schemas")
        .output()
        .context("running gsettings list-schemas")?;
    if !output.status.success() {
        anyhow::bail!(
            "gsettings list-schemas failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

pub fn get(schema: &str, key: &str) -> Result<String> {
    require_gsettings()?;

    let output = Command::new(GSETTINGS)
        .args(["get", schema, key])
        .output()
        .with_context(|| format!("running gsettings get {schema} {key}"))?;
    if !output.status.success() {
        anyhow::bail!(
            "gsettings get {schema} {key} failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

pub fn set(schema: &str, key: &str, value: &str) -> Result<()> {
    require_gsettings()?;

    let output = Command::new(GSETTINGS)
        .args(["set", schema, key, value])
        .output()
        .with_context(|| format!("running gsettings set {schema} {key}"))?;
    if !output.status.success() {
        return Err(BackdropError::CouldNotSetBackground(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        )
        .into());
    }

    Ok(())
}

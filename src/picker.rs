//! fzf-backed image picker.

use anyhow::{Context, Result};
use std::io::Write;
use std::process::{Command, Stdio};

use crate::errors::BackdropError;

const FZF: &str = "fzf";

/// Result of one picker invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pick {
    One(String),
    Many(Vec<String>),
}

/// Something that can choose among wallpaper file names.
///
/// The control loop only depends on this seam; a user abort surfaces as
/// [`BackdropError::SelectionCanceled`], never as an empty selection.
pub trait ImagePicker {
    fn pick(&mut self, names: &[String]) -> Result<Pick>;
}

/// Single-selection fzf picker.
pub struct FzfPicker;

impl ImagePicker for FzfPicker {
    fn pick(&mut self, names: &[String]) -> Result<Pick> {
        let mut selected = run_fzf(names, false)?;
        selected
            .pop()
            .map(Pick::One)
            .ok_or_else(|| BackdropError::SelectionCanceled.into())
    }
}

/// Multi-selection fzf picker (Tab marks, Enter confirms).
pub struct MultiFzfPicker;

impl ImagePicker for MultiFzfPicker {
    fn pick(&mut self, names: &[String]) -> Result<Pick> {
        let selected = run_fzf(names, true)?;
        if selected.is_empty() {
            return Err(BackdropError::SelectionCanceled.into());
        }
        Ok(Pick::Many(selected))
    }
}

fn run_fzf(names: &[String], multi: bool) -> Result<Vec<String>> {
    which::which(FZF).map_err(|_| BackdropError::CommandNotFound(FZF))?;

    let mut cmd = Command::new(FZF);
    cmd.arg("--layout=reverse");
    if multi {
        cmd.arg("--multi");
    }

    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .context("spawning fzf")?;

    child
        .stdin
        .as_mut()
        .context("opening fzf stdin")?
        .write_all(names.join("\n").as_bytes())
        .context("writing entries to fzf")?;

    let output = child.wait_with_output().context("waiting for fzf")?;
    if !output.status.success() {
        // fzf exits 130 on Esc/Ctrl-C and 1 when nothing matched; both mean
        // the user walked away without choosing.
        return Err(BackdropError::SelectionCanceled.into());
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

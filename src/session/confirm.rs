//! Keep-or-revert confirmation for an applied candidate.

use anyhow::{Context, Result};
use colored::*;
use std::io::{BufRead, Write};

use crate::errors::BackdropError;
use crate::wallpaper::{WallpaperRef, WallpaperStore};

/// Run the confirmation prompt for one cycle.
///
/// Returns `true` when the user keeps the change. On `n` or an empty answer
/// the wallpaper captured at cycle start is restored, `cleanup` runs, and
/// `false` is returned so the caller can offer a new candidate. Any other
/// answer re-prompts without touching the wallpaper.
pub fn confirm_change<S, R, W, C>(
    store: &S,
    previous: &WallpaperRef,
    input: &mut R,
    out: &mut W,
    cleanup: C,
) -> Result<bool>
where
    S: WallpaperStore,
    R: BufRead,
    W: Write,
    C: FnOnce(),
{
    loop {
        write!(out, "Want to save this change? [y/N]: ")?;
        out.flush()?;

        let answer = read_line(input)?;
        match answer.trim().to_lowercase().as_str() {
            "y" => {
                writeln!(out, "{}", "Successfully changed background image!".green())?;
                return Ok(true);
            }
            "n" | "" => {
                store.apply(previous)?;
                cleanup();
                return Ok(false);
            }
            _ => writeln!(out, "Invalid input...")?,
        }
    }
}

/// Ask for the per-slide duration in seconds. Anything that is not a positive
/// integer aborts the operation.
pub fn prompt_duration<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<u32> {
    write!(out, "What should be the duration per slide? (In Seconds): ")?;
    out.flush()?;

    let line = read_line(input)?;
    line.trim()
        .parse::<u32>()
        .ok()
        .filter(|duration| *duration > 0)
        .ok_or_else(|| BackdropError::InvalidDuration.into())
}

pub fn prompt_image_url<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    write!(out, "Provide Image Url: ")?;
    out.flush()?;

    Ok(read_line(input)?.trim().to_string())
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("reading user input")?;
    if read == 0 {
        anyhow::bail!("input stream closed while waiting for user input");
    }
    Ok(line)
}

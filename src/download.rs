//! Image download helper for url mode.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Download `image_url` into the wallpapers directory and return the path of
/// the written file. The caller owns the file and deletes it again when the
/// preview is rejected.
pub fn download_image(image_url: &str, wallpapers_dir: &Path) -> Result<PathBuf> {
    let response = reqwest::blocking::get(image_url)
        .with_context(|| format!("fetching image from {image_url}"))?;
    if !response.status().is_success() {
        anyhow::bail!(
            "got bad response code '{}' from request, cannot proceed",
            response.status()
        );
    }

    let last_segment = image_url.rsplit('/').next().unwrap_or(image_url);
    let file_name = sanitize_filename(last_segment);
    if file_name.is_empty() {
        anyhow::bail!("could not derive a file name from url {image_url}");
    }

    let target = wallpapers_dir.join(&file_name);
    let bytes = response.bytes().context("reading image body")?;
    fs::write(&target, &bytes)
        .with_context(|| format!("writing image to {}", target.display()))?;

    Ok(target)
}

/// Percent-decode the name and scrub characters that are invalid in file
/// names on at least one supported platform, collapsing runs of whitespace.
fn sanitize_filename(file_name: &str) -> String {
    let decoded = urlencoding::decode(file_name)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| file_name.to_string());

    let scrubbed: String = decoded
        .chars()
        .map(|c| match c {
            '/' | '\\' | '<' | '>' | ':' | '"' | '|' | '?' | '*' => '_',
            other => other,
        })
        .collect();

    scrubbed.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_encoding_is_decoded() {
        assert_eq!(sanitize_filename("my%20wallpaper.jpg"), "my wallpaper.jpg");
    }

    #[test]
    fn invalid_characters_become_underscores() {
        assert_eq!(sanitize_filename(r#"a:b|c?d*e".png"#), "a_b_c_d_e_.png");
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(sanitize_filename("a   b\t c.jpg"), "a b c.jpg");
    }

    #[test]
    fn invalid_percent_sequences_fall_back_to_the_raw_name() {
        assert_eq!(sanitize_filename("img%zz.jpg"), "img%zz.jpg");
    }
}

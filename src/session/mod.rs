//! The select → preview → confirm/revert control flow.
//!
//! Every cycle captures the active wallpaper first, applies a candidate,
//! then either keeps it or rolls back to the captured reference. Pickers,
//! input, and output are passed in explicitly so the loop has no hidden
//! process-wide state.

mod confirm;

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::cli::Cli;
use crate::config::Config;
use crate::download;
use crate::errors::BackdropError;
use crate::paths;
use crate::picker::{FzfPicker, ImagePicker, MultiFzfPicker, Pick};
use crate::slideshow::{self, SlideshowArtifact, SlideshowSpec};
use crate::wallpaper::{DesktopBackend, DesktopEnvironment, WallpaperRef, WallpaperStore};

use confirm::{confirm_change, prompt_duration, prompt_image_url};

pub fn run(cli: &Cli) -> Result<()> {
    let environment = DesktopEnvironment::detect()?;
    println!("Detected desktop environment: {}", environment.name().cyan());
    let backend = DesktopBackend::from_environment(environment)?;

    let mut config = Config::load()?;
    if let Some(path) = &cli.path {
        config.set_wallpapers_path(path)?;
    }
    let wallpapers_dir = paths::resolve_wallpapers_dir(config.wallpapers_path.as_deref())?;
    println!("Wallpaper path: {}", wallpapers_dir.display().to_string().cyan());

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();

    if cli.url {
        return run_url_mode(&backend, &wallpapers_dir, &mut input, &mut out);
    }

    let wallpapers = list_images(&wallpapers_dir)?;
    if cli.slideshow {
        run_slideshow_mode(
            &backend,
            &wallpapers_dir,
            &wallpapers,
            &mut MultiFzfPicker,
            |spec, dir| slideshow::compose(backend, spec, dir),
            &mut input,
            &mut out,
        )
    } else {
        run_direct_mode(
            &backend,
            &wallpapers_dir,
            &wallpapers,
            &mut FzfPicker,
            &mut input,
            &mut out,
        )
    }
}

/// Ordered file names of the wallpapers directory (names, not paths).
fn list_images(dir: &Path) -> Result<Vec<String>> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .with_context(|| format!("reading wallpapers directory {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    Ok(names)
}

/// Preview a single picked image, then keep or revert.
fn run_direct_mode<S, P, R, W>(
    store: &S,
    wallpapers_dir: &Path,
    wallpapers: &[String],
    picker: &mut P,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    S: WallpaperStore,
    P: ImagePicker,
    R: BufRead,
    W: Write,
{
    loop {
        let previous = store.current()?;

        let selected = match picker.pick(wallpapers)? {
            Pick::One(name) => name,
            Pick::Many(mut names) => {
                if names.is_empty() {
                    return Err(BackdropError::SelectionCanceled.into());
                }
                names.remove(0)
            }
        };

        // A candidate that is not an existing regular file is skipped without
        // applying; the prompt still runs against the unchanged background.
        let candidate = wallpapers_dir.join(&selected);
        if candidate.is_file() {
            store.apply(&WallpaperRef::from_path(&candidate))?;
        }

        if confirm_change(store, &previous, input, out, || {})? {
            return Ok(());
        }
    }
}

/// Pick several images, compose the platform rotation artifact, and preview
/// it like a single wallpaper where the platform allows that.
fn run_slideshow_mode<S, P, C, R, W>(
    store: &S,
    wallpapers_dir: &Path,
    wallpapers: &[String],
    picker: &mut P,
    compose: C,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    S: WallpaperStore,
    P: ImagePicker,
    C: Fn(&SlideshowSpec, &Path) -> Result<SlideshowArtifact>,
    R: BufRead,
    W: Write,
{
    loop {
        let previous = store.current()?;

        let names = match picker.pick(wallpapers)? {
            Pick::One(name) => vec![name],
            Pick::Many(names) => names,
        };
        let duration = prompt_duration(input, out)?;
        let spec = SlideshowSpec::new(names, duration)?;

        let artifact = compose(&spec, wallpapers_dir)?;
        if let Some(wallpaper) = artifact.as_wallpaper() {
            store.apply(&wallpaper)?;
        }

        if confirm_change(store, &previous, input, out, || {})? {
            return Ok(());
        }
    }
}

/// Download an image from a prompted url and preview it; a rejected download
/// is deleted again during rollback.
fn run_url_mode<S, R, W>(
    store: &S,
    wallpapers_dir: &Path,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    S: WallpaperStore,
    R: BufRead,
    W: Write,
{
    loop {
        let previous = store.current()?;

        let url = prompt_image_url(input, out)?;
        let image = download::download_image(&url, wallpapers_dir)?;
        store.apply(&WallpaperRef::from_path(&image))?;

        let cleanup = || {
            let _ = fs::remove_file(&image);
        };
        if confirm_change(store, &previous, input, out, cleanup)? {
            return Ok(());
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    /// In-memory wallpaper store recording every apply call.
    pub(crate) struct MemoryStore {
        current: RefCell<String>,
        applied: RefCell<Vec<String>>,
    }

    impl MemoryStore {
        pub(crate) fn new(initial: &str) -> Self {
            Self {
                current: RefCell::new(initial.to_string()),
                applied: RefCell::new(Vec::new()),
            }
        }

        pub(crate) fn applied(&self) -> Vec<String> {
            self.applied.borrow().clone()
        }
    }

    impl WallpaperStore for MemoryStore {
        fn current(&self) -> Result<WallpaperRef> {
            Ok(WallpaperRef::new(self.current.borrow().clone()))
        }

        fn apply(&self, wallpaper: &WallpaperRef) -> Result<()> {
            self.applied.borrow_mut().push(wallpaper.as_str().to_string());
            *self.current.borrow_mut() = wallpaper.as_str().to_string();
            Ok(())
        }
    }

    /// Picker that replays a scripted list of results.
    struct ScriptedPicker {
        script: Vec<Result<Pick>>,
    }

    impl ScriptedPicker {
        fn new(script: Vec<Result<Pick>>) -> Self {
            let mut script = script;
            script.reverse();
            Self { script }
        }
    }

    impl ImagePicker for ScriptedPicker {
        fn pick(&mut self, _names: &[String]) -> Result<Pick> {
            self.script.pop().expect("picker script exhausted")
        }
    }

    fn wallpapers_dir_with(names: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            fs::write(dir.path().join(name), b"image data").unwrap();
        }
        dir
    }

    #[test]
    fn applying_the_current_reference_is_idempotent() {
        let store = MemoryStore::new("/old.jpg");
        let before = store.current().unwrap();
        store.apply(&before).unwrap();
        assert_eq!(store.current().unwrap(), before);
    }

    #[test]
    fn direct_mode_keeps_a_confirmed_candidate() {
        let dir = wallpapers_dir_with(&["new.jpg"]);
        let store = MemoryStore::new("/old.jpg");
        let mut picker = ScriptedPicker::new(vec![Ok(Pick::One("new.jpg".into()))]);
        let names = vec!["new.jpg".to_string()];
        let mut input = "y\n".as_bytes();
        let mut out = Vec::new();

        run_direct_mode(&store, dir.path(), &names, &mut picker, &mut input, &mut out).unwrap();

        let expected = dir.path().join("new.jpg").to_string_lossy().into_owned();
        assert_eq!(store.applied(), vec![expected.clone()]);
        assert_eq!(store.current().unwrap().as_str(), expected);
    }

    #[test]
    fn direct_mode_skips_a_missing_candidate_without_applying() {
        let dir = wallpapers_dir_with(&[]);
        let store = MemoryStore::new("/old.jpg");
        let mut picker = ScriptedPicker::new(vec![Ok(Pick::One("ghost.jpg".into()))]);
        let names = vec!["ghost.jpg".to_string()];
        let mut input = "y\n".as_bytes();
        let mut out = Vec::new();

        run_direct_mode(&store, dir.path(), &names, &mut picker, &mut input, &mut out).unwrap();

        assert!(store.applied().is_empty());
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Want to save this change?"));
    }

    #[test]
    fn direct_mode_rolls_back_and_retries_on_rejection() {
        let dir = wallpapers_dir_with(&["first.jpg", "second.jpg"]);
        let store = MemoryStore::new("/old.jpg");
        let mut picker = ScriptedPicker::new(vec![
            Ok(Pick::One("first.jpg".into())),
            Ok(Pick::One("second.jpg".into())),
        ]);
        let names = vec!["first.jpg".to_string(), "second.jpg".to_string()];
        let mut input = "n\ny\n".as_bytes();
        let mut out = Vec::new();

        run_direct_mode(&store, dir.path(), &names, &mut picker, &mut input, &mut out).unwrap();

        let first = dir.path().join("first.jpg").to_string_lossy().into_owned();
        let second = dir.path().join("second.jpg").to_string_lossy().into_owned();
        assert_eq!(
            store.applied(),
            vec![first, "/old.jpg".to_string(), second.clone()]
        );
        assert_eq!(store.current().unwrap().as_str(), second);
    }

    #[test]
    fn direct_mode_propagates_picker_cancellation() {
        let dir = wallpapers_dir_with(&["a.jpg"]);
        let store = MemoryStore::new("/old.jpg");
        let mut picker =
            ScriptedPicker::new(vec![Err(BackdropError::SelectionCanceled.into())]);
        let names = vec!["a.jpg".to_string()];
        let mut input = "y\n".as_bytes();
        let mut out = Vec::new();

        let err = run_direct_mode(&store, dir.path(), &names, &mut picker, &mut input, &mut out)
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BackdropError>(),
            Some(BackdropError::SelectionCanceled)
        ));
        assert!(store.applied().is_empty());
    }

    #[test]
    fn slideshow_mode_composes_applies_and_confirms() {
        let dir = wallpapers_dir_with(&["a.jpg", "b.jpg", "c.jpg"]);
        let store = MemoryStore::new("/old.jpg");
        let mut picker = ScriptedPicker::new(vec![Ok(Pick::Many(vec![
            "a.jpg".into(),
            "b.jpg".into(),
            "c.jpg".into(),
        ]))]);
        let names = vec![
            "a.jpg".to_string(),
            "b.jpg".to_string(),
            "c.jpg".to_string(),
        ];
        let seen = RefCell::new(None);
        let compose = |spec: &SlideshowSpec, _dir: &Path| {
            *seen.borrow_mut() = Some(spec.clone());
            Ok(SlideshowArtifact::Descriptor(PathBuf::from(
                "/home/user/.local/share/backgrounds/backdrop_settings/backdrop_settings.xml",
            )))
        };
        let mut input = "10\ny\n".as_bytes();
        let mut out = Vec::new();

        run_slideshow_mode(
            &store, dir.path(), &names, &mut picker, compose, &mut input, &mut out,
        )
        .unwrap();

        let spec = seen.borrow().clone().unwrap();
        assert_eq!(spec.images().len(), 3);
        assert_eq!(spec.duration_secs(), 10);
        assert_eq!(
            store.applied(),
            vec![
                "/home/user/.local/share/backgrounds/backdrop_settings/backdrop_settings.xml"
                    .to_string()
            ]
        );
    }

    #[test]
    fn slideshow_mode_does_not_apply_an_unsettable_artifact() {
        let dir = wallpapers_dir_with(&["a.jpg"]);
        let store = MemoryStore::new("C:\\old.jpg");
        let mut picker = ScriptedPicker::new(vec![Ok(Pick::Many(vec!["a.jpg".into()]))]);
        let names = vec!["a.jpg".to_string()];
        let compose = |_spec: &SlideshowSpec, _dir: &Path| {
            Ok(SlideshowArtifact::ThemePack {
                slide_dir: PathBuf::from("C:\\slides"),
                theme_file: PathBuf::from("C:\\themes\\backdrop.theme"),
            })
        };
        let mut input = "10\ny\n".as_bytes();
        let mut out = Vec::new();

        run_slideshow_mode(
            &store, dir.path(), &names, &mut picker, compose, &mut input, &mut out,
        )
        .unwrap();

        assert!(store.applied().is_empty());
    }

    #[test]
    fn slideshow_mode_aborts_on_invalid_duration() {
        let dir = wallpapers_dir_with(&["a.jpg"]);
        let store = MemoryStore::new("/old.jpg");
        let mut picker = ScriptedPicker::new(vec![Ok(Pick::Many(vec!["a.jpg".into()]))]);
        let names = vec!["a.jpg".to_string()];
        let compose = |_spec: &SlideshowSpec, _dir: &Path| -> Result<SlideshowArtifact> {
            panic!("composer must not run for an invalid duration")
        };
        let mut input = "soon\n".as_bytes();
        let mut out = Vec::new();

        let err = run_slideshow_mode(
            &store, dir.path(), &names, &mut picker, compose, &mut input, &mut out,
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BackdropError>(),
            Some(BackdropError::InvalidDuration)
        ));
        assert!(store.applied().is_empty());
    }

    #[test]
    fn listed_images_are_sorted_names() {
        let dir = wallpapers_dir_with(&["zebra.png", "alpha.jpg", "mid.webp"]);
        let names = list_images(dir.path()).unwrap();
        assert_eq!(names, vec!["alpha.jpg", "mid.webp", "zebra.png"]);
    }
}

use thiserror::Error;

/// Failure taxonomy for wallpaper operations.
///
/// Detection and read failures happen before any mutation, so they are safe to
/// surface loudly. Mutation failures mean the desktop state may already have
/// changed; callers must not assume "state unchanged" on error.
#[derive(Error, Debug)]
pub enum BackdropError {
    #[error("This operating system is not supported for wallpaper management.")]
    UnsupportedPlatform,

    #[error("Required command `{0}` was not found on PATH.")]
    CommandNotFound(&'static str),

    #[error("No compatible desktop environment found for setting wallpaper.")]
    NoCompatibleDesktopEnvironment,

    #[error("Error setting background wallpaper: {0}")]
    CouldNotSetBackground(String),

    #[error("A slideshow needs at least one image.")]
    EmptySlideshow,

    #[error("Invalid duration: please enter a positive integer.")]
    InvalidDuration,

    #[error("User canceled selection, exiting program.")]
    SelectionCanceled,

    #[error("User does not have valid images path configured.
    IMAGES
      Images must be stored in ONE of the following paths:
         - $XDG_CONFIG_HOME/backdrop/wallpapers (This one has priority)
         - $HOME/Pictures/wallpapers
      Note: A custom path can be set with the \"--path\" or \"-p\" flag.
            It is saved to the config file and reused on later runs.")]
    NoWallpapersDir,
}

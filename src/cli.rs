use clap::Parser;

/// Backdrop main parser
#[derive(Parser, Debug)]
#[command(
    name = "backdrop",
    version,
    about = "Backdrop is a command-line utility for setting, reverting, and organizing desktop wallpapers.",
    long_about = "backdrop is a command-line utility for managing wallpapers on your desktop.
It allows you to set a new wallpaper, revert to a previous wallpaper,
and specify the directory where your wallpaper images are stored."
)]
pub struct Cli {
    /// Set a custom path to find wallpaper images. If not provided, a default path will be used.
    #[arg(short, long)]
    pub path: Option<String>,

    /// Configure and set a slideshow of images selected with fzf.
    /// Hit 'Tab' on every image you want in the rotation, then 'Enter' to confirm.
    #[arg(short, long)]
    pub slideshow: bool,

    /// Prompt for an image url to download and preview as wallpaper.
    /// If rejected, the downloaded image is deleted and the previous wallpaper restored.
    #[arg(short, long)]
    pub url: bool,
}

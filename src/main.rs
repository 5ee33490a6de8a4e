mod cli;
mod config;
mod download;
mod errors;
mod paths;
mod picker;
mod session;
mod slideshow;
mod wallpaper;

use clap::Parser;
use colored::*;

use crate::cli::Cli;
use crate::errors::BackdropError;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = session::run(&cli) {
        match err.downcast_ref::<BackdropError>() {
            Some(BackdropError::SelectionCanceled) => {
                eprintln!("{}", "Selection canceled, leaving the wallpaper unchanged.".yellow());
            }
            _ => eprintln!("{} {:#}", "Error:".red(), err),
        }
        std::process::exit(1);
    }
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use wayfarer_core::theme::ThemeMode;

#[derive(Parser)]
#[command(name = "wayfarer")]
#[command(about = "Keep a travel diary of photos, places, and dates")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Optional path to the JSON config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Capture a new memory from an image file
    #[command(alias = "new")]
    Add(AddArgs),
    /// List saved memories
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a memory by list position or id/prefix
    #[command(alias = "rm")]
    Remove {
        /// Position shown by `wayfarer list`, or an entry id/prefix
        target: String,
    },
    /// Show or change the light/dark theme
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Image to attach to the memory
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Latitude of the place; overrides the image's GPS tags
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude of the place; overrides the image's GPS tags
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Skip reverse geocoding and store "Unknown location"
    #[arg(long)]
    pub offline: bool,

    /// Log the saved-entry notification instead of showing it
    #[arg(long)]
    pub no_notify: bool,
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ThemeCommands {
    /// Print the active theme
    Show,
    /// Switch between light and dark and remember the choice
    Toggle,
    /// Pin a theme mode
    Set {
        #[arg(value_enum)]
        mode: ThemeArg,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    System,
}

impl From<ThemeArg> for ThemeMode {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
            ThemeArg::System => Self::System,
        }
    }
}

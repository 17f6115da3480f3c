//! Command-line interface definitions.

use clap::{ArgAction, ColorChoice, Parser};
use std::path::PathBuf;

/// Check SVG tiles for required metadata, spelling mistakes and duplicates
#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about,
    long_about = None,
    disable_help_flag = true,
    override_usage = "tilecheck [-?] [-v] <check-directory> <duplicate-directory>"
)]
pub struct Cli {
    /// Display this help message
    #[arg(short = '?', long = "help", action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Output additional execution information
    #[arg(short, long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Hunspell `.dic` file to spell check with (default: system en_US)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub dictionary: Option<PathBuf>,

    /// Path to the directory tree to check
    #[arg(value_name = "CHECK-DIRECTORY", value_hint = clap::ValueHint::DirPath)]
    pub check_dir: Option<PathBuf>,

    /// Path to the directory tree to look for duplicates in
    #[arg(value_name = "DUPLICATE-DIRECTORY", value_hint = clap::ValueHint::DirPath)]
    pub duplicate_dir: Option<PathBuf>,
}

//! Command-line interface.

mod args;

pub use args::Cli;

use clap::CommandFactory;

/// Print usage to stdout.
pub fn print_usage() -> std::io::Result<()> {
    Cli::command().print_help()
}

//! tilecheck - quality checks for a tree of SVG map tiles.

mod check;
mod cli;
mod config;
mod duplicate;
mod logger;
mod report;
mod scan;
mod tile;
mod utils;
mod walk;

use anyhow::Result;
use check::spelling::{HunspellSpeller, Speller};
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::ScanConfig;
use report::{ConsoleSink, ReportSink, Severity};
use scan::TileWalker;
use utils::plural_count;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = match ScanConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            log!("error"; "{}", e);
            cli::print_usage()?;
            std::process::exit(1);
        }
    };

    logger::set_verbose(config.verbose);
    debug!("scan"; "args: {}", std::env::args().collect::<Vec<_>>().join(", "));

    // A missing dictionary only disables spelling checks
    let speller = match HunspellSpeller::load(&config.dictionary) {
        Ok(speller) => Some(speller),
        Err(e) => {
            log!("spell"; "spelling checks disabled: {}", e);
            None
        }
    };

    let walker = TileWalker::new(&config, speller.as_ref().map(|s| s as &dyn Speller));
    let mut sink = ConsoleSink::new();

    match walker.scan(&mut sink) {
        Ok(summary) => {
            let skipped = if summary.skipped > 0 {
                format!(" ({} skipped)", summary.skipped)
            } else {
                String::new()
            };
            log!("scan"; "checked {}{}: {}, {} ({})",
                plural_count(summary.checked, "file"),
                skipped,
                plural_count(sink.count(Severity::Error), "error"),
                plural_count(sink.count(Severity::Warning), "warning"),
                plural_count(summary.duplicates, "duplicate"));
        }
        // Already reported; diagnostics never change the exit status
        Err(e) => log!("error"; "{:#}", anyhow::Error::from(e)),
    }

    Ok(())
}

//! Run configuration resolved from the command line.
//!
//! Nothing is read from files or the environment: the CLI is the only
//! source, and the resulting [`ScanConfig`] is handed to the scanner
//! explicitly.

use std::path::PathBuf;

use thiserror::Error;

use crate::check::spelling::DictionarySource;
use crate::cli::Cli;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required argument <{0}>")]
    MissingArgument(&'static str),
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Tree of tiles to check.
    pub check_dir: PathBuf,
    /// Tree searched for duplicates of each checked tile.
    pub reference_dir: PathBuf,
    /// Trace every visited tile and its extracted metadata.
    pub verbose: bool,
    pub dictionary: DictionarySource,
}

impl ScanConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let check_dir = cli
            .check_dir
            .clone()
            .ok_or(ConfigError::MissingArgument("check-directory"))?;
        let reference_dir = cli
            .duplicate_dir
            .clone()
            .ok_or(ConfigError::MissingArgument("duplicate-directory"))?;

        let dictionary = cli
            .dictionary
            .clone()
            .map_or_else(DictionarySource::default, DictionarySource::File);

        Ok(Self {
            check_dir,
            reference_dir,
            verbose: cli.verbose,
            dictionary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli() {
        let cli = Cli::try_parse_from(["tilecheck", "-v", "tiles", "library"]).unwrap();
        let config = ScanConfig::from_cli(&cli).unwrap();
        assert_eq!(config.check_dir, PathBuf::from("tiles"));
        assert_eq!(config.reference_dir, PathBuf::from("library"));
        assert!(config.verbose);
        assert_eq!(config.dictionary, DictionarySource::default());
    }

    #[test]
    fn test_from_cli_with_dictionary() {
        let cli = Cli::try_parse_from(["tilecheck", "-d", "words.dic", "a", "b"]).unwrap();
        let config = ScanConfig::from_cli(&cli).unwrap();
        assert_eq!(
            config.dictionary,
            DictionarySource::File(PathBuf::from("words.dic"))
        );
    }

    #[test]
    fn test_missing_arguments() {
        let cli = Cli::try_parse_from(["tilecheck"]).unwrap();
        assert_eq!(
            ScanConfig::from_cli(&cli).unwrap_err(),
            ConfigError::MissingArgument("check-directory")
        );

        let cli = Cli::try_parse_from(["tilecheck", "tiles"]).unwrap();
        assert_eq!(
            ScanConfig::from_cli(&cli).unwrap_err(),
            ConfigError::MissingArgument("duplicate-directory")
        );
    }
}

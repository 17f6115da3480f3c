//! Diagnostic records and the sinks they are written to.
//!
//! A diagnostic is a `(path, severity, message)` triple. Checks only ever
//! produce them; where they end up (terminal, memory) is decided by the
//! [`ReportSink`] handed to the scanner.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use owo_colors::{OwoColorize, Stream};

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding about one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn error(path: &Path, message: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(path: &Path, message: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// Tab-separated report line: quoted path, severity token, message.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}\t{}\t{}",
            self.path.display().to_string(),
            self.severity,
            self.message
        )
    }
}

/// Destination for diagnostics.
pub trait ReportSink {
    fn emit(&mut self, diagnostic: Diagnostic);

    /// Number of diagnostics emitted so far with the given severity.
    fn count(&self, severity: Severity) -> usize;
}

/// Running totals shared by the sink implementations.
#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    errors: usize,
    warnings: usize,
}

impl Tally {
    fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
    }

    fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Error => self.errors,
            Severity::Warning => self.warnings,
        }
    }
}

/// Writes one line per diagnostic to stdout.
///
/// The severity token is colored only when stdout supports it, so piped
/// output stays plain.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    tally: Tally,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn write_line(diagnostic: &Diagnostic, out: &mut impl Write) -> io::Result<()> {
        let token = diagnostic.severity.as_str();
        let token = match diagnostic.severity {
            Severity::Error => token
                .if_supports_color(Stream::Stdout, |t| t.red().bold().to_string())
                .to_string(),
            Severity::Warning => token
                .if_supports_color(Stream::Stdout, |t| t.yellow().to_string())
                .to_string(),
        };
        writeln!(
            out,
            "{:?}\t{}\t{}",
            diagnostic.path.display().to_string(),
            token,
            diagnostic.message
        )
    }
}

impl ReportSink for ConsoleSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.tally.record(diagnostic.severity);
        let mut stdout = io::stdout().lock();
        Self::write_line(&diagnostic, &mut stdout).ok();
    }

    fn count(&self, severity: Severity) -> usize {
        self.tally.get(severity)
    }
}

/// Keeps every diagnostic in emission order.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySink {
    pub diagnostics: Vec<Diagnostic>,
}

#[cfg(test)]
impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages of all diagnostics, in order.
    pub fn messages(&self) -> Vec<&str> {
        self.diagnostics.iter().map(|d| d.message.as_str()).collect()
    }
}

#[cfg(test)]
impl ReportSink for MemorySink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

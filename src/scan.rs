//! Tile walker: drives extraction, checks and duplicate detection for every
//! tile under the check directory.
//!
//! Files are processed one at a time. A file that cannot be read or parsed
//! is reported and skipped; only a failure to traverse the check tree (or
//! to reach either root) ends the scan early.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::check::CheckSuite;
use crate::check::spelling::Speller;
use crate::config::ScanConfig;
use crate::duplicate::hash::{ContentHash, compute_file_hash};
use crate::duplicate::{Candidate, find_duplicates};
use crate::log;
use crate::report::{Diagnostic, ReportSink};
use crate::tile::TileDocument;
use crate::walk::{error_path, svg_files};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("unable to access directory `{0}`")]
    Inaccessible(PathBuf, #[source] std::io::Error),

    #[error("unable to walk directory `{0}`")]
    Walk(PathBuf, #[source] jwalk::Error),
}

/// Counts gathered over one scan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// Tiles parsed and checked.
    pub checked: usize,
    /// Tiles that could not be read or parsed.
    pub skipped: usize,
    /// Duplicate-match warnings emitted.
    pub duplicates: usize,
}

pub struct TileWalker<'a> {
    config: &'a ScanConfig,
    suite: CheckSuite<'a>,
}

impl<'a> TileWalker<'a> {
    pub fn new(config: &'a ScanConfig, speller: Option<&'a dyn Speller>) -> Self {
        Self {
            config,
            suite: CheckSuite::new(speller),
        }
    }

    /// Check every tile under the check directory.
    pub fn scan(&self, sink: &mut dyn ReportSink) -> Result<ScanSummary, ScanError> {
        let check_dir = &self.config.check_dir;
        let reference_dir = &self.config.reference_dir;

        for root in [check_dir, reference_dir] {
            if let Err(e) = fs::metadata(root) {
                sink.emit(Diagnostic::error(
                    root,
                    format!("scan: unable to access directory, {e}"),
                ));
                return Err(ScanError::Inaccessible(root.clone(), e));
            }
        }

        let mut summary = ScanSummary::default();
        for entry in svg_files(check_dir) {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    sink.emit(Diagnostic::error(
                        &error_path(&e, check_dir),
                        format!("scan: unable to walk directory, {e}"),
                    ));
                    return Err(ScanError::Walk(check_dir.clone(), e));
                }
            };
            self.scan_file(&path, sink, &mut summary);
        }

        Ok(summary)
    }

    fn scan_file(&self, path: &Path, sink: &mut dyn ReportSink, summary: &mut ScanSummary) {
        if self.config.verbose {
            log!("tile"; "{}", path.display());
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                sink.emit(Diagnostic::error(path, format!("scan: unable to open file, {e}")));
                summary.skipped += 1;
                return;
            }
        };

        let doc = match TileDocument::parse(&content) {
            Ok(doc) => doc,
            Err(e) => {
                sink.emit(Diagnostic::error(path, format!("parse: {e}")));
                summary.skipped += 1;
                return;
            }
        };
        drop(content);

        if self.config.verbose {
            for line in trace_lines(&doc, &compute_file_hash(path)) {
                log!("tile"; "{}", line);
            }
        }

        for diagnostic in self.suite.run(path, &doc) {
            sink.emit(diagnostic);
        }
        summary.checked += 1;

        match Candidate::open(path) {
            Ok(mut candidate) => {
                summary.duplicates +=
                    find_duplicates(&mut candidate, &self.config.reference_dir, sink);
            }
            Err(e) => {
                sink.emit(Diagnostic::error(
                    path,
                    format!("duplicates: unable to read metadata, {e}"),
                ));
            }
        }
    }
}

/// Verbose per-tile trace: extracted fields and the content digest prefix.
fn trace_lines(doc: &TileDocument, digest: &io::Result<ContentHash>) -> Vec<String> {
    let digest = match digest {
        Ok(hash) => format!("digest: {hash}"),
        Err(e) => format!("digest: unavailable, {e}"),
    };
    vec![
        format!(
            "width: {:?}, height: {:?}, viewBox: {:?}",
            doc.width, doc.height, doc.view_box
        ),
        format!("keywords: {}", doc.keyword_list()),
        format!("identifier: {}", doc.identifier),
        format!("text runs: {}", doc.text_runs.len()),
        digest,
    ]
}

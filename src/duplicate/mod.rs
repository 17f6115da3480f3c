//! Duplicate tile detection.
//!
//! A candidate tile is compared with every `.svg` file in a reference tree
//! on three independent signals: base filename, byte size and content hash.
//! Each signal that matches produces its own warning, so an exact copy under
//! the same name is reported three times.
//!
//! The reference tree is walked again for every candidate; nothing about it
//! is remembered between candidates. A candidate that itself lives inside the
//! reference tree matches itself.

pub mod hash;

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::report::{Diagnostic, ReportSink};
use crate::walk::{error_path, svg_files};

use hash::{ContentHash, compute_file_hash};

/// The file being checked against the reference tree.
#[derive(Debug)]
pub struct Candidate {
    pub path: PathBuf,
    pub name: Option<OsString>,
    pub size: u64,
    /// Computed on first use; `Some(None)` once hashing has failed.
    digest: Option<Option<ContentHash>>,
}

impl Candidate {
    pub fn open(path: &Path) -> io::Result<Self> {
        let size = fs::metadata(path)?.len();
        Ok(Self {
            path: path.to_path_buf(),
            name: path.file_name().map(OsString::from),
            size,
            digest: None,
        })
    }

    /// Content hash, computed once. A hashing failure is reported once and
    /// disables hash comparison for this candidate.
    fn digest(&mut self, sink: &mut dyn ReportSink) -> Option<ContentHash> {
        if let Some(digest) = self.digest {
            return digest;
        }
        let digest = match compute_file_hash(&self.path) {
            Ok(hash) => Some(hash),
            Err(e) => {
                sink.emit(Diagnostic::error(
                    &self.path,
                    format!("hash: unable to read file, {e}"),
                ));
                None
            }
        };
        self.digest = Some(digest);
        digest
    }
}

/// Report every reference file that looks like a duplicate of `candidate`.
///
/// Returns the number of match warnings emitted. Errors on individual
/// reference files are reported and the file is skipped.
pub fn find_duplicates(
    candidate: &mut Candidate,
    reference_dir: &Path,
    sink: &mut dyn ReportSink,
) -> usize {
    let mut matches = 0;

    for entry in svg_files(reference_dir) {
        let reference = match entry {
            Ok(path) => path,
            Err(e) => {
                sink.emit(Diagnostic::error(
                    &error_path(&e, reference_dir),
                    format!("duplicates: unable to access path, {e}"),
                ));
                continue;
            }
        };

        let size = match fs::metadata(&reference) {
            Ok(meta) => meta.len(),
            Err(e) => {
                sink.emit(Diagnostic::error(
                    &reference,
                    format!("duplicates: unable to read metadata, {e}"),
                ));
                continue;
            }
        };

        if candidate.name.is_some() && candidate.name.as_deref() == reference.file_name() {
            sink.emit(Diagnostic::warning(
                &candidate.path,
                format!("duplicate filename: {:?}", reference.display().to_string()),
            ));
            matches += 1;
        }

        if candidate.size == size {
            sink.emit(Diagnostic::warning(
                &candidate.path,
                format!(
                    "duplicate size ({size} bytes): {:?}",
                    reference.display().to_string()
                ),
            ));
            matches += 1;
        }

        let Some(digest) = candidate.digest(sink) else {
            continue;
        };
        match compute_file_hash(&reference) {
            Ok(hash) if hash == digest => {
                sink.emit(Diagnostic::warning(
                    &candidate.path,
                    format!(
                        "duplicate content hash ({hash}): {:?}",
                        reference.display().to_string()
                    ),
                ));
                matches += 1;
            }
            Ok(_) => {}
            Err(e) => {
                sink.emit(Diagnostic::error(
                    &reference,
                    format!("hash: unable to read file, {e}"),
                ));
            }
        }
    }

    matches
}

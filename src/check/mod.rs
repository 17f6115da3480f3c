//! Tile checks.
//!
//! Each check looks at one [`TileDocument`] and returns zero or more
//! diagnostics. Checks never depend on each other: a missing field reported
//! by one does not stop the rest from running.

pub mod spelling;

use std::path::Path;

use crate::report::Diagnostic;
use crate::tile::TileDocument;
use crate::tile::units::{magnitude, unit_multiplier};

use spelling::{Speller, misspelled};

/// Smallest accepted width, compared against the raw magnitude.
pub const MIN_WIDTH: f64 = 80.0;
/// Smallest accepted height, compared against the raw magnitude.
pub const MIN_HEIGHT: f64 = 80.0;

type Check = fn(&CheckSuite<'_>, &Path, &TileDocument) -> Vec<Diagnostic>;

/// Checks in output order.
const CHECKS: &[Check] = &[
    check_keywords,
    check_size,
    check_units,
    check_identifier,
    check_keyword_spelling,
    check_text_spelling,
];

/// The fixed set of tile checks.
///
/// Without a speller both spelling checks are skipped.
pub struct CheckSuite<'a> {
    speller: Option<&'a dyn Speller>,
}

impl<'a> CheckSuite<'a> {
    pub fn new(speller: Option<&'a dyn Speller>) -> Self {
        Self { speller }
    }

    /// Run every check against `doc`, in order.
    pub fn run(&self, path: &Path, doc: &TileDocument) -> Vec<Diagnostic> {
        CHECKS
            .iter()
            .flat_map(|check| check(self, path, doc))
            .collect()
    }
}

fn check_keywords(_: &CheckSuite<'_>, path: &Path, doc: &TileDocument) -> Vec<Diagnostic> {
    if doc.keywords.is_empty() {
        vec![Diagnostic::error(path, "keywords missing")]
    } else {
        Vec::new()
    }
}

/// Size is judged on the number alone: `80mm` passes even though it is not
/// 80 pixels. Unit problems are reported separately by `check_units`.
fn check_size(_: &CheckSuite<'_>, path: &Path, doc: &TileDocument) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for (name, value, min) in [
        ("width", &doc.width, MIN_WIDTH),
        ("height", &doc.height, MIN_HEIGHT),
    ] {
        let size = match magnitude(value) {
            Ok(size) => size,
            Err(e) => {
                out.push(Diagnostic::error(path, format!("{name}: {e}")));
                0.0
            }
        };
        if size < min {
            out.push(Diagnostic::error(
                path,
                format!("{name} ({size}) is too small"),
            ));
        }
    }
    out
}

fn check_units(_: &CheckSuite<'_>, path: &Path, doc: &TileDocument) -> Vec<Diagnostic> {
    [("width", &doc.width), ("height", &doc.height)]
        .into_iter()
        .filter(|(_, value)| unit_multiplier(value) != 1.0)
        .map(|(name, value)| {
            Diagnostic::warning(path, format!("{name} units are not px, {value:?}"))
        })
        .collect()
}

fn check_identifier(_: &CheckSuite<'_>, path: &Path, doc: &TileDocument) -> Vec<Diagnostic> {
    if doc.identifier.is_empty() {
        vec![Diagnostic::error(path, "identifier missing")]
    } else {
        Vec::new()
    }
}

fn check_keyword_spelling(
    suite: &CheckSuite<'_>,
    path: &Path,
    doc: &TileDocument,
) -> Vec<Diagnostic> {
    let Some(speller) = suite.speller else {
        return Vec::new();
    };
    if doc.keywords.is_empty() {
        return Vec::new();
    }

    let words = misspelled(speller, &doc.keywords, str::to_string);
    if words.is_empty() {
        return Vec::new();
    }
    vec![Diagnostic::error(
        path,
        format!("keywords misspelled: {}", words.join(", ")),
    )]
}

/// `/` marks a manual line break in the authoring tool, not punctuation.
fn check_text_spelling(
    suite: &CheckSuite<'_>,
    path: &Path,
    doc: &TileDocument,
) -> Vec<Diagnostic> {
    let Some(speller) = suite.speller else {
        return Vec::new();
    };

    let words = misspelled(speller, &doc.text_runs, |token| {
        token.trim().replace('/', "")
    });
    if words.is_empty() {
        return Vec::new();
    }
    vec![Diagnostic::error(
        path,
        format!("text misspelled: {}", words.join(", ")),
    )]
}

//! Recursive discovery of `.svg` files.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;

/// Whether `path` has exactly the `svg` extension (case-sensitive).
pub fn is_svg(path: &Path) -> bool {
    path.extension() == Some(OsStr::new("svg"))
}

/// All `.svg` files under `dir`, in sorted walk order.
///
/// Traversal errors are passed through so callers can report them.
/// Anything with the extension that is not a directory is yielded, including
/// dangling symlinks, so that open failures surface where the file is read.
pub fn svg_files(dir: &Path) -> impl Iterator<Item = Result<PathBuf, jwalk::Error>> {
    WalkDir::new(dir)
        .sort(true)
        .skip_hidden(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => {
                let path = entry.path();
                let file_type = entry.file_type();
                let is_dir = file_type.is_dir() || (file_type.is_symlink() && path.is_dir());
                (!is_dir && is_svg(&path)).then_some(Ok(path))
            }
            Err(e) => Some(Err(e)),
        })
}

/// Path a traversal error refers to, falling back to the walk root.
pub fn error_path(error: &jwalk::Error, root: &Path) -> PathBuf {
    error.path().unwrap_or(root).to_path_buf()
}

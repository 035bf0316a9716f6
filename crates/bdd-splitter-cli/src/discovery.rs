//! Locating feature files under a source path.

use std::io;
use std::path::{Path, PathBuf};

use bdd_splitter::pipeline::FEATURE_EXTENSION;
use walkdir::{DirEntry, WalkDir};

/// Whether `path` carries the `.feature` extension, in any case.
#[must_use]
pub fn is_feature_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(FEATURE_EXTENSION))
}

fn feature_path(entry: DirEntry) -> Option<PathBuf> {
    if !entry.file_type().is_file() {
        return None;
    }
    let path = entry.into_path();
    is_feature_file(&path).then_some(path)
}

fn convert_walkdir_error(err: walkdir::Error) -> Option<io::Error> {
    if err.loop_ancestor().is_some() {
        return None;
    }
    let message = err.to_string();
    Some(err.into_io_error().unwrap_or_else(|| io::Error::other(message)))
}

/// Feature files named by `source`, in sorted order.
///
/// A file is returned as given, whatever its extension. A directory is
/// searched recursively for `.feature` files without following symlinks. A
/// missing path yields an empty list.
///
/// # Errors
///
/// Returns the first I/O error met while walking a directory.
pub fn collect_feature_files(source: &Path) -> io::Result<Vec<PathBuf>> {
    if !source.exists() {
        return Ok(Vec::new());
    }
    if source.is_file() {
        return Ok(vec![source.to_path_buf()]);
    }

    let mut files = Vec::new();
    for next in WalkDir::new(source).follow_links(false) {
        match next {
            Ok(entry) => files.extend(feature_path(entry)),
            Err(err) => {
                if let Some(err) = convert_walkdir_error(err) {
                    return Err(err);
                }
            }
        }
    }
    files.sort();
    Ok(files)
}

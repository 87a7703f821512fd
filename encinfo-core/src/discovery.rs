//! Discovery of encoder log files.
//!
//! Walks the input directory recursively and keeps regular files whose
//! extension matches the selector. The comparison is case-sensitive.

use crate::error::CoreResult;

use log::debug;
use walkdir::WalkDir;

use std::path::{Path, PathBuf};

/// Strips an optional leading dot from an extension selector.
#[must_use]
pub fn normalize_extension(extension: &str) -> &str {
    extension.strip_prefix('.').unwrap_or(extension)
}

/// Finds log files with the given extension below `input_dir`.
///
/// Paths are returned sorted so runs over the same tree are reproducible.
/// An empty result is not an error.
///
/// # Errors
///
/// * `CoreError::Walkdir` - if the directory is missing or cannot be read
///
/// # Examples
///
/// ```rust,no_run
/// use encinfo_core::find_log_files;
/// use std::path::Path;
///
/// let files = find_log_files(Path::new("/path/to/logs"), ".txt").unwrap();
/// for file in files {
///     println!("  {}", file.display());
/// }
/// ```
pub fn find_log_files(input_dir: &Path, extension: &str) -> CoreResult<Vec<PathBuf>> {
    let wanted = normalize_extension(extension);
    let mut files = Vec::new();

    for entry in WalkDir::new(input_dir).follow_links(true) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some(wanted) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    debug!(
        "Found {} '.{}' file(s) under {}",
        files.len(),
        wanted,
        input_dir.display()
    );
    Ok(files)
}

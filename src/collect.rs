//! Candidate path handling: directory expansion and input validation.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Skipped;

/// Recognized tabular file suffix. Matched case-sensitively.
pub const CSV_EXTENSION: &str = ".csv";

/// Result of validating a list of candidate paths.
#[derive(Debug, Default)]
pub struct Collected {
    pub files: Vec<PathBuf>,
    pub skipped: Vec<Skipped>,
}

fn has_csv_suffix(path: &Path) -> bool {
    path.to_str().is_some_and(|s| s.ends_with(CSV_EXTENSION))
}

/// Replaces every directory candidate with the `.csv` files directly inside it.
///
/// Expansion is non-recursive and sorted by file name. Non-directory
/// candidates are passed through untouched for [`collect_files`] to judge.
pub fn expand_paths<P: AsRef<Path>>(candidates: &[P]) -> Vec<PathBuf> {
    let mut expanded = Vec::new();

    for candidate in candidates {
        let candidate = candidate.as_ref();
        if !candidate.is_dir() {
            expanded.push(candidate.to_path_buf());
            continue;
        }

        let entries = match fs::read_dir(candidate) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %candidate.display(), error = %e, "Cannot list directory, skipping");
                continue;
            }
        };

        let mut found: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_csv_suffix(path))
            .collect();
        found.sort();

        debug!(dir = %candidate.display(), count = found.len(), "Expanded directory");
        expanded.extend(found);
    }

    expanded
}

/// Filters candidates down to existing `.csv` files, preserving order.
///
/// Does not open anything. Each rejected candidate is logged and returned in
/// [`Collected::skipped`].
pub fn collect_files<P: AsRef<Path>>(candidates: &[P]) -> Collected {
    let mut collected = Collected::default();

    for candidate in candidates {
        let path = candidate.as_ref();

        let skip = if !path.exists() {
            Skipped::InvalidPath(path.to_path_buf())
        } else if !has_csv_suffix(path) {
            Skipped::WrongExtension(path.to_path_buf())
        } else {
            collected.files.push(path.to_path_buf());
            continue;
        };

        warn!("{}", skip);
        collected.skipped.push(skip);
    }

    collected
}

//! The directory-tool operations.
//!
//! Each operation is an independent function that drives [`crate::tree::walk`]
//! with a closure over its own accumulator and returns a typed result. The
//! modes never call each other; `dmove` is composed from the copy and delete
//! passes by the binary.

pub mod copy;
pub mod count;
pub mod list;
pub mod prune;
pub mod search;

use std::path::Path;

/// Basename of `path` as a string, lossily decoded.
pub(crate) fn basename(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Exact case-sensitive suffix match, e.g. `"report.txt"` against `".txt"`.
///
/// The suffix is a literal string including any separator, not a parsed
/// extension: a file named exactly `.txt` matches `.txt`.
pub(crate) fn matches_suffix(name: &str, suffix: &str) -> bool {
    !suffix.is_empty() && name.ends_with(suffix)
}

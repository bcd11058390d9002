//! Collected file records and the sort orders applied to them.
//!
//! Sorting always happens after a walk completes, never during it.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// One visited filesystem entry.
///
/// `size` and `modified` are only populated by the modes that sort on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub path: PathBuf,
    /// Basename, used for tie-breaking in the size ordering.
    pub name: String,
    pub size: Option<u64>,
    pub modified: Option<SystemTime>,
}

impl Item {
    fn base(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            name,
            size: None,
            modified: None,
        }
    }

    pub fn path_only(path: &Path) -> Self {
        Self::base(path)
    }

    pub fn with_mtime(path: &Path, modified: SystemTime) -> Self {
        Self {
            modified: Some(modified),
            ..Self::base(path)
        }
    }

    pub fn with_size(path: &Path, size: u64) -> Self {
        Self {
            size: Some(size),
            ..Self::base(path)
        }
    }
}

/// Newest first; ties broken by full path, ascending.
pub fn sort_newest_first(items: &mut [Item]) {
    items.sort_by(|a, b| match b.modified.cmp(&a.modified) {
        Ordering::Equal => a.path.cmp(&b.path),
        other => other,
    });
}

/// Largest first; ties broken by basename, ascending.
pub fn sort_largest_first(items: &mut [Item]) {
    items.sort_by(|a, b| match b.size.cmp(&a.size) {
        Ordering::Equal => a.name.cmp(&b.name),
        other => other,
    });
}

/// Path order, ascending.
pub fn sort_by_path(items: &mut [Item]) {
    items.sort_by(|a, b| a.path.cmp(&b.path));
}

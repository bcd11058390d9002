//! Recursive deletion of files by extension (remd).

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::tree::{Order, VisitKind, walk};

use super::{basename, matches_suffix};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PruneReport {
    pub removed: u64,
    pub failures: u64,
}

/// Delete every regular file under `root` whose basename ends with `suffix`.
///
/// A failed deletion is warned about and counted; the walk continues.
pub fn remove_by_extension(root: &Path, suffix: &str) -> io::Result<PruneReport> {
    let mut report = PruneReport::default();
    walk(root, Order::Pre, &mut |v| {
        if v.kind == VisitKind::File && matches_suffix(&basename(v.path), suffix) {
            match fs::remove_file(v.path) {
                Ok(()) => report.removed += 1,
                Err(err) => {
                    eprintln!("canopy: warning: cannot remove '{}': {}", v.path.display(), err);
                    report.failures += 1;
                }
            }
        }
        Ok(())
    })?;
    Ok(report)
}

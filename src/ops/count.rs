//! Counting operations: tcount, dircnt, sumfilesize.

use std::io;
use std::path::Path;

use serde::Serialize;

use crate::tree::{Order, VisitKind, walk};

use super::{basename, matches_suffix};

/// Per-extension result of `tcount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionCount {
    pub extension: String,
    pub count: u64,
}

/// Count immediate-child regular files of `root` per extension suffix.
///
/// Extensions are literal suffixes (".txt" style); at most three are
/// accepted by the CLI but the function itself takes any number.
pub fn count_by_extension(root: &Path, extensions: &[String]) -> io::Result<Vec<ExtensionCount>> {
    let mut counts: Vec<ExtensionCount> = extensions
        .iter()
        .map(|e| ExtensionCount {
            extension: e.clone(),
            count: 0,
        })
        .collect();

    walk(root, Order::Pre, &mut |v| {
        if v.kind == VisitKind::File && v.depth == 1 {
            let name = basename(v.path);
            for entry in counts.iter_mut() {
                if matches_suffix(&name, &entry.extension) {
                    entry.count += 1;
                }
            }
        }
        Ok(())
    })?;
    Ok(counts)
}

/// Total number of directories under `root`, the root itself included.
pub fn count_dirs(root: &Path) -> io::Result<u64> {
    let mut count = 0;
    walk(root, Order::Pre, &mut |v| {
        if v.kind == VisitKind::Dir {
            count += 1;
        }
        Ok(())
    })?;
    Ok(count)
}

/// Total bytes across every regular file under `root`.
pub fn sum_file_sizes(root: &Path) -> io::Result<u64> {
    let mut total = 0u64;
    walk(root, Order::Pre, &mut |v| {
        if v.kind == VisitKind::File {
            total += v.meta.len();
        }
        Ok(())
    })?;
    Ok(total)
}

//! Recursive filename search (srchf).

use std::io;
use std::path::Path;

use crate::tree::{Order, VisitKind, walk};

use super::basename;

/// Find every regular file under `root` whose basename equals `target`.
///
/// Matches are handed to `on_match` as they are encountered, so the console
/// front-end can print them mid-walk. Returns whether anything matched.
pub fn search_file<F>(root: &Path, target: &str, mut on_match: F) -> io::Result<bool>
where
    F: FnMut(&Path) -> io::Result<()>,
{
    let mut found = false;
    walk(root, Order::Pre, &mut |v| {
        if v.kind == VisitKind::File && basename(v.path) == target {
            found = true;
            on_match(v.path)?;
        }
        Ok(())
    })?;
    Ok(found)
}

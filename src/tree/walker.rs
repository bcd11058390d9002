//! Recursive physical walk over a directory subtree.

use std::fs::{self, Metadata};
use std::io;
use std::path::Path;

/// When a directory is reported relative to its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Directory before its children (creation, collection).
    Pre,
    /// Directory after all of its children (deletion).
    Post,
}

/// What kind of node a visit refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitKind {
    /// Regular file.
    File,
    /// Directory. Reported once, placed according to [`Order`].
    Dir,
    /// Anything else: symlinks, sockets, FIFOs, devices. Never descended.
    Other,
}

/// One visited node. `depth` is relative to the walk root (root itself is 0).
pub struct Visit<'a> {
    pub path: &'a Path,
    pub kind: VisitKind,
    pub meta: &'a Metadata,
    pub depth: usize,
}

/// Walk `root` and every descendant exactly once, calling `visit` per node.
///
/// The traversal is physical: node types come from `symlink_metadata`, so a
/// symlink to a directory is reported as [`VisitKind::Other`] and not entered.
/// Children are visited in file-name order for deterministic output. A
/// visitor error or an I/O error while descending aborts the whole walk.
pub fn walk<F>(root: &Path, order: Order, visit: &mut F) -> io::Result<()>
where
    F: FnMut(Visit<'_>) -> io::Result<()>,
{
    let meta = fs::symlink_metadata(root)?;
    walk_node(root, &meta, 0, order, visit)
}

fn walk_node<F>(
    path: &Path,
    meta: &Metadata,
    depth: usize,
    order: Order,
    visit: &mut F,
) -> io::Result<()>
where
    F: FnMut(Visit<'_>) -> io::Result<()>,
{
    if !meta.is_dir() {
        let kind = if meta.file_type().is_file() {
            VisitKind::File
        } else {
            VisitKind::Other
        };
        return visit(Visit {
            path,
            kind,
            meta,
            depth,
        });
    }

    if order == Order::Pre {
        visit(Visit {
            path,
            kind: VisitKind::Dir,
            meta,
            depth,
        })?;
    }

    let mut entries: Vec<fs::DirEntry> = fs::read_dir(path)?.collect::<io::Result<_>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let child = entry.path();
        let child_meta = fs::symlink_metadata(&child)?;
        walk_node(&child, &child_meta, depth + 1, order, visit)?;
    }

    if order == Order::Post {
        visit(Visit {
            path,
            kind: VisitKind::Dir,
            meta,
            depth,
        })?;
    }

    Ok(())
}

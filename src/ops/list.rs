//! Collecting operations: flist, lfsize, nonwr.

use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::items::{self, Item};
use crate::tree::{Order, VisitKind, walk};

/// Effective-permission write check via `access(2)`.
///
/// This asks the kernel whether the current effective uid may write the
/// file, which accounts for ownership and group membership rather than
/// just the mode bits. Note that root passes for nearly everything.
fn is_writable(path: &Path) -> bool {
    let Ok(cpath) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    unsafe { libc::access(cpath.as_ptr(), libc::W_OK) == 0 }
}

/// Immediate-child regular files of `root`, newest modification time first.
///
/// The whole subtree is still walked; only depth-1 files are collected.
pub fn list_recent(root: &Path) -> io::Result<Vec<Item>> {
    let mut items = Vec::new();
    walk(root, Order::Pre, &mut |v| {
        if v.kind == VisitKind::File && v.depth == 1 {
            items.push(Item::with_mtime(v.path, v.meta.modified()?));
        }
        Ok(())
    })?;
    items::sort_newest_first(&mut items);
    Ok(items)
}

/// Every regular file under `root`, largest first.
pub fn list_by_size(root: &Path) -> io::Result<Vec<Item>> {
    let mut items = Vec::new();
    walk(root, Order::Pre, &mut |v| {
        if v.kind == VisitKind::File {
            items.push(Item::with_size(v.path, v.meta.len()));
        }
        Ok(())
    })?;
    items::sort_largest_first(&mut items);
    Ok(items)
}

/// Every regular file under `root` the current user cannot write,
/// in path order.
pub fn list_non_writable(root: &Path) -> io::Result<Vec<Item>> {
    let mut items = Vec::new();
    walk(root, Order::Pre, &mut |v| {
        if v.kind == VisitKind::File && !is_writable(v.path) {
            items.push(Item::path_only(v.path));
        }
        Ok(())
    })?;
    items::sort_by_path(&mut items);
    Ok(items)
}

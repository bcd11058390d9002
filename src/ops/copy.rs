//! Recursive directory copy and removal (copyd, and both halves of dmove).
//!
//! The copy pass runs pre-order so a directory exists before anything is
//! written into it; the delete pass runs post-order so a directory is only
//! removed once it is empty. Per-item failures are warned about, counted,
//! and never abort the walk.

use std::fs::{self, DirBuilder, File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::tree::{Order, VisitKind, walk};

const COPY_CHUNK: usize = 64 * 1024;

/// A path handed to the copy pass that is not inside the source root.
#[derive(Debug, Error)]
#[error("'{path}' is not inside the copy source '{root}'")]
pub struct MapError {
    pub path: PathBuf,
    pub root: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CopyReport {
    pub dirs: u64,
    pub files: u64,
    pub failures: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RemoveReport {
    pub files: u64,
    pub dirs: u64,
    pub failures: u64,
}

/// Map a source path into the destination tree.
///
/// The destination root is `dst_root/basename(src_root)`, so the source
/// directory keeps its own name under the destination and never overwrites
/// the destination's existing top-level contents. The part of `path` below
/// `src_root` is appended unchanged.
///
/// ```
/// use std::path::Path;
/// use canopy::ops::copy::map_destination;
///
/// let dst = map_destination(
///     Path::new("/home/u/ch4/a/b.txt"),
///     Path::new("/home/u/ch4"),
///     Path::new("/home/u/ch9/backup"),
/// )
/// .unwrap();
/// assert_eq!(dst, Path::new("/home/u/ch9/backup/ch4/a/b.txt"));
/// ```
pub fn map_destination(path: &Path, src_root: &Path, dst_root: &Path) -> Result<PathBuf, MapError> {
    let rel = path.strip_prefix(src_root).map_err(|_| MapError {
        path: path.to_path_buf(),
        root: src_root.to_path_buf(),
    })?;
    // A canonicalized, sandboxed source root always has a final component.
    let base = src_root.file_name().unwrap_or(src_root.as_os_str());
    let mut dst = dst_root.join(base);
    if rel != Path::new("") {
        dst.push(rel);
    }
    Ok(dst)
}

/// Create `path` and any missing parents with `mode`. Existing directories
/// are success.
pub fn ensure_dir(path: &Path, mode: u32) -> io::Result<()> {
    DirBuilder::new().recursive(true).mode(mode).create(path)
}

/// Copy one regular file's bytes, creating or truncating the destination
/// with `mode`. Chunked reads; short writes are completed by `write_all`.
pub fn copy_file_bytes(src: &Path, dst: &Path, mode: u32) -> io::Result<()> {
    let mut reader = File::open(src)?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .open(dst)?;

    let mut buf = vec![0u8; COPY_CHUNK];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n])?;
    }
    Ok(())
}

fn mode_bits(meta: &fs::Metadata) -> u32 {
    meta.permissions().mode() & 0o777
}

/// Copy the subtree rooted at `src_root` under `dst_root`.
///
/// Regular files and directories are copied; everything else (symlinks,
/// devices, ...) is skipped. Directory modes follow the source; a file's
/// missing parent directories are created with 0o755.
pub fn copy_tree(src_root: &Path, dst_root: &Path) -> io::Result<CopyReport> {
    let mut report = CopyReport::default();
    walk(src_root, Order::Pre, &mut |v| {
        let dst = match map_destination(v.path, src_root, dst_root) {
            Ok(dst) => dst,
            Err(err) => {
                eprintln!("canopy: warning: {}", err);
                report.failures += 1;
                return Ok(());
            }
        };
        match v.kind {
            VisitKind::Dir => match ensure_dir(&dst, mode_bits(v.meta)) {
                Ok(()) => report.dirs += 1,
                Err(err) => {
                    eprintln!(
                        "canopy: warning: cannot create '{}': {}",
                        dst.display(),
                        err
                    );
                    report.failures += 1;
                }
            },
            VisitKind::File => {
                if let Some(parent) = dst.parent() {
                    if let Err(err) = ensure_dir(parent, 0o755) {
                        eprintln!(
                            "canopy: warning: cannot create '{}': {}",
                            parent.display(),
                            err
                        );
                        report.failures += 1;
                        return Ok(());
                    }
                }
                match copy_file_bytes(v.path, &dst, mode_bits(v.meta)) {
                    Ok(()) => report.files += 1,
                    Err(err) => {
                        eprintln!(
                            "canopy: warning: cannot copy '{}': {}",
                            v.path.display(),
                            err
                        );
                        report.failures += 1;
                    }
                }
            }
            VisitKind::Other => {}
        }
        Ok(())
    })?;
    Ok(report)
}

/// Delete the subtree rooted at `root`, files first, each directory after
/// its contents. Best effort: failures are warned about and counted.
pub fn remove_tree(root: &Path) -> io::Result<RemoveReport> {
    let mut report = RemoveReport::default();
    walk(root, Order::Post, &mut |v| {
        let result = match v.kind {
            // unlink works on symlinks and other non-directories too
            VisitKind::File | VisitKind::Other => fs::remove_file(v.path).map(|()| {
                report.files += 1;
            }),
            VisitKind::Dir => fs::remove_dir(v.path).map(|()| {
                report.dirs += 1;
            }),
        };
        if let Err(err) = result {
            eprintln!(
                "canopy: warning: failed to delete '{}': {}",
                v.path.display(),
                err
            );
            report.failures += 1;
        }
        Ok(())
    })?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, bytes: &[u8]) -> PathBuf {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn destination_mapping() {
        let dst = map_destination(
            Path::new("/home/u/ch4/a/b.txt"),
            Path::new("/home/u/ch4"),
            Path::new("/home/u/ch9/backup"),
        )
        .unwrap();
        assert_eq!(dst, Path::new("/home/u/ch9/backup/ch4/a/b.txt"));
    }

    #[test]
    fn mapping_root_itself() {
        let dst = map_destination(
            Path::new("/home/u/ch4"),
            Path::new("/home/u/ch4"),
            Path::new("/home/u/dest"),
        )
        .unwrap();
        assert_eq!(dst, Path::new("/home/u/dest/ch4"));
    }

    #[test]
    fn mapping_outside_source_fails() {
        let err = map_destination(
            Path::new("/home/u/elsewhere/f"),
            Path::new("/home/u/ch4"),
            Path::new("/home/u/dest"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("not inside"));
    }

    #[test]
    fn copy_tree_reproduces_structure_and_bytes() {
        let outer = TempDir::new().unwrap();
        let src = outer.path().join("src");
        let dst = outer.path().join("dst");
        fs::create_dir_all(&dst).unwrap();
        write(&src, "a.txt", b"alpha");
        write(&src, "d/c.txt", b"nested");
        fs::create_dir(src.join("empty")).unwrap();

        let report = copy_tree(&src, &dst).unwrap();
        assert_eq!(report.files, 2);
        assert_eq!(report.dirs, 3); // src itself, d, empty
        assert_eq!(report.failures, 0);

        let copied = dst.join("src");
        assert_eq!(fs::read(copied.join("a.txt")).unwrap(), b"alpha");
        assert_eq!(fs::read(copied.join("d/c.txt")).unwrap(), b"nested");
        assert!(copied.join("empty").is_dir());
    }

    #[test]
    fn copy_preserves_file_mode() {
        let outer = TempDir::new().unwrap();
        let src = outer.path().join("src");
        let dst = outer.path().join("dst");
        fs::create_dir_all(&dst).unwrap();
        let f = write(&src, "script.sh", b"#!/bin/sh\n");
        fs::set_permissions(&f, fs::Permissions::from_mode(0o750)).unwrap();

        copy_tree(&src, &dst).unwrap();
        let copied = dst.join("src/script.sh");
        let mode = fs::metadata(&copied).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o750);
    }

    #[test]
    fn copy_skips_symlinks() {
        let outer = TempDir::new().unwrap();
        let src = outer.path().join("src");
        let dst = outer.path().join("dst");
        fs::create_dir_all(&dst).unwrap();
        write(&src, "real.txt", b"x");
        std::os::unix::fs::symlink(src.join("real.txt"), src.join("link.txt")).unwrap();

        let report = copy_tree(&src, &dst).unwrap();
        assert_eq!(report.files, 1);
        assert!(dst.join("src/real.txt").exists());
        assert!(!dst.join("src/link.txt").exists());
    }

    #[test]
    fn remove_tree_deletes_everything() {
        let outer = TempDir::new().unwrap();
        let root = outer.path().join("victim");
        write(&root, "a.txt", b"x");
        write(&root, "d/deep/c.txt", b"x");
        std::os::unix::fs::symlink("a.txt", root.join("link")).unwrap();

        let report = remove_tree(&root).unwrap();
        assert!(!root.exists());
        assert_eq!(report.files, 3); // two files + the symlink
        assert_eq!(report.dirs, 3); // deep, d, victim
        assert_eq!(report.failures, 0);
    }

    #[test]
    fn copy_then_remove_is_a_move() {
        let outer = TempDir::new().unwrap();
        let src = outer.path().join("src");
        let dst = outer.path().join("dst");
        fs::create_dir_all(&dst).unwrap();
        write(&src, "d/c.txt", b"payload");

        copy_tree(&src, &dst).unwrap();
        remove_tree(&src).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read(dst.join("src/d/c.txt")).unwrap(), b"payload");
    }

    #[test]
    fn ensure_dir_accepts_existing() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("x/y");
        ensure_dir(&target, 0o755).unwrap();
        ensure_dir(&target, 0o755).unwrap();
        assert!(target.is_dir());
    }

    #[test]
    fn copy_file_bytes_truncates_existing_destination() {
        let dir = TempDir::new().unwrap();
        let src = write(dir.path(), "src.txt", b"short");
        let dst = write(dir.path(), "dst.txt", b"something much longer");

        copy_file_bytes(&src, &dst, 0o644).unwrap();
        assert_eq!(fs::read(&dst).unwrap(), b"short");
    }
}

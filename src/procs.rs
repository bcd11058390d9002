//! Process-tree ancestry queries.
//!
//! The process table is an external, read-only data source queried by pid;
//! every lookup is a fresh point-in-time read. All queries go through one
//! backward chain walk, [`find_in_chain`], bounded by the finite pid space
//! and the `parent <= 1` / self-parent stop conditions. A chain that breaks
//! mid-walk (the process vanished) simply means "not found", never an
//! error.

use std::fs;
use std::path::Path;

pub type Pid = i32;

/// Command name that counts as "a shell".
pub const SHELL_COMM: &str = "bash";

/// Read access to a process table keyed by pid.
pub trait ProcessTable {
    /// Parent pid of `pid`, or `None` if the process cannot be read.
    fn parent_of(&self, pid: Pid) -> Option<Pid>;
    /// Short command name of `pid`.
    fn comm_of(&self, pid: Pid) -> Option<String>;
    /// Every pid currently present, in no particular order.
    fn pids(&self) -> Vec<Pid>;
}

/// The live `/proc` table.
pub struct ProcFs;

impl ProcessTable for ProcFs {
    fn parent_of(&self, pid: Pid) -> Option<Pid> {
        let status = fs::read_to_string(format!("/proc/{pid}/status")).ok()?;
        let line = status.lines().find_map(|l| l.strip_prefix("PPid:"))?;
        line.trim().parse().ok()
    }

    fn comm_of(&self, pid: Pid) -> Option<String> {
        let comm = fs::read_to_string(format!("/proc/{pid}/comm")).ok()?;
        Some(comm.trim_end_matches('\n').to_string())
    }

    fn pids(&self) -> Vec<Pid> {
        let Ok(entries) = fs::read_dir(Path::new("/proc")) else {
            return Vec::new();
        };
        entries
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().to_str().and_then(|n| n.parse().ok()))
            .filter(|pid| *pid > 0)
            .collect()
    }
}

/// Walk the ancestor chain starting at `start`, applying `pred` to each pid.
///
/// Returns the first pid for which `pred` is true. Stops with `None` when a
/// lookup fails, the parent equals the current pid (cycle), or the parent is
/// `<= 1`, but gives `pred` one look at that terminal parent first, so an
/// anchor of pid 1 still matches.
pub fn find_in_chain<T, F>(table: &T, start: Pid, mut pred: F) -> Option<Pid>
where
    T: ProcessTable,
    F: FnMut(Pid) -> bool,
{
    let mut current = start;
    loop {
        if current <= 0 {
            return None;
        }
        if pred(current) {
            return Some(current);
        }
        let parent = table.parent_of(current)?;
        if parent <= 1 || parent == current {
            if parent > 0 && parent != current && pred(parent) {
                return Some(parent);
            }
            return None;
        }
        current = parent;
    }
}

/// Whether `pid` is in the subtree rooted at `root` (a pid is in its own).
pub fn in_subtree<T: ProcessTable>(table: &T, pid: Pid, root: Pid) -> bool {
    find_in_chain(table, pid, |p| p == root).is_some()
}

/// How many processes have `anchor` in their ancestor chain, `anchor`
/// itself excluded. One bounded backward walk per table entry.
pub fn count_descendants<T: ProcessTable>(table: &T, anchor: Pid) -> u64 {
    table
        .pids()
        .into_iter()
        .filter(|pid| *pid != anchor)
        .filter(|pid| find_in_chain(table, *pid, |p| p == anchor).is_some())
        .count() as u64
}

/// Nearest ancestor of `from` (including `from`) whose comm is [`SHELL_COMM`].
pub fn shell_ancestor<T: ProcessTable>(table: &T, from: Pid) -> Option<Pid> {
    find_in_chain(table, from, |p| {
        table.comm_of(p).as_deref() == Some(SHELL_COMM)
    })
}

/// All shell pids plus the number of non-shell processes whose chain
/// reaches any of them.
pub fn shell_population<T: ProcessTable>(table: &T) -> (Vec<Pid>, u64) {
    let mut shells: Vec<Pid> = table
        .pids()
        .into_iter()
        .filter(|pid| table.comm_of(*pid).as_deref() == Some(SHELL_COMM))
        .collect();
    shells.sort_unstable();

    let count = table
        .pids()
        .into_iter()
        .filter(|pid| !shells.contains(pid))
        .filter(|pid| find_in_chain(table, *pid, |p| shells.contains(&p)).is_some())
        .count() as u64;

    (shells, count)
}

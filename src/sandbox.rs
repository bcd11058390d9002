//! Path resolution and confinement.
//!
//! Every path argument the tools accept is canonicalized and then checked
//! against a single allowed root (the "boundary"). Operations never start on
//! a path that failed either step.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable that overrides the boundary, mainly for tests.
pub const BOUNDARY_ENV: &str = "CANOPY_HOME";

#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("neither {BOUNDARY_ENV} nor HOME is set")]
    BoundaryUnset,

    #[error("cannot resolve '{path}': {source}")]
    Unresolvable { path: PathBuf, source: io::Error },

    #[error("'{path}' is outside the allowed root '{boundary}'")]
    OutsideBoundary { path: PathBuf, boundary: PathBuf },
}

/// True iff `path` equals `boundary` or sits below it.
///
/// The comparison is component-wise, so sibling directories sharing a string
/// prefix are rejected: `/home/user2` is not under `/home/user`.
pub fn is_under(path: &Path, boundary: &Path) -> bool {
    path.starts_with(boundary)
}

/// The confinement boundary plus resolution of paths against it.
#[derive(Debug, Clone)]
pub struct Sandbox {
    boundary: PathBuf,
}

impl Sandbox {
    /// Build a sandbox from the environment: `CANOPY_HOME` if set, else `HOME`.
    pub fn from_env() -> Result<Self, SandboxError> {
        let raw = env::var_os(BOUNDARY_ENV)
            .or_else(|| env::var_os("HOME"))
            .ok_or(SandboxError::BoundaryUnset)?;
        Self::new(PathBuf::from(raw))
    }

    /// Build a sandbox rooted at an explicit path. The path must exist.
    pub fn new(boundary: impl Into<PathBuf>) -> Result<Self, SandboxError> {
        let raw = boundary.into();
        let boundary = std::fs::canonicalize(&raw).map_err(|source| SandboxError::Unresolvable {
            path: raw,
            source,
        })?;
        Ok(Self { boundary })
    }

    pub fn boundary(&self) -> &Path {
        &self.boundary
    }

    /// Canonicalize `raw` and require it to lie under the boundary.
    pub fn resolve(&self, raw: &Path) -> Result<PathBuf, SandboxError> {
        let abs = std::fs::canonicalize(raw).map_err(|source| SandboxError::Unresolvable {
            path: raw.to_path_buf(),
            source,
        })?;
        if !is_under(&abs, &self.boundary) {
            return Err(SandboxError::OutsideBoundary {
                path: abs,
                boundary: self.boundary.clone(),
            });
        }
        Ok(abs)
    }

    /// True iff `path` is the boundary itself (copy/move reject this).
    pub fn is_boundary(&self, path: &Path) -> bool {
        path == self.boundary
    }
}

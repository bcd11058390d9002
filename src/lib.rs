//! Canopy - sandboxed directory-tree operations and process-tree queries

pub mod items;
pub mod ops;
pub mod output;
pub mod procs;
pub mod sandbox;
pub mod tree;

pub use items::Item;
pub use sandbox::{Sandbox, SandboxError, is_under};
pub use tree::{Order, Visit, VisitKind, walk};

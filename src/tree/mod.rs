//! Directory tree walking logic
//!
//! A single physical (non-link-following) depth-first walker drives every
//! mode of the directory tool. Callers choose whether directories are
//! reported before their contents (`Order::Pre`, needed so copy can create a
//! destination directory before writing files into it) or after
//! (`Order::Post`, needed so deletion only sees already-emptied directories).

mod walker;

pub use walker::{Order, Visit, VisitKind, walk};

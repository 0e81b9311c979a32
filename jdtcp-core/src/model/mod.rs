//! Classpath entry model
//!
//! Raw entries come from parsed project metadata; resolved entries are only
//! produced by a resolution run.

pub mod entry;
pub mod project;
pub mod resolved;

pub use entry::{AccessRule, AccessRuleKind, EntryKind, RawClasspathEntry};
pub use project::{Project, DEFAULT_OUTPUT_FOLDER};
pub use resolved::{AccessRestrictions, ResolvedClasspath, ResolvedClasspathEntry};

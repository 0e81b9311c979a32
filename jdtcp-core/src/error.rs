//! Error and warning types for classpath resolution

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::model::EntryKind;

/// Result type for resolution operations
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Fatal resolution error. Aborts the walk for the requested root project;
/// nothing is cached.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no resolver can handle {kind} entry '{path}' in project '{project}'")]
    UnresolvableEntry {
        project: String,
        kind: EntryKind,
        path: String,
    },

    #[error("unknown classpath variable '{variable}' in entry '{path}' of project '{project}'")]
    UnknownVariable {
        project: String,
        variable: String,
        path: String,
    },

    #[error("project '{project}' references '{referenced}' which is not part of the workspace")]
    MissingProject { project: String, referenced: String },

    #[error("no default java runtime registered, needed by container '{container}' in project '{project}'")]
    NoDefaultRuntime { project: String, container: String },

    #[error("boot classpath already set when resolving '{path}' in project '{project}'")]
    BootClasspathReassigned { project: String, path: String },

    #[error("boot classpath set from '{path}' in non-root project '{project}'")]
    BootClasspathOutsideRoot { project: String, path: String },
}

/// Recoverable condition reported alongside a successful result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolveWarning {
    /// A named runtime was missing and the default runtime was used instead
    MissingRuntime {
        project: String,
        container: String,
        runtime_id: String,
        fallback_version: String,
        fallback_location: PathBuf,
    },
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveWarning::MissingRuntime {
                container,
                fallback_version,
                fallback_location,
                ..
            } => write!(
                f,
                "Could not find JRE for {}. Using default JRE (Version: {}, Location: {}).",
                container,
                fallback_version,
                fallback_location.display()
            ),
        }
    }
}

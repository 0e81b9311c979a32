//! jdt-classpath - Eclipse JDT classpath resolution
//!
//! Resolves the effective build or runtime classpath of a project from its
//! raw classpath declarations and those of the projects it references.
//!
//! # Architecture
//!
//! ```text
//! jdtcp-config/  - Configuration data (cache switch, log levels)
//! jdtcp-core/    - Entry model, containers, resolver chain, walk, cache
//! jdtcp-cli/     - `jdtcp` binary over a JSON workspace manifest
//! ```
//!
//! # Quick Start
//!
//! ```
//! use jdt_classpath::{JdtResolver, MemoryWorkspace, Project, RawClasspathEntry};
//!
//! let workspace = MemoryWorkspace::new("/ws");
//! let app = workspace.register(
//!     Project::new("app", "/ws/app").with_entry(RawClasspathEntry::library("lib/a.jar")),
//! );
//!
//! let resolver = JdtResolver::new();
//! let classpath = resolver
//!     .resolve_project_classpath(&workspace, &app, true, false, &[])
//!     .unwrap();
//! assert_eq!(classpath.to_path_string(":"), "app/lib/a.jar");
//! ```

pub use jdtcp_config::{LogConfig, LogLevel, Phase, ResolverConfig, DISABLE_CACHE_ENV};
pub use jdtcp_core::*;

//! jdtcp Core - classpath resolution engine
//!
//! Turns the raw classpath declarations of a project, and of every project it
//! references, into an ordered, de-duplicated list of locations plus an
//! optional boot classpath.
//!
//! # Architecture
//!
//! ```text
//! JdtResolver ──► ClasspathCache (hit? done)
//!      │
//!      ▼
//! ResolverJob ──► ResolverExecutor ──► ResolverChain ──► EntryResolver (per kind)
//!                      │                                     │
//!                      └──────── ResolutionContext ◄─────────┘
//!                                                            │
//!                                      ContainerRegistry ◄───┘ (CONTAINER entries)
//! ```

pub mod cache;
pub mod container;
pub mod context;
pub mod error;
pub mod executor;
pub mod job;
pub mod model;
pub mod resolver;
pub mod service;
pub mod workspace;

pub use cache::{CacheKey, ClasspathCache};
pub use container::{
    container_types, unescape_container_path, Archive, ClassPathContainer, ClassPathElementsRegistry,
    ClassPathVariable, ContainerRegistry, ContainerResolver, JavaProfile, JavaRuntime, JavaRuntimeRegistry,
    UserLibraries, UserLibrary,
};
pub use context::{ProjectState, ResolutionContext};
pub use error::{ResolveError, ResolveResult, ResolveWarning};
pub use executor::ResolverExecutor;
pub use job::{ContainerArgument, ResolverJob};
pub use model::{
    AccessRestrictions, AccessRule, AccessRuleKind, EntryKind, Project, RawClasspathEntry, ResolvedClasspath,
    ResolvedClasspathEntry,
};
pub use resolver::{EntryResolver, ResolverChain};
pub use service::{global, init_global, is_global_initialized, JdtResolver, JdtResolverBuilder};
pub use workspace::{MemoryWorkspace, Workspace};

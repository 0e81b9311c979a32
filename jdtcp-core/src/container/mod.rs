//! Classpath containers
//!
//! A CONTAINER entry names an id; the container resolvers registered here turn
//! that id into concrete locations. Resolvers are consulted in registration
//! order and the first one claiming the id wins.

pub mod elements;
pub mod jre;
pub mod runtime;
pub mod user_library;

use std::borrow::Cow;
use std::sync::Arc;

use crate::context::ResolutionContext;
use crate::error::ResolveResult;
use crate::model::RawClasspathEntry;

pub use elements::{
    ClassPathContainer, ClassPathElementsRegistry, ClassPathElementsRegistryResolver, ClassPathVariable,
};
pub use jre::JreContainerResolver;
pub use runtime::{JavaProfile, JavaRuntime, JavaRuntimeRegistry};
pub use user_library::{Archive, UserLibraries, UserLibrary, UserLibraryContainerResolver};

/// Well known container ids and prefixes
pub mod container_types {
    /// The JRE container, denoting the workspace default runtime
    pub const JRE_CONTAINER: &str = "org.eclipse.jdt.launching.JRE_CONTAINER";

    /// Prefix of a JRE container naming a specific runtime or profile
    pub const VMTYPE_PREFIX: &str =
        "org.eclipse.jdt.launching.JRE_CONTAINER/org.eclipse.jdt.internal.debug.ui.launcher.StandardVMType/";

    /// Prefix written by newer workspaces
    pub const STANDARD_VMTYPE_PREFIX: &str =
        "org.eclipse.jdt.launching.JRE_CONTAINER/org.eclipse.jdt.internal.launching.StandardVMType/";

    /// Prefix of a user library container
    pub const USER_LIBRARY_CONTAINER: &str = "org.eclipse.jdt.USER_LIBRARY/";

    /// Strip a VM type prefix, yielding the runtime id / profile key
    pub fn vm_key(path: &str) -> Option<&str> {
        path.strip_prefix(VMTYPE_PREFIX)
            .or_else(|| path.strip_prefix(STANDARD_VMTYPE_PREFIX))
    }
}

/// Container paths may carry `%` in place of a literal space
pub fn unescape_container_path(path: &str) -> Cow<'_, str> {
    if path.contains('%') {
        Cow::Owned(path.replace('%', " "))
    } else {
        Cow::Borrowed(path)
    }
}

/// Resolves one family of container ids
pub trait ContainerResolver: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Pure predicate over the un-escaped container path
    fn can_resolve_container(&self, container_path: &str) -> bool;

    /// Contribute the container's locations to `ctx`
    fn resolve_container(
        &self,
        container_path: &str,
        entry: &RawClasspathEntry,
        ctx: &mut ResolutionContext<'_>,
    ) -> ResolveResult<()>;
}

/// Ordered set of container resolvers
#[derive(Default, Clone)]
pub struct ContainerRegistry {
    resolvers: Vec<Arc<dyn ContainerResolver>>,
}

impl std::fmt::Debug for ContainerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerRegistry")
            .field("resolvers", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl ContainerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resolver; it is consulted after those already registered
    pub fn register(&mut self, resolver: Arc<dyn ContainerResolver>) {
        self.resolvers.push(resolver);
    }

    /// The first resolver claiming `container_path`
    pub fn find(&self, container_path: &str) -> Option<&dyn ContainerResolver> {
        self.resolvers
            .iter()
            .find(|r| r.can_resolve_container(container_path))
            .map(|r| r.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resolvers.iter().map(|r| r.name())
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

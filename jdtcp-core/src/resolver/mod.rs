//! Entry resolvers and the resolver chain
//!
//! Each resolver claims exactly one entry kind. The chain asks them in a fixed
//! order and hands the entry to the first one that claims it:
//!
//! ```text
//! VARIABLE → CONTAINER → SOURCE → PROJECT → LIBRARY → OUTPUT
//! ```

pub mod container;
pub mod library;
pub mod output;
pub mod project;
pub mod source;
pub mod variable;

use std::sync::Arc;

use crate::container::{ClassPathElementsRegistry, ContainerRegistry, JavaRuntimeRegistry};
use crate::context::ResolutionContext;
use crate::error::{ResolveError, ResolveResult};
use crate::model::RawClasspathEntry;

pub use container::ContainerEntryResolver;
pub use library::LibraryEntryResolver;
pub use output::OutputEntryResolver;
pub use project::ProjectEntryResolver;
pub use source::SourceEntryResolver;
pub use variable::VariableEntryResolver;

/// Resolves one kind of raw classpath entry
pub trait EntryResolver: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Pure predicate over the entry's kind and path
    fn can_resolve(&self, entry: &RawClasspathEntry) -> bool;

    /// Resolve `entry`, recording the outcome in `ctx`
    fn resolve(&self, entry: &RawClasspathEntry, ctx: &mut ResolutionContext<'_>) -> ResolveResult<()>;
}

/// Ordered list of entry resolvers, first match wins
pub struct ResolverChain {
    resolvers: Vec<Box<dyn EntryResolver>>,
}

impl std::fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverChain")
            .field("resolvers", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl ResolverChain {
    /// Build a chain from resolvers in priority order
    pub fn new(resolvers: Vec<Box<dyn EntryResolver>>) -> Self {
        Self { resolvers }
    }

    /// The standard chain in its fixed order
    pub fn standard(
        elements: Arc<ClassPathElementsRegistry>,
        runtimes: Arc<JavaRuntimeRegistry>,
        containers: ContainerRegistry,
    ) -> Self {
        Self::new(vec![
            Box::new(VariableEntryResolver::new(elements, runtimes)),
            Box::new(ContainerEntryResolver::new(containers)),
            Box::new(SourceEntryResolver),
            Box::new(ProjectEntryResolver),
            Box::new(LibraryEntryResolver),
            Box::new(OutputEntryResolver),
        ])
    }

    /// The resolver that handles `entry`, if any
    pub fn find(&self, entry: &RawClasspathEntry) -> Option<&dyn EntryResolver> {
        self.resolvers
            .iter()
            .find(|r| r.can_resolve(entry))
            .map(|r| r.as_ref())
    }

    /// Hand `entry` to the first resolver claiming it
    pub fn dispatch(&self, entry: &RawClasspathEntry, ctx: &mut ResolutionContext<'_>) -> ResolveResult<()> {
        match self.find(entry) {
            Some(resolver) => {
                tracing::trace!(
                    target: "jdtcp::walk",
                    resolver = resolver.name(),
                    project = ctx.current_project().name(),
                    entry = %entry,
                    "dispatch"
                );
                resolver.resolve(entry, ctx)
            }
            None => Err(ResolveError::UnresolvableEntry {
                project: ctx.current_project().name().to_string(),
                kind: entry.kind,
                path: entry.path.clone(),
            }),
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::ResolverJob;
    use crate::model::{EntryKind, Project};
    use crate::workspace::{MemoryWorkspace, Workspace};

    struct Claims(&'static str, EntryKind);

    impl EntryResolver for Claims {
        fn name(&self) -> &'static str {
            self.0
        }

        fn can_resolve(&self, entry: &RawClasspathEntry) -> bool {
            entry.is_kind(self.1)
        }

        fn resolve(&self, _entry: &RawClasspathEntry, ctx: &mut ResolutionContext<'_>) -> ResolveResult<()> {
            ctx.add_classpath_entry(crate::model::ResolvedClasspathEntry::new(self.0));
            Ok(())
        }
    }

    #[test]
    fn test_standard_order() {
        let chain = ResolverChain::standard(
            Arc::new(ClassPathElementsRegistry::new()),
            Arc::new(JavaRuntimeRegistry::new()),
            ContainerRegistry::new(),
        );
        assert_eq!(
            chain.names().collect::<Vec<_>>(),
            vec!["variable", "container", "source", "project", "library", "output"]
        );
    }

    #[test]
    fn test_first_match_wins() {
        let chain = ResolverChain::new(vec![
            Box::new(Claims("first", EntryKind::Library)),
            Box::new(Claims("second", EntryKind::Library)),
        ]);
        let workspace = MemoryWorkspace::new("/ws");
        let project = workspace.register(Project::new("app", "/ws/app"));
        let job = ResolverJob::new(project, &workspace, false, false, Vec::new());
        let mut ctx = ResolutionContext::new(&job);

        chain
            .dispatch(&RawClasspathEntry::library("a.jar"), &mut ctx)
            .unwrap();
        let result = ctx.into_resolved_classpath();
        assert_eq!(result.to_path_string(":"), "first");
        assert!(workspace.has_project("app"));
    }

    #[test]
    fn test_unclaimed_entry_is_an_error() {
        let chain = ResolverChain::new(vec![Box::new(Claims("lib", EntryKind::Library))]);
        let workspace = MemoryWorkspace::new("/ws");
        let project = workspace.register(Project::new("app", "/ws/app"));
        let job = ResolverJob::new(project, &workspace, false, false, Vec::new());
        let mut ctx = ResolutionContext::new(&job);

        let err = chain
            .dispatch(&RawClasspathEntry::output("bin"), &mut ctx)
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnresolvableEntry {
                project: "app".to_string(),
                kind: EntryKind::Output,
                path: "bin".to_string(),
            }
        );
    }
}

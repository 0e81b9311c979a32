use super::EntryResolver;
use crate::container::{unescape_container_path, ContainerRegistry};
use crate::context::ResolutionContext;
use crate::error::{ResolveError, ResolveResult};
use crate::model::{EntryKind, RawClasspathEntry};

/// Delegates CONTAINER entries to the first container resolver claiming them.
///
/// An entry no container resolver claims is not claimed here either, so the
/// chain reports it as unresolvable.
#[derive(Debug, Clone)]
pub struct ContainerEntryResolver {
    containers: ContainerRegistry,
}

impl ContainerEntryResolver {
    pub fn new(containers: ContainerRegistry) -> Self {
        Self { containers }
    }

    pub fn containers(&self) -> &ContainerRegistry {
        &self.containers
    }
}

impl EntryResolver for ContainerEntryResolver {
    fn name(&self) -> &'static str {
        "container"
    }

    fn can_resolve(&self, entry: &RawClasspathEntry) -> bool {
        entry.is_kind(EntryKind::Container)
            && self
                .containers
                .find(&unescape_container_path(&entry.path))
                .is_some()
    }

    fn resolve(&self, entry: &RawClasspathEntry, ctx: &mut ResolutionContext<'_>) -> ResolveResult<()> {
        let container_path = unescape_container_path(&entry.path);
        let Some(resolver) = self.containers.find(&container_path) else {
            return Err(ResolveError::UnresolvableEntry {
                project: ctx.current_project().name().to_string(),
                kind: entry.kind,
                path: entry.path.clone(),
            });
        };
        tracing::debug!(
            target: "jdtcp::container",
            container = %container_path,
            resolver = resolver.name(),
            project = ctx.current_project().name(),
            "resolving container"
        );
        resolver.resolve_container(&container_path, entry, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{ClassPathElementsRegistry, ClassPathElementsRegistryResolver};
    use crate::job::ResolverJob;
    use crate::model::Project;
    use crate::workspace::MemoryWorkspace;
    use std::path::Path;
    use std::sync::Arc;

    fn resolver() -> ContainerEntryResolver {
        let elements = Arc::new(ClassPathElementsRegistry::new());
        elements.register_container("My Libs", ["/opt/a.jar", "/opt/b.jar"]);
        let mut containers = ContainerRegistry::new();
        containers.register(Arc::new(ClassPathElementsRegistryResolver::new(elements)));
        ContainerEntryResolver::new(containers)
    }

    #[test]
    fn test_claims_only_known_containers() {
        let resolver = resolver();
        assert!(resolver.can_resolve(&RawClasspathEntry::container("My%Libs")));
        assert!(resolver.can_resolve(&RawClasspathEntry::container("My Libs")));
        assert!(!resolver.can_resolve(&RawClasspathEntry::container("Unknown")));
        assert!(!resolver.can_resolve(&RawClasspathEntry::library("My Libs")));
    }

    #[test]
    fn test_escaped_container_resolves() {
        let workspace = MemoryWorkspace::new("/ws");
        let project = workspace.register(Project::new("app", "/ws/app"));
        let job = ResolverJob::new(project, &workspace, false, false, Vec::new());
        let mut ctx = ResolutionContext::new(&job);

        resolver()
            .resolve(&RawClasspathEntry::container("My%Libs"), &mut ctx)
            .unwrap();
        let result = ctx.into_resolved_classpath();
        assert_eq!(
            result.classpath_files(),
            vec![Path::new("/opt/a.jar"), Path::new("/opt/b.jar")]
        );
        assert_eq!(result.entries().len(), 1);
    }
}

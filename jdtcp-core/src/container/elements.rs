//! User declared classpath containers and classpath variables

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use super::ContainerResolver;
use crate::context::ResolutionContext;
use crate::error::ResolveResult;
use crate::model::{RawClasspathEntry, ResolvedClasspathEntry};

/// A named list of locations declared by external configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassPathContainer {
    pub name: String,
    pub paths: Vec<PathBuf>,
}

/// A named location used as the root of VARIABLE entries
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassPathVariable {
    pub name: String,
    pub path: PathBuf,
}

/// Registry of user declared containers and variables.
///
/// Populated before resolution starts; re-registering a name replaces it.
#[derive(Debug, Default)]
pub struct ClassPathElementsRegistry {
    containers: RwLock<HashMap<String, ClassPathContainer>>,
    variables: RwLock<HashMap<String, ClassPathVariable>>,
}

impl ClassPathElementsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_container<I, P>(&self, name: impl Into<String>, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let container = ClassPathContainer {
            name: name.into(),
            paths: paths.into_iter().map(Into::into).collect(),
        };
        let mut containers = self
            .containers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if containers.contains_key(&container.name) {
            tracing::debug!(target: "jdtcp::container", name = %container.name, "replacing classpath container");
        }
        containers.insert(container.name.clone(), container);
    }

    pub fn register_variable(&self, name: impl Into<String>, path: impl Into<PathBuf>) {
        let variable = ClassPathVariable {
            name: name.into(),
            path: path.into(),
        };
        let mut variables = self
            .variables
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if variables.contains_key(&variable.name) {
            tracing::debug!(target: "jdtcp::container", name = %variable.name, "replacing classpath variable");
        }
        variables.insert(variable.name.clone(), variable);
    }

    pub fn has_container(&self, name: &str) -> bool {
        self.containers
            .read()
            .map(|c| c.contains_key(name))
            .unwrap_or(false)
    }

    pub fn container(&self, name: &str) -> Option<ClassPathContainer> {
        self.containers.read().ok()?.get(name).cloned()
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables
            .read()
            .map(|v| v.contains_key(name))
            .unwrap_or(false)
    }

    pub fn variable(&self, name: &str) -> Option<ClassPathVariable> {
        self.variables.read().ok()?.get(name).cloned()
    }
}

/// Resolves containers declared in a [`ClassPathElementsRegistry`]
#[derive(Debug, Clone)]
pub struct ClassPathElementsRegistryResolver {
    registry: Arc<ClassPathElementsRegistry>,
}

impl ClassPathElementsRegistryResolver {
    pub fn new(registry: Arc<ClassPathElementsRegistry>) -> Self {
        Self { registry }
    }
}

impl ContainerResolver for ClassPathElementsRegistryResolver {
    fn name(&self) -> &'static str {
        "classpath-elements"
    }

    fn can_resolve_container(&self, container_path: &str) -> bool {
        self.registry.has_container(container_path)
    }

    fn resolve_container(
        &self,
        container_path: &str,
        _entry: &RawClasspathEntry,
        ctx: &mut ResolutionContext<'_>,
    ) -> ResolveResult<()> {
        // registries are read-only during resolution, the lookup cannot miss
        // after can_resolve_container accepted the path
        if let Some(container) = self.registry.container(container_path) {
            let paths: Vec<PathBuf> = container
                .paths
                .into_iter()
                .map(|p| ctx.render_path(p))
                .collect();
            ctx.add_classpath_entry(ResolvedClasspathEntry::from_paths(paths));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containers() {
        let registry = ClassPathElementsRegistry::new();
        assert!(!registry.has_container("LIBS"));

        registry.register_container("LIBS", ["/opt/a.jar", "/opt/b.jar"]);
        assert!(registry.has_container("LIBS"));
        assert_eq!(registry.container("LIBS").unwrap().paths.len(), 2);

        registry.register_container("LIBS", ["/opt/c.jar"]);
        assert_eq!(
            registry.container("LIBS").unwrap().paths,
            vec![PathBuf::from("/opt/c.jar")]
        );
    }

    #[test]
    fn test_variables() {
        let registry = ClassPathElementsRegistry::new();
        registry.register_variable("M2_REPO", "/home/dev/.m2/repository");
        assert!(registry.has_variable("M2_REPO"));
        assert!(!registry.has_variable("ECLIPSE_HOME"));
        assert_eq!(
            registry.variable("M2_REPO").unwrap().path,
            PathBuf::from("/home/dev/.m2/repository")
        );
    }

    #[test]
    fn test_resolver_predicate() {
        let registry = Arc::new(ClassPathElementsRegistry::new());
        registry.register_container("My Libs", ["/opt/a.jar"]);
        let resolver = ClassPathElementsRegistryResolver::new(registry);
        assert!(resolver.can_resolve_container("My Libs"));
        assert!(!resolver.can_resolve_container("Other"));
    }
}

//! JRE container: contributes the boot classpath of the root project

use std::sync::Arc;

use super::container_types::{self, JRE_CONTAINER};
use super::runtime::{JavaRuntime, JavaRuntimeRegistry};
use super::ContainerResolver;
use crate::context::ResolutionContext;
use crate::error::{ResolveError, ResolveResult, ResolveWarning};
use crate::model::{AccessRestrictions, RawClasspathEntry, ResolvedClasspathEntry};

/// Package prefix that is public under every profile
const JAVA_PACKAGE: &str = "java";

/// Resolves `org.eclipse.jdt.launching.JRE_CONTAINER[/<vm type>/<id>]`
#[derive(Debug, Clone)]
pub struct JreContainerResolver {
    runtimes: Arc<JavaRuntimeRegistry>,
}

impl JreContainerResolver {
    pub fn new(runtimes: Arc<JavaRuntimeRegistry>) -> Self {
        Self { runtimes }
    }

    fn default_runtime(
        &self,
        container_path: &str,
        ctx: &ResolutionContext<'_>,
    ) -> ResolveResult<Arc<JavaRuntime>> {
        self.runtimes
            .default_java_runtime()
            .ok_or_else(|| ResolveError::NoDefaultRuntime {
                project: ctx.current_project().name().to_string(),
                container: container_path.to_string(),
            })
    }

    fn select_runtime(
        &self,
        container_path: &str,
        ctx: &mut ResolutionContext<'_>,
    ) -> ResolveResult<Arc<JavaRuntime>> {
        if container_path == JRE_CONTAINER {
            return self.default_runtime(container_path, ctx);
        }
        let Some(key) = container_types::vm_key(container_path).filter(|key| !key.is_empty()) else {
            return self.default_runtime(container_path, ctx);
        };
        if let Some(runtime) = self.runtimes.java_runtime(key) {
            return Ok(runtime);
        }

        let fallback = self.default_runtime(container_path, ctx)?;
        // only the caller that registers the alias reports the miss
        if self.runtimes.register_alias_if_absent(key, &fallback) {
            let warning = ResolveWarning::MissingRuntime {
                project: ctx.current_project().name().to_string(),
                container: container_path.to_string(),
                runtime_id: key.to_string(),
                fallback_version: fallback.java_version.clone(),
                fallback_location: fallback.location.clone(),
            };
            tracing::warn!(target: "jdtcp::container", "{}", warning);
            ctx.add_warning(warning);
        }
        Ok(fallback)
    }

    /// Restrictions for a profile named by the container path.
    ///
    /// Paths without a VM type prefix, or whose key is not a known profile,
    /// carry no restrictions.
    fn profile_restrictions(&self, container_path: &str) -> Option<AccessRestrictions> {
        let key = container_types::vm_key(container_path)?;
        let profile = self.runtimes.java_profile(key)?;
        let public_packages = std::iter::once(JAVA_PACKAGE.to_string())
            .chain(profile.system_packages.iter().cloned());
        Some(AccessRestrictions::new(public_packages, Vec::new(), true))
    }
}

impl ContainerResolver for JreContainerResolver {
    fn name(&self) -> &'static str {
        "jre"
    }

    fn can_resolve_container(&self, container_path: &str) -> bool {
        container_path.starts_with(JRE_CONTAINER)
    }

    fn resolve_container(
        &self,
        container_path: &str,
        entry: &RawClasspathEntry,
        ctx: &mut ResolutionContext<'_>,
    ) -> ResolveResult<()> {
        if !ctx.is_current_project_root() {
            tracing::trace!(
                target: "jdtcp::container",
                project = ctx.current_project().name(),
                "boot classpath of referenced project ignored"
            );
            return Ok(());
        }

        let runtime = self.select_runtime(container_path, ctx)?;
        let restrictions = self.profile_restrictions(container_path);
        tracing::debug!(
            target: "jdtcp::container",
            container = container_path,
            runtime = %runtime.id,
            restricted = restrictions.is_some(),
            "boot classpath resolved"
        );

        let libraries: Vec<_> = runtime
            .libraries
            .iter()
            .map(|lib| ctx.render_path(lib.clone()))
            .collect();
        let boot = ResolvedClasspathEntry::from_paths(libraries).with_access_restrictions(restrictions);
        ctx.set_boot_classpath_entry(boot, &entry.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::runtime::JavaProfile;
    use crate::job::ResolverJob;
    use crate::model::Project;
    use crate::workspace::{MemoryWorkspace, Workspace};

    fn registry() -> Arc<JavaRuntimeRegistry> {
        let registry = Arc::new(JavaRuntimeRegistry::new());
        registry.register_java_runtime(
            JavaRuntime::new("jdk17", "17", "/opt/jdk17", ["/opt/jdk17/lib/rt.jar"]),
            true,
        );
        registry.register_java_profile(JavaProfile::new("J2SE-1.5", ["javax.net"]));
        registry
    }

    #[test]
    fn test_can_resolve() {
        let resolver = JreContainerResolver::new(registry());
        assert!(resolver.can_resolve_container(JRE_CONTAINER));
        assert!(resolver.can_resolve_container(&format!(
            "{}jdk17",
            container_types::VMTYPE_PREFIX
        )));
        assert!(!resolver.can_resolve_container("org.eclipse.pde.core.requiredPlugins"));
    }

    #[test]
    fn test_profile_restrictions() {
        let resolver = JreContainerResolver::new(registry());
        let path = format!("{}J2SE-1.5", container_types::VMTYPE_PREFIX);
        let restrictions = resolver.profile_restrictions(&path).unwrap();
        assert_eq!(restrictions.public_packages(), &["java", "javax.net"]);
        assert!(restrictions.is_exclude_all());
        assert!(restrictions.is_accessible("java.lang"));
        assert!(!restrictions.is_accessible("sun.misc"));
    }

    #[test]
    fn test_no_profile_without_vm_prefix() {
        let resolver = JreContainerResolver::new(registry());
        assert!(resolver.profile_restrictions(JRE_CONTAINER).is_none());
        // a path sharing the container prefix but not the vm type prefix
        let odd = format!("{}/J2SE-1.5", JRE_CONTAINER);
        assert!(resolver.profile_restrictions(&odd).is_none());
        let unknown = format!("{}jdk17", container_types::VMTYPE_PREFIX);
        assert!(resolver.profile_restrictions(&unknown).is_none());
    }

    #[test]
    fn test_empty_vm_key_uses_default_silently() {
        let runtimes = registry();
        let resolver = JreContainerResolver::new(runtimes.clone());
        let ws = MemoryWorkspace::with_projects("/ws", [Project::new("app", "/ws/app")]);
        let job = ResolverJob::new(ws.project("app").unwrap(), &ws, false, false, Vec::new());
        let mut ctx = ResolutionContext::new(&job);

        let path = container_types::VMTYPE_PREFIX.to_string();
        resolver
            .resolve_container(&path, &RawClasspathEntry::container(path.as_str()), &mut ctx)
            .unwrap();

        assert!(!runtimes.has_java_runtime(""));
        let classpath = ctx.into_resolved_classpath();
        assert!(classpath.warnings().is_empty());
        assert_eq!(
            classpath.boot_classpath_files(),
            vec![std::path::Path::new("/opt/jdk17/lib/rt.jar")]
        );
    }
}

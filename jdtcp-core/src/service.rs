//! Classpath resolution entry point
//!
//! [`JdtResolver`] owns the registries, the resolver chain and the result
//! cache. Construct one at startup and pass it to whoever resolves; a
//! process-wide instance is available through [`init_global`] / [`global`]
//! for callers that cannot thread it through.

use once_cell::sync::OnceCell;
use std::sync::Arc;

use jdtcp_config::ResolverConfig;

use crate::cache::{CacheKey, ClasspathCache};
use crate::container::{
    ClassPathElementsRegistry, ClassPathElementsRegistryResolver, ContainerRegistry, ContainerResolver,
    JavaRuntimeRegistry, JreContainerResolver, UserLibraries, UserLibraryContainerResolver,
};
use crate::error::ResolveResult;
use crate::executor::ResolverExecutor;
use crate::job::{ContainerArgument, ResolverJob};
use crate::model::{Project, ResolvedClasspath};
use crate::resolver::ResolverChain;
use crate::workspace::Workspace;

/// Builder for [`JdtResolver`]
#[derive(Default)]
pub struct JdtResolverBuilder {
    config: ResolverConfig,
    elements: Option<Arc<ClassPathElementsRegistry>>,
    runtimes: Option<Arc<JavaRuntimeRegistry>>,
    user_libraries: Option<Arc<UserLibraries>>,
    extra_containers: Vec<Arc<dyn ContainerResolver>>,
}

impl JdtResolverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn elements(mut self, elements: Arc<ClassPathElementsRegistry>) -> Self {
        self.elements = Some(elements);
        self
    }

    pub fn runtimes(mut self, runtimes: Arc<JavaRuntimeRegistry>) -> Self {
        self.runtimes = Some(runtimes);
        self
    }

    pub fn user_libraries(mut self, user_libraries: Arc<UserLibraries>) -> Self {
        self.user_libraries = Some(user_libraries);
        self
    }

    /// Add a container resolver, consulted after the built-in ones
    pub fn container_resolver(mut self, resolver: Arc<dyn ContainerResolver>) -> Self {
        self.extra_containers.push(resolver);
        self
    }

    pub fn build(self) -> JdtResolver {
        let elements = self.elements.unwrap_or_default();
        let runtimes = self.runtimes.unwrap_or_default();
        let user_libraries = self.user_libraries.unwrap_or_default();

        let mut containers = ContainerRegistry::new();
        containers.register(Arc::new(ClassPathElementsRegistryResolver::new(Arc::clone(&elements))));
        containers.register(Arc::new(UserLibraryContainerResolver::new(Arc::clone(&user_libraries))));
        containers.register(Arc::new(JreContainerResolver::new(Arc::clone(&runtimes))));
        for resolver in self.extra_containers {
            containers.register(resolver);
        }
        tracing::debug!(
            target: "jdtcp::container",
            resolvers = ?containers.names().collect::<Vec<_>>(),
            "container resolvers registered"
        );

        let chain = ResolverChain::standard(Arc::clone(&elements), Arc::clone(&runtimes), containers);
        JdtResolver {
            config: self.config,
            elements,
            runtimes,
            user_libraries,
            chain,
            cache: ClasspathCache::new(),
        }
    }
}

/// Resolves project classpaths and caches the results
#[derive(Debug)]
pub struct JdtResolver {
    config: ResolverConfig,
    elements: Arc<ClassPathElementsRegistry>,
    runtimes: Arc<JavaRuntimeRegistry>,
    user_libraries: Arc<UserLibraries>,
    chain: ResolverChain,
    cache: ClasspathCache,
}

impl Default for JdtResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl JdtResolver {
    /// A resolver with empty registries and default configuration
    pub fn new() -> Self {
        JdtResolverBuilder::new().build()
    }

    pub fn builder() -> JdtResolverBuilder {
        JdtResolverBuilder::new()
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn elements(&self) -> &Arc<ClassPathElementsRegistry> {
        &self.elements
    }

    pub fn runtimes(&self) -> &Arc<JavaRuntimeRegistry> {
        &self.runtimes
    }

    pub fn user_libraries(&self) -> &Arc<UserLibraries> {
        &self.user_libraries
    }

    pub fn cache(&self) -> &ClasspathCache {
        &self.cache
    }

    /// Resolve the classpath of `project`.
    ///
    /// Results are cached per (specified name, `resolve_relative`,
    /// `runtime_classpath`); container arguments are not part of the key.
    /// Failed resolutions are never cached.
    pub fn resolve_project_classpath(
        &self,
        workspace: &dyn Workspace,
        project: &Arc<Project>,
        resolve_relative: bool,
        runtime_classpath: bool,
        container_arguments: &[ContainerArgument],
    ) -> ResolveResult<Arc<ResolvedClasspath>> {
        let span = tracing::debug_span!(
            "resolve_project_classpath",
            project = project.name(),
            relative = resolve_relative,
            runtime = runtime_classpath
        );
        let _guard = span.enter();

        if self.config.cache_disabled() {
            tracing::trace!(target: "jdtcp::cache", "cache disabled");
            return self
                .resolve_uncached(workspace, project, resolve_relative, runtime_classpath, container_arguments)
                .map(Arc::new);
        }

        let key = CacheKey::new(project.specified_name(), resolve_relative, runtime_classpath);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }
        let resolved =
            self.resolve_uncached(workspace, project, resolve_relative, runtime_classpath, container_arguments)?;
        Ok(self.cache.insert(key, Arc::new(resolved)))
    }

    fn resolve_uncached(
        &self,
        workspace: &dyn Workspace,
        project: &Arc<Project>,
        resolve_relative: bool,
        runtime_classpath: bool,
        container_arguments: &[ContainerArgument],
    ) -> ResolveResult<ResolvedClasspath> {
        let job = ResolverJob::new(
            Arc::clone(project),
            workspace,
            resolve_relative,
            runtime_classpath,
            container_arguments.to_vec(),
        );
        let result = ResolverExecutor::new(&self.chain).execute(&job);
        match &result {
            Ok(classpath) => tracing::debug!(
                target: "jdtcp::walk",
                entries = classpath.entries().len(),
                boot = classpath.has_boot_classpath(),
                warnings = classpath.warnings().len(),
                "resolved"
            ),
            Err(err) => tracing::debug!(target: "jdtcp::walk", error = %err, "resolution failed"),
        }
        result
    }

    /// Forget cached results of `project` after its metadata changed
    pub fn invalidate_project(&self, project: &str) -> usize {
        self.cache.invalidate_project(project)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

static GLOBAL_RESOLVER: OnceCell<JdtResolver> = OnceCell::new();

/// Install the process-wide resolver.
///
/// Fails, handing the resolver back, if one is already installed.
pub fn init_global(resolver: JdtResolver) -> Result<(), JdtResolver> {
    GLOBAL_RESOLVER.set(resolver)
}

/// The process-wide resolver, created with defaults on first use if
/// [`init_global`] was never called
pub fn global() -> &'static JdtResolver {
    GLOBAL_RESOLVER.get_or_init(JdtResolver::new)
}

pub fn is_global_initialized() -> bool {
    GLOBAL_RESOLVER.get().is_some()
}

//! Test fixtures shared by the end-to-end tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use jdt_classpath::{
    JavaProfile, JavaRuntime, JdtResolver, MemoryWorkspace, Project, ResolvedClasspath, ResolverConfig,
    Workspace,
};

pub const JDK17_RT: &str = "/opt/jdk17/lib/rt.jar";
pub const JDK11_RT: &str = "/opt/jdk11/lib/rt.jar";

/// Workspace wrapper counting project lookups, used to observe whether a
/// resolution actually ran
pub struct CountingWorkspace {
    inner: MemoryWorkspace,
    lookups: AtomicUsize,
}

impl CountingWorkspace {
    pub fn new(inner: MemoryWorkspace) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &MemoryWorkspace {
        &self.inner
    }
}

impl Workspace for CountingWorkspace {
    fn root(&self) -> &Path {
        self.inner.root()
    }

    fn project(&self, name: &str) -> Option<Arc<Project>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.project(name)
    }
}

/// Resolver with jdk17 (default) and jdk11 registered plus the J2SE-1.5
/// profile
pub fn resolver_with_config(config: ResolverConfig) -> JdtResolver {
    let resolver = JdtResolver::builder().config(config).build();
    let runtimes = resolver.runtimes();
    runtimes.register_java_runtime(JavaRuntime::new("jdk17", "17", "/opt/jdk17", [JDK17_RT]), true);
    runtimes.register_java_runtime(JavaRuntime::new("jdk11", "11", "/opt/jdk11", [JDK11_RT]), false);
    runtimes.register_java_profile(JavaProfile::new("J2SE-1.5", ["javax.net", "org.xml.sax"]));
    resolver
}

pub fn resolver() -> JdtResolver {
    resolver_with_config(ResolverConfig::default())
}

pub fn uncached_resolver() -> JdtResolver {
    resolver_with_config(ResolverConfig {
        disable_cache: true,
        ..ResolverConfig::default()
    })
}

pub fn workspace(projects: impl IntoIterator<Item = Project>) -> MemoryWorkspace {
    MemoryWorkspace::with_projects("/ws", projects)
}

pub fn paths(classpath: &ResolvedClasspath) -> Vec<PathBuf> {
    classpath
        .classpath_files()
        .into_iter()
        .map(Path::to_path_buf)
        .collect()
}

pub fn boot_paths(classpath: &ResolvedClasspath) -> Vec<PathBuf> {
    classpath
        .boot_classpath_files()
        .into_iter()
        .map(Path::to_path_buf)
        .collect()
}

pub fn pb(path: &str) -> PathBuf {
    PathBuf::from(path)
}

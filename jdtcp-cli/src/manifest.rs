//! Workspace manifest
//!
//! JSON rendition of already-parsed workspace metadata: projects with their
//! raw classpaths plus the registries the resolver needs.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use jdtcp_config::ResolverConfig;
use jdtcp_core::{
    ClassPathElementsRegistry, JavaProfile, JavaRuntime, JavaRuntimeRegistry, JdtResolver, MemoryWorkspace,
    Project, UserLibraries, UserLibrary,
};

use crate::error::{CliError, CliResult};

#[derive(Debug, Deserialize)]
pub struct Manifest {
    /// Workspace root; defaults to the manifest's directory
    #[serde(default)]
    pub workspace: Option<PathBuf>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub runtimes: Vec<JavaRuntime>,
    /// Id of the default runtime; the first runtime otherwise
    #[serde(default)]
    pub default_runtime: Option<String>,
    #[serde(default)]
    pub profiles: Vec<JavaProfile>,
    #[serde(default)]
    pub variables: BTreeMap<String, PathBuf>,
    #[serde(default)]
    pub containers: BTreeMap<String, Vec<PathBuf>>,
    #[serde(default)]
    pub user_libraries: Vec<UserLibrary>,
    #[serde(default)]
    pub config: ResolverConfig,
}

impl Manifest {
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| CliError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Absolute workspace root, resolved against the manifest's directory
    pub fn workspace_root(&self, manifest_path: &Path) -> CliResult<PathBuf> {
        let base = manifest_path.parent().unwrap_or(Path::new(""));
        let root = match &self.workspace {
            Some(root) => base.join(root),
            None => base.to_path_buf(),
        };
        if root.is_absolute() {
            return Ok(root);
        }
        let cwd = std::env::current_dir().map_err(CliError::WorkingDirectory)?;
        if root.as_os_str().is_empty() {
            Ok(cwd)
        } else {
            Ok(cwd.join(root))
        }
    }

    /// Populate the registries and build the resolver and workspace.
    ///
    /// Relative project locations are taken relative to `root`.
    pub fn into_parts(self, root: PathBuf) -> CliResult<(JdtResolver, MemoryWorkspace)> {
        let elements = Arc::new(ClassPathElementsRegistry::new());
        for (name, path) in self.variables {
            elements.register_variable(name, path);
        }
        for (name, paths) in self.containers {
            elements.register_container(name, paths);
        }

        let runtimes = Arc::new(JavaRuntimeRegistry::new());
        for runtime in self.runtimes {
            runtimes.register_java_runtime(runtime, false);
        }
        if let Some(id) = &self.default_runtime {
            if !runtimes.set_default_java_runtime(id) {
                return Err(CliError::UnknownRuntime(id.clone()));
            }
        }
        for profile in self.profiles {
            runtimes.register_java_profile(profile);
        }

        let user_libraries = Arc::new(UserLibraries::new());
        for library in self.user_libraries {
            user_libraries.add_library(library);
        }

        let resolver = JdtResolver::builder()
            .config(self.config)
            .elements(elements)
            .runtimes(runtimes)
            .user_libraries(user_libraries)
            .build();
        let projects: Vec<Project> = self
            .projects
            .into_iter()
            .map(|project| project.rooted_at(&root))
            .collect();
        let workspace = MemoryWorkspace::with_projects(root, projects);
        Ok((resolver, workspace))
    }
}

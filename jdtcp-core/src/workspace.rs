//! Workspace accessor
//!
//! The resolver only reads projects through [`Workspace`]; parsing project
//! metadata and keeping it fresh is the implementor's job.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::model::Project;

/// Read access to the projects of one workspace
///
/// # Implementations
/// - `MemoryWorkspace`: projects registered in memory
pub trait Workspace: Send + Sync {
    /// Workspace root directory
    fn root(&self) -> &Path;

    /// Look up a project by name
    fn project(&self, name: &str) -> Option<Arc<Project>>;

    /// Check if a project exists
    fn has_project(&self, name: &str) -> bool {
        self.project(name).is_some()
    }
}

/// An in-memory workspace.
///
/// # Example
/// ```
/// use jdtcp_core::{MemoryWorkspace, Project, Workspace};
///
/// let workspace = MemoryWorkspace::new("/ws");
/// workspace.register(Project::new("app", "/ws/app"));
/// assert!(workspace.has_project("app"));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryWorkspace {
    root: PathBuf,
    projects: Arc<RwLock<BTreeMap<String, Arc<Project>>>>,
}

impl MemoryWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            projects: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Create a workspace pre-populated with projects
    pub fn with_projects(root: impl Into<PathBuf>, projects: impl IntoIterator<Item = Project>) -> Self {
        let workspace = Self::new(root);
        for project in projects {
            workspace.register(project);
        }
        workspace
    }

    /// Register (or replace) a project, returning the shared handle
    pub fn register(&self, project: Project) -> Arc<Project> {
        let project = Arc::new(project);
        let mut projects = self
            .projects
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        projects.insert(project.name().to_string(), Arc::clone(&project));
        project
    }

    pub fn remove(&self, name: &str) -> Option<Arc<Project>> {
        let mut projects = self
            .projects
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        projects.remove(name)
    }

    pub fn project_names(&self) -> Vec<String> {
        match self.projects.read() {
            Ok(projects) => projects.keys().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.projects.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Workspace for MemoryWorkspace {
    fn root(&self) -> &Path {
        &self.root
    }

    fn project(&self, name: &str) -> Option<Arc<Project>> {
        let projects = self.projects.read().ok()?;
        projects.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_register_and_lookup() {
        let workspace = MemoryWorkspace::new("/ws");
        assert!(workspace.is_empty());

        workspace.register(Project::new("app", "/ws/app"));
        workspace.register(Project::new("model", "/ws/model"));

        assert_eq!(workspace.len(), 2);
        assert_eq!(workspace.project_names(), vec!["app", "model"]);
        assert_eq!(workspace.project("app").unwrap().location(), Path::new("/ws/app"));
        assert!(workspace.project("missing").is_none());
        assert_eq!(workspace.root(), Path::new("/ws"));
    }

    #[test]
    fn test_replace_project() {
        let workspace = MemoryWorkspace::new("/ws");
        workspace.register(Project::new("app", "/ws/app"));
        workspace.register(Project::new("app", "/ws/app").with_default_output("classes"));
        assert_eq!(workspace.len(), 1);
        assert_eq!(workspace.project("app").unwrap().default_output(), "classes");

        assert!(workspace.remove("app").is_some());
        assert!(!workspace.has_project("app"));
    }

    #[test]
    fn test_concurrent_registration() {
        let workspace = MemoryWorkspace::new("/ws");
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let ws = workspace.clone();
                thread::spawn(move || {
                    ws.register(Project::new(format!("p{}", i), format!("/ws/p{}", i)));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(workspace.len(), 8);
    }
}

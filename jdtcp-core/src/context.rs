//! Resolution context
//!
//! Mutable accumulator owned by exactly one resolution call. Resolvers append
//! to it; the executor drives which project is current.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{ResolveError, ResolveResult, ResolveWarning};
use crate::job::ResolverJob;
use crate::model::{Project, RawClasspathEntry, ResolvedClasspath, ResolvedClasspathEntry};
use crate::workspace::Workspace;

/// Walk state of a project. Projects absent from the map are pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectState {
    Visiting,
    Done,
}

/// A project the walk has to enter next, with the entries it contributes
#[derive(Debug)]
pub(crate) struct Descent {
    pub project: Arc<Project>,
    pub entries: Vec<RawClasspathEntry>,
}

/// Per-call resolution state
pub struct ResolutionContext<'a> {
    job: &'a ResolverJob<'a>,
    current: Arc<Project>,
    current_is_root: bool,
    entries: Vec<ResolvedClasspathEntry>,
    seen_paths: HashSet<PathBuf>,
    boot_classpath: Option<ResolvedClasspathEntry>,
    states: HashMap<String, ProjectState>,
    visit_order: Vec<String>,
    pending: Option<Descent>,
    warnings: Vec<ResolveWarning>,
}

impl std::fmt::Debug for ResolutionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionContext")
            .field("current", &self.current.name())
            .field("current_is_root", &self.current_is_root)
            .field("entries", &self.entries.len())
            .field("boot_classpath", &self.boot_classpath.is_some())
            .field("states", &self.states)
            .finish_non_exhaustive()
    }
}

impl<'a> ResolutionContext<'a> {
    /// Create a context positioned on the job's root project
    pub fn new(job: &'a ResolverJob<'a>) -> Self {
        let root = Arc::clone(job.root_project());
        let mut states = HashMap::new();
        states.insert(root.name().to_string(), ProjectState::Visiting);
        Self {
            job,
            visit_order: vec![root.name().to_string()],
            current: root,
            current_is_root: true,
            entries: Vec::new(),
            seen_paths: HashSet::new(),
            boot_classpath: None,
            states,
            pending: None,
            warnings: Vec::new(),
        }
    }

    pub fn job(&self) -> &'a ResolverJob<'a> {
        self.job
    }

    pub fn workspace(&self) -> &'a dyn Workspace {
        self.job.workspace()
    }

    pub fn current_project(&self) -> &Arc<Project> {
        &self.current
    }

    /// True only while the root project of the job is being resolved
    pub fn is_current_project_root(&self) -> bool {
        self.current_is_root
    }

    pub fn is_runtime_classpath(&self) -> bool {
        self.job.is_runtime_classpath()
    }

    pub fn is_resolve_relative(&self) -> bool {
        self.job.is_resolve_relative()
    }

    pub fn container_argument(&self, key: &str) -> Option<&'a str> {
        self.job.container_argument(key)
    }

    /// Append an entry. Locations already on the classpath are dropped; an
    /// entry left without locations is not appended at all.
    pub fn add_classpath_entry(&mut self, entry: ResolvedClasspathEntry) {
        let seen = &mut self.seen_paths;
        let fresh = entry.retain_paths(|path| seen.insert(path.to_path_buf()));
        if fresh.paths().is_empty() {
            tracing::trace!(target: "jdtcp::walk", ?entry, "duplicate classpath entry skipped");
            return;
        }
        self.entries.push(fresh);
    }

    /// Set the boot classpath. Allowed once per resolution and only while
    /// the root project is current.
    pub fn set_boot_classpath_entry(
        &mut self,
        entry: ResolvedClasspathEntry,
        raw_path: &str,
    ) -> ResolveResult<()> {
        if !self.current_is_root {
            return Err(ResolveError::BootClasspathOutsideRoot {
                project: self.current.name().to_string(),
                path: raw_path.to_string(),
            });
        }
        if self.boot_classpath.is_some() {
            return Err(ResolveError::BootClasspathReassigned {
                project: self.current.name().to_string(),
                path: raw_path.to_string(),
            });
        }
        self.boot_classpath = Some(entry);
        Ok(())
    }

    pub fn has_boot_classpath(&self) -> bool {
        self.boot_classpath.is_some()
    }

    pub fn add_warning(&mut self, warning: ResolveWarning) {
        self.warnings.push(warning);
    }

    pub fn project_state(&self, name: &str) -> Option<ProjectState> {
        self.states.get(name).copied()
    }

    /// Projects in the order the walk entered them
    pub fn visit_order(&self) -> &[String] {
        &self.visit_order
    }

    /// Schedule `project` to be walked right after the current entry.
    ///
    /// Returns false (and schedules nothing) if the project was already
    /// entered by this resolution.
    pub fn descend_into(&mut self, project: Arc<Project>, entries: Vec<RawClasspathEntry>) -> bool {
        if self.states.contains_key(project.name()) {
            tracing::trace!(target: "jdtcp::walk", project = project.name(), "already visited");
            return false;
        }
        self.states
            .insert(project.name().to_string(), ProjectState::Visiting);
        self.visit_order.push(project.name().to_string());
        self.pending = Some(Descent { project, entries });
        true
    }

    pub(crate) fn take_pending_descent(&mut self) -> Option<Descent> {
        self.pending.take()
    }

    pub(crate) fn enter(&mut self, project: &Arc<Project>, is_root: bool) {
        if !Arc::ptr_eq(&self.current, project) {
            self.current = Arc::clone(project);
        }
        self.current_is_root = is_root;
    }

    pub(crate) fn finish(&mut self, name: &str) {
        self.states.insert(name.to_string(), ProjectState::Done);
    }

    /// Location of `relative` inside `project`, rendered for this resolution
    pub fn project_path(&self, project: &Project, relative: &str) -> PathBuf {
        self.render_path(project.location().join(relative.trim_start_matches('/')))
    }

    /// Render a location: relative to the workspace root when resolving
    /// relative and the location lies inside the workspace, unchanged otherwise.
    pub fn render_path(&self, location: PathBuf) -> PathBuf {
        if !self.is_resolve_relative() {
            return location;
        }
        match location.strip_prefix(self.workspace().root()) {
            Ok(relative) if relative != Path::new("") => relative.to_path_buf(),
            _ => location,
        }
    }

    /// Freeze the accumulated state into the immutable result
    pub fn into_resolved_classpath(self) -> ResolvedClasspath {
        ResolvedClasspath::new(self.entries, self.boot_classpath, self.warnings)
    }
}

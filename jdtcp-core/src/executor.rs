//! Depth-first walk over the project reference graph
//!
//! The walk keeps an explicit stack of frames instead of recursing, so its
//! depth does not depend on the shape of the reference graph. When the
//! PROJECT resolver schedules a descent, the referenced project's frame is
//! pushed right after the entry that referenced it; its entries are therefore
//! resolved before the referencing project's remaining entries (pre-order).

use std::sync::Arc;

use crate::context::ResolutionContext;
use crate::error::ResolveResult;
use crate::job::ResolverJob;
use crate::model::{Project, RawClasspathEntry, ResolvedClasspath};
use crate::resolver::ResolverChain;

/// One project on the walk stack
struct Frame {
    project: Arc<Project>,
    entries: Vec<RawClasspathEntry>,
    cursor: usize,
    is_root: bool,
}

impl Frame {
    fn new(project: Arc<Project>, entries: Vec<RawClasspathEntry>, is_root: bool) -> Self {
        Self {
            project,
            entries,
            cursor: 0,
            is_root,
        }
    }
}

/// Runs resolver jobs against a resolver chain
#[derive(Debug, Clone, Copy)]
pub struct ResolverExecutor<'c> {
    chain: &'c ResolverChain,
}

impl<'c> ResolverExecutor<'c> {
    pub fn new(chain: &'c ResolverChain) -> Self {
        Self { chain }
    }

    /// Walk the job's root project and everything it reaches.
    ///
    /// The first resolver error aborts the walk.
    pub fn execute(&self, job: &ResolverJob<'_>) -> ResolveResult<ResolvedClasspath> {
        let mut ctx = ResolutionContext::new(job);
        let root = Arc::clone(job.root_project());
        let entries = root.entries().to_vec();
        let mut stack = vec![Frame::new(root, entries, true)];

        while let Some(frame) = stack.last_mut() {
            if frame.cursor >= frame.entries.len() {
                if let Some(done) = stack.pop() {
                    tracing::trace!(target: "jdtcp::walk", project = done.project.name(), "project done");
                    ctx.finish(done.project.name());
                }
                continue;
            }
            let index = frame.cursor;
            frame.cursor += 1;

            ctx.enter(&frame.project, frame.is_root);
            self.chain.dispatch(&frame.entries[index], &mut ctx)?;

            if let Some(descent) = ctx.take_pending_descent() {
                stack.push(Frame::new(descent.project, descent.entries, false));
            }
        }

        tracing::debug!(
            target: "jdtcp::walk",
            root = job.root_project().name(),
            visited = ?ctx.visit_order(),
            "walk finished"
        );
        Ok(ctx.into_resolved_classpath())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{ClassPathElementsRegistry, ContainerRegistry, JavaRuntimeRegistry};
    use crate::error::ResolveError;
    use crate::workspace::{MemoryWorkspace, Workspace};
    use std::path::Path;

    fn chain() -> ResolverChain {
        ResolverChain::standard(
            Arc::new(ClassPathElementsRegistry::new()),
            Arc::new(JavaRuntimeRegistry::new()),
            ContainerRegistry::new(),
        )
    }

    fn run(ws: &MemoryWorkspace, root: &str, runtime: bool) -> ResolveResult<ResolvedClasspath> {
        let chain = chain();
        let job = ResolverJob::new(ws.project(root).unwrap(), ws, false, runtime, Vec::new());
        ResolverExecutor::new(&chain).execute(&job)
    }

    #[test]
    fn test_pre_order_walk() {
        let ws = MemoryWorkspace::with_projects(
            "/ws",
            [
                Project::new("a", "/ws/a")
                    .with_entry(RawClasspathEntry::library("first.jar"))
                    .with_entry(RawClasspathEntry::project("b"))
                    .with_entry(RawClasspathEntry::library("last.jar")),
                Project::new("b", "/ws/b")
                    .with_entry(RawClasspathEntry::library("b.jar").exported())
                    .with_entry(RawClasspathEntry::project("c").exported()),
                Project::new("c", "/ws/c").with_entry(RawClasspathEntry::library("c.jar").exported()),
            ],
        );

        let result = run(&ws, "a", true).unwrap();
        assert_eq!(
            result.classpath_files(),
            vec![
                Path::new("/ws/a/first.jar"),
                Path::new("/ws/b/b.jar"),
                Path::new("/ws/c/c.jar"),
                Path::new("/ws/a/last.jar"),
            ]
        );
    }

    #[test]
    fn test_cycle_terminates() {
        let ws = MemoryWorkspace::with_projects(
            "/ws",
            [
                Project::new("a", "/ws/a")
                    .with_entry(RawClasspathEntry::project("b"))
                    .with_entry(RawClasspathEntry::library("a.jar")),
                Project::new("b", "/ws/b")
                    .with_entry(RawClasspathEntry::project("a").exported())
                    .with_entry(RawClasspathEntry::library("b.jar").exported()),
            ],
        );

        let result = run(&ws, "a", true).unwrap();
        assert_eq!(
            result.classpath_files(),
            vec![Path::new("/ws/b/b.jar"), Path::new("/ws/a/a.jar")]
        );
    }

    #[test]
    fn test_error_aborts_walk() {
        let ws = MemoryWorkspace::with_projects(
            "/ws",
            [Project::new("a", "/ws/a")
                .with_entry(RawClasspathEntry::library("a.jar"))
                .with_entry(RawClasspathEntry::container("org.example.UNKNOWN"))],
        );

        let err = run(&ws, "a", false).unwrap_err();
        assert!(matches!(err, ResolveError::UnresolvableEntry { ref project, .. } if project == "a"));
    }
}

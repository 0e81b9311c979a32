use super::EntryResolver;
use crate::context::ResolutionContext;
use crate::error::{ResolveError, ResolveResult};
use crate::model::{EntryKind, Project, RawClasspathEntry};

/// Resolves a project reference by scheduling a walk into the referenced
/// project.
///
/// Which of the referenced project's entries take part depends on the mode:
/// its source and output folders always do; everything else only on the
/// runtime classpath and only if exported.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectEntryResolver;

impl ProjectEntryResolver {
    fn contributed_entries(project: &Project, runtime: bool) -> Vec<RawClasspathEntry> {
        project
            .entries()
            .iter()
            .filter(|entry| match entry.kind {
                EntryKind::Source | EntryKind::Output => true,
                _ => runtime && entry.exported,
            })
            .cloned()
            .collect()
    }
}

impl EntryResolver for ProjectEntryResolver {
    fn name(&self) -> &'static str {
        "project"
    }

    fn can_resolve(&self, entry: &RawClasspathEntry) -> bool {
        entry.is_kind(EntryKind::Project)
    }

    fn resolve(&self, entry: &RawClasspathEntry, ctx: &mut ResolutionContext<'_>) -> ResolveResult<()> {
        let name = entry.project_name().unwrap_or(entry.path.as_str());
        if ctx.project_state(name).is_some() {
            tracing::trace!(target: "jdtcp::walk", project = name, "reference already visited");
            return Ok(());
        }

        let referenced = ctx
            .workspace()
            .project(name)
            .ok_or_else(|| ResolveError::MissingProject {
                project: ctx.current_project().name().to_string(),
                referenced: name.to_string(),
            })?;
        let entries = Self::contributed_entries(&referenced, ctx.is_runtime_classpath());
        tracing::debug!(
            target: "jdtcp::walk",
            from = ctx.current_project().name(),
            to = referenced.name(),
            entries = entries.len(),
            "descending into referenced project"
        );
        ctx.descend_into(referenced, entries);
        Ok(())
    }
}

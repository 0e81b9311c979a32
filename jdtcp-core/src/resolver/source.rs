use std::sync::Arc;

use super::EntryResolver;
use crate::context::ResolutionContext;
use crate::error::ResolveResult;
use crate::model::{EntryKind, RawClasspathEntry, ResolvedClasspathEntry};

/// Resolves a source folder to the folder its classes are compiled into.
///
/// The root project's own output is only part of its runtime classpath.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceEntryResolver;

impl EntryResolver for SourceEntryResolver {
    fn name(&self) -> &'static str {
        "source"
    }

    fn can_resolve(&self, entry: &RawClasspathEntry) -> bool {
        entry.is_kind(EntryKind::Source)
    }

    fn resolve(&self, entry: &RawClasspathEntry, ctx: &mut ResolutionContext<'_>) -> ResolveResult<()> {
        if ctx.is_current_project_root() && !ctx.is_runtime_classpath() {
            return Ok(());
        }
        let project = Arc::clone(ctx.current_project());
        let output = entry
            .output_location
            .as_deref()
            .unwrap_or_else(|| project.default_output());
        let path = ctx.project_path(&project, output);
        ctx.add_classpath_entry(ResolvedClasspathEntry::new(path));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::ResolverJob;
    use crate::model::Project;
    use crate::workspace::MemoryWorkspace;
    use std::path::Path;

    fn resolve(runtime: bool, entries: &[RawClasspathEntry]) -> Vec<std::path::PathBuf> {
        let workspace = MemoryWorkspace::new("/ws");
        let project = workspace.register(Project::new("app", "/ws/app").with_default_output("classes"));
        let job = ResolverJob::new(project, &workspace, false, runtime, Vec::new());
        let mut ctx = ResolutionContext::new(&job);
        for entry in entries {
            SourceEntryResolver.resolve(entry, &mut ctx).unwrap();
        }
        let result = ctx.into_resolved_classpath();
        result
            .classpath_files()
            .into_iter()
            .map(Path::to_path_buf)
            .collect()
    }

    #[test]
    fn test_root_output_only_at_runtime() {
        let entries = [
            RawClasspathEntry::source("src"),
            RawClasspathEntry::source("test").with_output_location("test-classes"),
        ];
        assert!(resolve(false, &entries).is_empty());
        assert_eq!(
            resolve(true, &entries),
            vec![
                std::path::PathBuf::from("/ws/app/classes"),
                std::path::PathBuf::from("/ws/app/test-classes"),
            ]
        );
    }
}

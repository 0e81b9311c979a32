use std::sync::Arc;

use super::EntryResolver;
use crate::context::ResolutionContext;
use crate::error::ResolveResult;
use crate::model::{EntryKind, RawClasspathEntry, ResolvedClasspathEntry};

/// Resolves a declared output folder. Like source folders, the root's own
/// output only appears on its runtime classpath.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputEntryResolver;

impl EntryResolver for OutputEntryResolver {
    fn name(&self) -> &'static str {
        "output"
    }

    fn can_resolve(&self, entry: &RawClasspathEntry) -> bool {
        entry.is_kind(EntryKind::Output)
    }

    fn resolve(&self, entry: &RawClasspathEntry, ctx: &mut ResolutionContext<'_>) -> ResolveResult<()> {
        if ctx.is_current_project_root() && !ctx.is_runtime_classpath() {
            return Ok(());
        }
        let project = Arc::clone(ctx.current_project());
        let path = ctx.project_path(&project, &entry.path);
        ctx.add_classpath_entry(ResolvedClasspathEntry::new(path));
        Ok(())
    }
}

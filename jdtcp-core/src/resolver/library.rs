use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::EntryResolver;
use crate::context::ResolutionContext;
use crate::error::ResolveResult;
use crate::model::{AccessRestrictions, EntryKind, RawClasspathEntry, ResolvedClasspathEntry};

/// Resolves archives and class folders.
///
/// `lib/a.jar` is relative to the declaring project, `/Other/lib/a.jar` to
/// the workspace project `Other`; any other absolute path is taken as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct LibraryEntryResolver;

impl LibraryEntryResolver {
    fn locate(entry: &RawClasspathEntry, ctx: &ResolutionContext<'_>) -> PathBuf {
        if let Some(rest) = entry.path.strip_prefix('/') {
            let (first, tail) = rest.split_once('/').unwrap_or((rest, ""));
            if let Some(owner) = ctx.workspace().project(first) {
                return ctx.project_path(&owner, tail);
            }
        }
        let path = Path::new(&entry.path);
        if path.is_absolute() {
            return ctx.render_path(path.to_path_buf());
        }
        let current = Arc::clone(ctx.current_project());
        ctx.project_path(&current, &entry.path)
    }
}

impl EntryResolver for LibraryEntryResolver {
    fn name(&self) -> &'static str {
        "library"
    }

    fn can_resolve(&self, entry: &RawClasspathEntry) -> bool {
        entry.is_kind(EntryKind::Library)
    }

    fn resolve(&self, entry: &RawClasspathEntry, ctx: &mut ResolutionContext<'_>) -> ResolveResult<()> {
        let path = Self::locate(entry, ctx);
        ctx.add_classpath_entry(
            ResolvedClasspathEntry::new(path)
                .with_access_restrictions(AccessRestrictions::from_rules(&entry.access_rules)),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::ResolverJob;
    use crate::model::{AccessRule, AccessRuleKind, Project};
    use crate::workspace::{MemoryWorkspace, Workspace};

    fn workspace() -> MemoryWorkspace {
        MemoryWorkspace::with_projects(
            "/ws",
            [Project::new("app", "/ws/app"), Project::new("shared", "/ws/shared")],
        )
    }

    fn locate(ws: &MemoryWorkspace, relative: bool, path: &str) -> PathBuf {
        let job = ResolverJob::new(ws.project("app").unwrap(), ws, relative, false, Vec::new());
        let ctx = ResolutionContext::new(&job);
        LibraryEntryResolver::locate(&RawClasspathEntry::library(path), &ctx)
    }

    #[test]
    fn test_path_forms() {
        let ws = workspace();
        assert_eq!(locate(&ws, false, "lib/a.jar"), PathBuf::from("/ws/app/lib/a.jar"));
        assert_eq!(
            locate(&ws, false, "/shared/lib/b.jar"),
            PathBuf::from("/ws/shared/lib/b.jar")
        );
        assert_eq!(locate(&ws, false, "/opt/ext/c.jar"), PathBuf::from("/opt/ext/c.jar"));
    }

    #[test]
    fn test_relative_rendering() {
        let ws = workspace();
        assert_eq!(locate(&ws, true, "lib/a.jar"), PathBuf::from("app/lib/a.jar"));
        assert_eq!(locate(&ws, true, "/shared/lib/b.jar"), PathBuf::from("shared/lib/b.jar"));
        assert_eq!(locate(&ws, true, "/opt/ext/c.jar"), PathBuf::from("/opt/ext/c.jar"));
    }

    #[test]
    fn test_access_rules_become_restrictions() {
        let ws = workspace();
        let job = ResolverJob::new(ws.project("app").unwrap(), &ws, false, false, Vec::new());
        let mut ctx = ResolutionContext::new(&job);
        let entry = RawClasspathEntry::library("lib/a.jar")
            .with_access_rule(AccessRule::new(AccessRuleKind::Accessible, "org/foo/**"))
            .with_access_rule(AccessRule::new(AccessRuleKind::NonAccessible, "**"));

        LibraryEntryResolver.resolve(&entry, &mut ctx).unwrap();
        let result = ctx.into_resolved_classpath();
        let restrictions = result.entries()[0].access_restrictions().unwrap();
        assert!(restrictions.is_accessible("org.foo.bar"));
        assert!(!restrictions.is_accessible("org.other"));
    }
}

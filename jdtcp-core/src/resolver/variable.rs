use std::path::PathBuf;
use std::sync::Arc;

use super::EntryResolver;
use crate::container::{ClassPathElementsRegistry, JavaRuntimeRegistry};
use crate::context::ResolutionContext;
use crate::error::{ResolveError, ResolveResult};
use crate::model::{AccessRestrictions, EntryKind, RawClasspathEntry, ResolvedClasspathEntry};

/// Variable that denotes the default runtime's libraries when not declared
pub const JRE_LIB: &str = "JRE_LIB";

/// Resolves `NAME[/rest]` against the declared classpath variables
#[derive(Debug, Clone)]
pub struct VariableEntryResolver {
    elements: Arc<ClassPathElementsRegistry>,
    runtimes: Arc<JavaRuntimeRegistry>,
}

impl VariableEntryResolver {
    pub fn new(elements: Arc<ClassPathElementsRegistry>, runtimes: Arc<JavaRuntimeRegistry>) -> Self {
        Self { elements, runtimes }
    }

    fn expand(&self, name: &str, rest: Option<&str>) -> Option<Vec<PathBuf>> {
        if let Some(variable) = self.elements.variable(name) {
            let path = match rest {
                Some(rest) => variable.path.join(rest),
                None => variable.path,
            };
            return Some(vec![path]);
        }
        if name != JRE_LIB {
            return None;
        }
        let runtime = self.runtimes.default_java_runtime()?;
        let libraries = match rest {
            Some(rest) => vec![runtime.location.join(rest)],
            None => runtime.libraries.clone(),
        };
        Some(libraries)
    }
}

/// Split `NAME/rest` at the first separator
fn split_variable(path: &str) -> (&str, Option<&str>) {
    let path = path.trim_start_matches('/');
    match path.split_once('/') {
        Some((name, rest)) if !rest.is_empty() => (name, Some(rest)),
        Some((name, _)) => (name, None),
        None => (path, None),
    }
}

impl EntryResolver for VariableEntryResolver {
    fn name(&self) -> &'static str {
        "variable"
    }

    fn can_resolve(&self, entry: &RawClasspathEntry) -> bool {
        entry.is_kind(EntryKind::Variable)
    }

    fn resolve(&self, entry: &RawClasspathEntry, ctx: &mut ResolutionContext<'_>) -> ResolveResult<()> {
        let (name, rest) = split_variable(&entry.path);
        let paths = self
            .expand(name, rest)
            .ok_or_else(|| ResolveError::UnknownVariable {
                project: ctx.current_project().name().to_string(),
                variable: name.to_string(),
                path: entry.path.clone(),
            })?;
        tracing::trace!(target: "jdtcp::container", variable = name, ?paths, "variable expanded");

        let paths: Vec<PathBuf> = paths.into_iter().map(|p| ctx.render_path(p)).collect();
        ctx.add_classpath_entry(
            ResolvedClasspathEntry::from_paths(paths)
                .with_access_restrictions(AccessRestrictions::from_rules(&entry.access_rules)),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::JavaRuntime;
    use crate::job::ResolverJob;
    use crate::model::Project;
    use crate::workspace::MemoryWorkspace;
    use std::path::Path;

    fn resolver() -> VariableEntryResolver {
        let elements = Arc::new(ClassPathElementsRegistry::new());
        elements.register_variable("M2_REPO", "/home/dev/.m2");
        let runtimes = Arc::new(JavaRuntimeRegistry::new());
        runtimes.register_java_runtime(
            JavaRuntime::new("jdk17", "17", "/opt/jdk17", ["/opt/jdk17/lib/rt.jar", "/opt/jdk17/lib/jce.jar"]),
            true,
        );
        VariableEntryResolver::new(elements, runtimes)
    }

    fn resolve(entry: RawClasspathEntry) -> ResolveResult<Vec<PathBuf>> {
        let workspace = MemoryWorkspace::new("/ws");
        let project = workspace.register(Project::new("app", "/ws/app"));
        let job = ResolverJob::new(project, &workspace, false, false, Vec::new());
        let mut ctx = ResolutionContext::new(&job);
        resolver().resolve(&entry, &mut ctx)?;
        let result = ctx.into_resolved_classpath();
        Ok(result.classpath_files().into_iter().map(Path::to_path_buf).collect())
    }

    #[test]
    fn test_split_variable() {
        assert_eq!(split_variable("M2_REPO/junit/junit.jar"), ("M2_REPO", Some("junit/junit.jar")));
        assert_eq!(split_variable("JRE_LIB"), ("JRE_LIB", None));
        assert_eq!(split_variable("JRE_LIB/"), ("JRE_LIB", None));
    }

    #[test]
    fn test_declared_variable() {
        let paths = resolve(RawClasspathEntry::variable("M2_REPO/junit/junit.jar")).unwrap();
        assert_eq!(paths, vec![PathBuf::from("/home/dev/.m2/junit/junit.jar")]);
    }

    #[test]
    fn test_jre_lib_falls_back_to_default_runtime() {
        let paths = resolve(RawClasspathEntry::variable(JRE_LIB)).unwrap();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/opt/jdk17/lib/rt.jar"),
                PathBuf::from("/opt/jdk17/lib/jce.jar"),
            ]
        );
    }

    #[test]
    fn test_unknown_variable() {
        let err = resolve(RawClasspathEntry::variable("ECLIPSE_HOME/plugins")).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnknownVariable {
                project: "app".to_string(),
                variable: "ECLIPSE_HOME".to_string(),
                path: "ECLIPSE_HOME/plugins".to_string(),
            }
        );
    }
}

//! Resolved classpath entries and the immutable resolution result

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::ResolveWarning;
use crate::model::entry::{AccessRule, AccessRuleKind};

/// Package visibility attached to a resolved entry.
///
/// With `exclude_all` set, any package that is neither public nor explicitly
/// excluded is inaccessible as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccessRestrictions {
    public_packages: Vec<String>,
    excluded_packages: Vec<String>,
    exclude_all: bool,
}

impl AccessRestrictions {
    pub fn new<P, E>(public_packages: P, excluded_packages: E, exclude_all: bool) -> Self
    where
        P: IntoIterator<Item = String>,
        E: IntoIterator<Item = String>,
    {
        let mut restrictions = Self {
            public_packages: Vec::new(),
            excluded_packages: Vec::new(),
            exclude_all,
        };
        for package in public_packages {
            restrictions.add_public_package(package);
        }
        for package in excluded_packages {
            restrictions.add_excluded_package(package);
        }
        restrictions
    }

    /// Build restrictions from declared access rules.
    ///
    /// Returns `None` when the rules restrict nothing.
    pub fn from_rules(rules: &[AccessRule]) -> Option<Self> {
        let mut restrictions = Self::default();
        for rule in rules {
            match (rule.kind, rule.package()) {
                (AccessRuleKind::Accessible, Some(package)) => {
                    restrictions.add_public_package(package)
                }
                (AccessRuleKind::NonAccessible | AccessRuleKind::Discouraged, Some(package)) => {
                    restrictions.add_excluded_package(package)
                }
                (AccessRuleKind::NonAccessible | AccessRuleKind::Discouraged, None)
                    if rule.is_catch_all() =>
                {
                    restrictions.exclude_all = true
                }
                _ => {}
            }
        }
        if restrictions.public_packages.is_empty()
            && restrictions.excluded_packages.is_empty()
            && !restrictions.exclude_all
        {
            return None;
        }
        Some(restrictions)
    }

    // insertion order is preserved, duplicates dropped
    fn add_public_package(&mut self, package: String) {
        if !self.public_packages.contains(&package) {
            self.public_packages.push(package);
        }
    }

    fn add_excluded_package(&mut self, package: String) {
        if !self.excluded_packages.contains(&package) {
            self.excluded_packages.push(package);
        }
    }

    pub fn public_packages(&self) -> &[String] {
        &self.public_packages
    }

    pub fn excluded_packages(&self) -> &[String] {
        &self.excluded_packages
    }

    pub fn is_exclude_all(&self) -> bool {
        self.exclude_all
    }

    /// Whether classes of `package` (dotted form) may be used.
    pub fn is_accessible(&self, package: &str) -> bool {
        if self
            .excluded_packages
            .iter()
            .any(|prefix| has_package_prefix(package, prefix))
        {
            return false;
        }
        if self
            .public_packages
            .iter()
            .any(|prefix| has_package_prefix(package, prefix))
        {
            return true;
        }
        !self.exclude_all
    }

    /// Render as an ecj style rule list, e.g. `+java/*;+javax/net/*;-**`
    pub fn to_compiler_rules(&self) -> String {
        let mut rules: Vec<String> = self
            .public_packages
            .iter()
            .map(|p| format!("+{}/*", p.replace('.', "/")))
            .collect();
        rules.extend(
            self.excluded_packages
                .iter()
                .map(|p| format!("-{}/*", p.replace('.', "/"))),
        );
        if self.exclude_all {
            rules.push("-**".to_string());
        }
        rules.join(";")
    }
}

fn has_package_prefix(package: &str, prefix: &str) -> bool {
    package == prefix
        || (package.starts_with(prefix) && package.as_bytes().get(prefix.len()) == Some(&b'.'))
}

/// One resolved classpath element: one or more filesystem locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedClasspathEntry {
    paths: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    access_restrictions: Option<AccessRestrictions>,
}

impl ResolvedClasspathEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            paths: vec![path.into()],
            access_restrictions: None,
        }
    }

    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            access_restrictions: None,
        }
    }

    pub fn with_access_restrictions(mut self, restrictions: Option<AccessRestrictions>) -> Self {
        self.access_restrictions = restrictions;
        self
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn access_restrictions(&self) -> Option<&AccessRestrictions> {
        self.access_restrictions.as_ref()
    }

    pub fn has_access_restrictions(&self) -> bool {
        self.access_restrictions.is_some()
    }

    /// Copy of this entry keeping only the locations accepted by `keep`
    pub(crate) fn retain_paths(&self, mut keep: impl FnMut(&Path) -> bool) -> Self {
        Self {
            paths: self.paths.iter().filter(|p| keep(p.as_path())).cloned().collect(),
            access_restrictions: self.access_restrictions.clone(),
        }
    }
}

/// Immutable result of one resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedClasspath {
    entries: Vec<ResolvedClasspathEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    boot_classpath: Option<ResolvedClasspathEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<ResolveWarning>,
}

impl ResolvedClasspath {
    pub(crate) fn new(
        entries: Vec<ResolvedClasspathEntry>,
        boot_classpath: Option<ResolvedClasspathEntry>,
        warnings: Vec<ResolveWarning>,
    ) -> Self {
        Self {
            entries,
            boot_classpath,
            warnings,
        }
    }

    pub fn entries(&self) -> &[ResolvedClasspathEntry] {
        &self.entries
    }

    pub fn boot_classpath_entry(&self) -> Option<&ResolvedClasspathEntry> {
        self.boot_classpath.as_ref()
    }

    pub fn has_boot_classpath(&self) -> bool {
        self.boot_classpath.is_some()
    }

    /// Warnings raised while this result was computed
    pub fn warnings(&self) -> &[ResolveWarning] {
        &self.warnings
    }

    /// All classpath locations in order
    pub fn classpath_files(&self) -> Vec<&Path> {
        self.entries
            .iter()
            .flat_map(|e| e.paths.iter().map(PathBuf::as_path))
            .collect()
    }

    pub fn boot_classpath_files(&self) -> Vec<&Path> {
        self.boot_classpath
            .iter()
            .flat_map(|e| e.paths.iter().map(PathBuf::as_path))
            .collect()
    }

    /// Join the classpath locations with `separator` (`:` or `;`)
    pub fn to_path_string(&self, separator: &str) -> String {
        self.classpath_files()
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

//! Raw classpath entries as declared in project metadata

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// The kind of a raw classpath entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Source folder of the declaring project
    Source,
    /// Jar file or class folder
    Library,
    /// Reference to another project in the workspace
    Project,
    /// Indirection through a named container
    Container,
    /// Path rooted at a classpath variable
    Variable,
    /// Output folder of the declaring project
    Output,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Source => write!(f, "src"),
            EntryKind::Library => write!(f, "lib"),
            EntryKind::Project => write!(f, "project"),
            EntryKind::Container => write!(f, "con"),
            EntryKind::Variable => write!(f, "var"),
            EntryKind::Output => write!(f, "output"),
        }
    }
}

/// Visibility of the packages matched by an [`AccessRule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessRuleKind {
    Accessible,
    NonAccessible,
    Discouraged,
}

/// A single access rule, `pattern` uses the `org/foo/**` form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessRule {
    pub kind: AccessRuleKind,
    pub pattern: String,
}

impl AccessRule {
    pub fn new(kind: AccessRuleKind, pattern: impl Into<String>) -> Self {
        Self {
            kind,
            pattern: pattern.into(),
        }
    }

    /// Whether the pattern matches every package (`**` or `*`)
    pub fn is_catch_all(&self) -> bool {
        matches!(self.pattern.trim(), "**" | "*" | "**/*")
    }

    /// The dotted package prefix the pattern denotes, if it denotes one.
    ///
    /// `org/foo/**` and `org/foo/*` both yield `org.foo`.
    pub fn package(&self) -> Option<String> {
        let trimmed = self
            .pattern
            .trim()
            .trim_end_matches("/**")
            .trim_end_matches("/*")
            .trim_end_matches('/');
        if trimmed.is_empty() || trimmed.contains('*') {
            return None;
        }
        Some(trimmed.replace('/', "."))
    }
}

/// A raw, unresolved classpath entry.
///
/// Immutable once created. Identity is `(kind, path)`; the remaining fields are
/// attributes that do not participate in equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawClasspathEntry {
    pub kind: EntryKind,
    /// Container id, variable path, project name or file path depending on `kind`
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
    /// Output folder of a source entry, relative to the project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_location: Option<String>,
    #[serde(default)]
    pub exported: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access_rules: Vec<AccessRule>,
}

impl RawClasspathEntry {
    pub fn new(kind: EntryKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            source_path: None,
            output_location: None,
            exported: false,
            access_rules: Vec::new(),
        }
    }

    pub fn source(path: impl Into<String>) -> Self {
        Self::new(EntryKind::Source, path)
    }

    pub fn library(path: impl Into<String>) -> Self {
        Self::new(EntryKind::Library, path)
    }

    pub fn project(name: impl Into<String>) -> Self {
        Self::new(EntryKind::Project, name)
    }

    pub fn container(id: impl Into<String>) -> Self {
        Self::new(EntryKind::Container, id)
    }

    pub fn variable(path: impl Into<String>) -> Self {
        Self::new(EntryKind::Variable, path)
    }

    pub fn output(path: impl Into<String>) -> Self {
        Self::new(EntryKind::Output, path)
    }

    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }

    pub fn with_source_path(mut self, source_path: impl Into<String>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    pub fn with_output_location(mut self, output: impl Into<String>) -> Self {
        self.output_location = Some(output.into());
        self
    }

    pub fn with_access_rule(mut self, rule: AccessRule) -> Self {
        self.access_rules.push(rule);
        self
    }

    pub fn is_kind(&self, kind: EntryKind) -> bool {
        self.kind == kind
    }

    /// Name of the referenced project for a PROJECT entry (`/Name` or `Name`)
    pub fn project_name(&self) -> Option<&str> {
        match self.kind {
            EntryKind::Project => Some(self.path.trim_start_matches('/')),
            _ => None,
        }
    }
}

impl PartialEq for RawClasspathEntry {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.path == other.path
    }
}

impl Eq for RawClasspathEntry {}

impl Hash for RawClasspathEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.path.hash(state);
    }
}

impl fmt::Display for RawClasspathEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.path)
    }
}

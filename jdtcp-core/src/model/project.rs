//! Parsed project metadata consumed by the resolver

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::model::entry::{EntryKind, RawClasspathEntry};

/// Default output folder of a java project
pub const DEFAULT_OUTPUT_FOLDER: &str = "bin";

/// A project with its raw classpath, as produced by the metadata parser.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    name: String,
    /// Name as given by the caller (may differ from the folder name)
    #[serde(default)]
    specified_name: Option<String>,
    /// Project directory
    location: PathBuf,
    #[serde(default = "default_output_folder")]
    default_output: String,
    #[serde(default)]
    entries: Vec<RawClasspathEntry>,
}

fn default_output_folder() -> String {
    DEFAULT_OUTPUT_FOLDER.to_string()
}

impl Project {
    pub fn new(name: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            specified_name: None,
            location: location.into(),
            default_output: default_output_folder(),
            entries: Vec::new(),
        }
    }

    pub fn with_specified_name(mut self, specified_name: impl Into<String>) -> Self {
        self.specified_name = Some(specified_name.into());
        self
    }

    pub fn with_default_output(mut self, output: impl Into<String>) -> Self {
        self.default_output = output.into();
        self
    }

    /// Resolve a relative location against `base`
    pub fn rooted_at(mut self, base: &Path) -> Self {
        if self.location.is_relative() {
            self.location = base.join(&self.location);
        }
        self
    }

    pub fn with_entry(mut self, entry: RawClasspathEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn with_entries(mut self, entries: impl IntoIterator<Item = RawClasspathEntry>) -> Self {
        self.entries.extend(entries);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name used as the cache key; falls back to `name`
    pub fn specified_name(&self) -> &str {
        self.specified_name.as_deref().unwrap_or(&self.name)
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn default_output(&self) -> &str {
        &self.default_output
    }

    pub fn entries(&self) -> &[RawClasspathEntry] {
        &self.entries
    }

    /// Names of the directly referenced projects, in declaration order
    pub fn referenced_projects(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.is_kind(EntryKind::Project))
            .filter_map(RawClasspathEntry::project_name)
    }
}

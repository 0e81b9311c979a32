//! User libraries: named archive sets referenced as
//! `org.eclipse.jdt.USER_LIBRARY/<name>`

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use super::container_types::USER_LIBRARY_CONTAINER;
use super::ContainerResolver;
use crate::context::ResolutionContext;
use crate::error::ResolveResult;
use crate::model::{RawClasspathEntry, ResolvedClasspathEntry};

/// One archive of a user library
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Archive {
    pub path: PathBuf,
    #[serde(default)]
    pub source: Option<PathBuf>,
}

impl Archive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            source: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserLibrary {
    pub name: String,
    /// Marks a library meant for the boot classpath; informational only
    #[serde(default)]
    pub system_library: bool,
    #[serde(default)]
    pub archives: Vec<Archive>,
}

impl UserLibrary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_library: false,
            archives: Vec::new(),
        }
    }

    pub fn with_archive(mut self, archive: Archive) -> Self {
        self.archives.push(archive);
        self
    }
}

/// The set of user libraries known to the workspace
#[derive(Debug, Default)]
pub struct UserLibraries {
    libraries: RwLock<BTreeMap<String, UserLibrary>>,
}

impl UserLibraries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_library(&self, library: UserLibrary) {
        let mut libraries = self.libraries.write().unwrap_or_else(|p| p.into_inner());
        libraries.insert(library.name.clone(), library);
    }

    pub fn has_library(&self, name: &str) -> bool {
        self.libraries
            .read()
            .map(|l| l.contains_key(name))
            .unwrap_or(false)
    }

    pub fn library(&self, name: &str) -> Option<UserLibrary> {
        self.libraries.read().ok()?.get(name).cloned()
    }

    /// Names of all libraries, sorted
    pub fn available_libraries(&self) -> Vec<String> {
        match self.libraries.read() {
            Ok(libraries) => libraries.keys().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Resolves user library containers against [`UserLibraries`]
#[derive(Debug, Clone)]
pub struct UserLibraryContainerResolver {
    libraries: Arc<UserLibraries>,
}

impl UserLibraryContainerResolver {
    pub fn new(libraries: Arc<UserLibraries>) -> Self {
        Self { libraries }
    }
}

fn library_name(container_path: &str) -> Option<&str> {
    container_path
        .strip_prefix(USER_LIBRARY_CONTAINER)
        .filter(|name| !name.is_empty())
}

impl ContainerResolver for UserLibraryContainerResolver {
    fn name(&self) -> &'static str {
        "user-library"
    }

    fn can_resolve_container(&self, container_path: &str) -> bool {
        library_name(container_path).is_some_and(|name| self.libraries.has_library(name))
    }

    fn resolve_container(
        &self,
        container_path: &str,
        _entry: &RawClasspathEntry,
        ctx: &mut ResolutionContext<'_>,
    ) -> ResolveResult<()> {
        let Some(library) = library_name(container_path).and_then(|n| self.libraries.library(n)) else {
            return Ok(());
        };
        let paths: Vec<PathBuf> = library
            .archives
            .into_iter()
            .map(|archive| ctx.render_path(archive.path))
            .collect();
        ctx.add_classpath_entry(ResolvedClasspathEntry::from_paths(paths));
        Ok(())
    }
}

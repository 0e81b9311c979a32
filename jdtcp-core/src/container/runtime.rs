//! Java runtime and execution profile registry

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// An installed java runtime
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JavaRuntime {
    pub id: String,
    pub java_version: String,
    pub location: PathBuf,
    /// Boot libraries, in classpath order
    pub libraries: Vec<PathBuf>,
}

impl JavaRuntime {
    pub fn new<I, P>(
        id: impl Into<String>,
        java_version: impl Into<String>,
        location: impl Into<PathBuf>,
        libraries: I,
    ) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            id: id.into(),
            java_version: java_version.into(),
            location: location.into(),
            libraries: libraries.into_iter().map(Into::into).collect(),
        }
    }
}

/// An execution environment restricting the visible system packages
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JavaProfile {
    pub name: String,
    #[serde(default)]
    pub system_packages: Vec<String>,
}

impl JavaProfile {
    pub fn new<I, S>(name: impl Into<String>, system_packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            system_packages: system_packages.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Default)]
struct RuntimeTable {
    runtimes: HashMap<String, Arc<JavaRuntime>>,
    default_id: Option<String>,
}

/// Registry of runtimes and profiles.
///
/// Read-mostly: populated at startup; the only mutation during resolution is
/// the fallback alias registration, which is an atomic insert-if-absent.
#[derive(Debug, Default)]
pub struct JavaRuntimeRegistry {
    table: RwLock<RuntimeTable>,
    profiles: RwLock<HashMap<String, Arc<JavaProfile>>>,
}

impl JavaRuntimeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a runtime. The first registered runtime becomes the default
    /// unless `is_default` marks a later one.
    pub fn register_java_runtime(&self, runtime: JavaRuntime, is_default: bool) -> Arc<JavaRuntime> {
        let runtime = Arc::new(runtime);
        let mut table = self.table.write().unwrap_or_else(|p| p.into_inner());
        if is_default || table.default_id.is_none() {
            table.default_id = Some(runtime.id.clone());
        }
        table
            .runtimes
            .insert(runtime.id.clone(), Arc::clone(&runtime));
        runtime
    }

    /// Make an already registered runtime the default
    pub fn set_default_java_runtime(&self, id: &str) -> bool {
        let mut table = self.table.write().unwrap_or_else(|p| p.into_inner());
        if !table.runtimes.contains_key(id) {
            return false;
        }
        table.default_id = Some(id.to_string());
        true
    }

    /// Register `alias` for `runtime` unless the alias is already taken.
    ///
    /// Returns true if this call inserted the alias.
    pub fn register_alias_if_absent(&self, alias: &str, runtime: &Arc<JavaRuntime>) -> bool {
        let mut table = self.table.write().unwrap_or_else(|p| p.into_inner());
        if table.runtimes.contains_key(alias) {
            return false;
        }
        table
            .runtimes
            .insert(alias.to_string(), Arc::clone(runtime));
        true
    }

    pub fn has_java_runtime(&self, id: &str) -> bool {
        self.table
            .read()
            .map(|t| t.runtimes.contains_key(id))
            .unwrap_or(false)
    }

    pub fn java_runtime(&self, id: &str) -> Option<Arc<JavaRuntime>> {
        self.table.read().ok()?.runtimes.get(id).cloned()
    }

    pub fn default_java_runtime(&self) -> Option<Arc<JavaRuntime>> {
        let table = self.table.read().ok()?;
        let id = table.default_id.as_ref()?;
        table.runtimes.get(id).cloned()
    }

    pub fn register_java_profile(&self, profile: JavaProfile) {
        let mut profiles = self.profiles.write().unwrap_or_else(|p| p.into_inner());
        profiles.insert(profile.name.clone(), Arc::new(profile));
    }

    pub fn has_java_profile(&self, key: &str) -> bool {
        self.profiles
            .read()
            .map(|p| p.contains_key(key))
            .unwrap_or(false)
    }

    pub fn java_profile(&self, key: &str) -> Option<Arc<JavaProfile>> {
        self.profiles.read().ok()?.get(key).cloned()
    }
}

//! Resolver job: the immutable inputs of one resolution call

use serde::Deserialize;
use std::sync::Arc;

use crate::model::Project;
use crate::workspace::Workspace;

/// Key/value argument handed through to container resolvers
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContainerArgument {
    pub key: String,
    pub value: String,
}

impl ContainerArgument {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Parse `key=value`
    pub fn parse(s: &str) -> Option<Self> {
        let (key, value) = s.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some(Self::new(key, value.trim()))
    }
}

/// Everything a resolution run needs to know up front
pub struct ResolverJob<'a> {
    root_project: Arc<Project>,
    workspace: &'a dyn Workspace,
    resolve_relative: bool,
    runtime_classpath: bool,
    container_arguments: Vec<ContainerArgument>,
}

impl std::fmt::Debug for ResolverJob<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverJob")
            .field("root_project", &self.root_project.name())
            .field("workspace", &self.workspace.root())
            .field("resolve_relative", &self.resolve_relative)
            .field("runtime_classpath", &self.runtime_classpath)
            .field("container_arguments", &self.container_arguments)
            .finish()
    }
}

impl<'a> ResolverJob<'a> {
    pub fn new(
        root_project: Arc<Project>,
        workspace: &'a dyn Workspace,
        resolve_relative: bool,
        runtime_classpath: bool,
        container_arguments: Vec<ContainerArgument>,
    ) -> Self {
        Self {
            root_project,
            workspace,
            resolve_relative,
            runtime_classpath,
            container_arguments,
        }
    }

    pub fn root_project(&self) -> &Arc<Project> {
        &self.root_project
    }

    pub fn workspace(&self) -> &'a dyn Workspace {
        self.workspace
    }

    pub fn is_resolve_relative(&self) -> bool {
        self.resolve_relative
    }

    pub fn is_runtime_classpath(&self) -> bool {
        self.runtime_classpath
    }

    pub fn container_arguments(&self) -> &[ContainerArgument] {
        &self.container_arguments
    }

    /// Value of the first container argument with `key`
    pub fn container_argument(&self, key: &str) -> Option<&str> {
        self.container_arguments
            .iter()
            .find(|arg| arg.key == key)
            .map(|arg| arg.value.as_str())
    }
}

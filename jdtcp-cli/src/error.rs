use std::path::PathBuf;
use thiserror::Error;

use jdtcp_core::ResolveError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot determine the working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),

    #[error("project '{0}' is not part of the workspace")]
    UnknownProject(String),

    #[error("default runtime '{0}' is not registered")]
    UnknownRuntime(String),

    #[error("invalid container argument '{0}', expected key=value")]
    InvalidArgument(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("cannot render result: {0}")]
    Render(#[from] serde_json::Error),
}

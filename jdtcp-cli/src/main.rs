//! jdtcp CLI - resolve the classpath of one project in a workspace manifest

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process;

mod error;
mod logging;
mod manifest;

use crate::error::{CliError, CliResult};
use crate::logging::{LogFormat, CLI_TARGET};
use crate::manifest::Manifest;
use jdtcp_config::LogLevel;
use jdtcp_core::{ContainerArgument, ResolvedClasspath, Workspace};

/// Output format of the resolved classpath
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Path-separator joined classpath, boot classpath on a second line
    Plain,
    /// The full result as JSON
    Json,
}

#[derive(Parser)]
#[command(
    name = "jdtcp",
    about = "Resolve the classpath of an Eclipse JDT project",
    version = "0.1.0"
)]
struct Cli {
    /// Workspace manifest (JSON)
    #[arg(value_name = "MANIFEST")]
    manifest: PathBuf,

    /// Project to resolve
    #[arg(value_name = "PROJECT")]
    project: String,

    /// Render workspace paths relative to the workspace root
    #[arg(long)]
    relative: bool,

    /// Resolve the runtime classpath instead of the build classpath
    #[arg(long)]
    runtime: bool,

    #[arg(long, value_enum, default_value = "plain")]
    format: OutputFormat,

    /// Container argument, repeatable
    #[arg(long = "arg", value_name = "KEY=VALUE")]
    args: Vec<String>,

    /// Overrides the manifest's global log level
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    #[arg(long, value_enum, default_value = "compact")]
    log_format: LogFormat,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> CliResult<()> {
    let mut manifest = Manifest::load(&cli.manifest)?;
    if let Some(level) = cli.log_level.as_deref().and_then(LogLevel::parse) {
        manifest.config.log.global = level;
    }
    logging::init(&manifest.config.log, cli.log_format);

    let container_arguments = cli
        .args
        .iter()
        .map(|arg| ContainerArgument::parse(arg).ok_or_else(|| CliError::InvalidArgument(arg.clone())))
        .collect::<CliResult<Vec<_>>>()?;

    let root = manifest.workspace_root(&cli.manifest)?;
    let (resolver, workspace) = manifest.into_parts(root)?;
    let project = workspace
        .project(&cli.project)
        .ok_or_else(|| CliError::UnknownProject(cli.project.clone()))?;
    tracing::info!(
        target: CLI_TARGET,
        project = project.name(),
        relative = cli.relative,
        runtime = cli.runtime,
        "resolving"
    );

    let classpath =
        resolver.resolve_project_classpath(&workspace, &project, cli.relative, cli.runtime, &container_arguments)?;
    for warning in classpath.warnings() {
        eprintln!("Warning: {}", warning);
    }
    println!("{}", render(&classpath, cli.format)?);
    Ok(())
}

fn render(classpath: &ResolvedClasspath, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Plain => {
            let separator = if cfg!(windows) { ";" } else { ":" };
            let mut out = classpath.to_path_string(separator);
            if classpath.has_boot_classpath() {
                let boot: Vec<String> = classpath
                    .boot_classpath_files()
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect();
                out.push('\n');
                out.push_str(&boot.join(separator));
            }
            Ok(out)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(classpath)?),
    }
}

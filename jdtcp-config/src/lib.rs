//! jdtcp Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all jdtcp crates.

use serde::{Deserialize, Serialize};

/// Environment variable that disables the resolver cache process-wide.
pub const DISABLE_CACHE_ENV: &str = "JDTCP_DISABLE_RESOLVER_CACHE";

/// Configuration for the classpath resolver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Always re-resolve, never read or write the result cache
    pub disable_cache: bool,
    /// Logging levels
    pub log: LogConfig,
}

impl ResolverConfig {
    /// Whether the cache is bypassed for the current call.
    ///
    /// The environment toggle is read on every call so that it can be flipped
    /// between resolutions without rebuilding the resolver.
    pub fn cache_disabled(&self) -> bool {
        self.disable_cache || env_flag(DISABLE_CACHE_ENV)
    }
}

/// Read a boolean environment toggle (`true`, `1`, `yes`, `on`).
pub fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| parse_flag(&value))
        .unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// Log level, mirrors the levels understood by the CLI subscriber
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse a level name; "silent" maps to `Error`
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "silent" | "error" => Some(LogLevel::Error),
            "warn" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// Logging configuration with per-phase overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default level
    pub global: LogLevel,
    /// Project walk level (None means use global)
    pub walk: Option<LogLevel>,
    /// Container and variable resolution level
    pub container: Option<LogLevel>,
    /// Cache level
    pub cache: Option<LogLevel>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: LogLevel::Info,
            walk: None,
            container: None,
            cache: None,
        }
    }
}

impl LogConfig {
    /// Effective level for a phase
    pub fn level_for(&self, phase: Phase) -> LogLevel {
        let specific = match phase {
            Phase::Walk => self.walk,
            Phase::Container => self.container,
            Phase::Cache => self.cache,
        };
        specific.unwrap_or(self.global)
    }
}

/// Resolution phase, used for phase-specific log targets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Walk,
    Container,
    Cache,
}

impl Phase {
    /// All phases, in pipeline order
    pub const ALL: [Phase; 3] = [Phase::Walk, Phase::Container, Phase::Cache];

    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Walk => "walk",
            Phase::Container => "container",
            Phase::Cache => "cache",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> String {
        format!("jdtcp::{}", self.as_str())
    }
}

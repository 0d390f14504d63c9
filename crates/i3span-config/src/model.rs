//! Configuration data model

use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub global: GlobalConfig,
    pub format: FormatConfig,
}

/// Global settings
#[derive(Debug, Clone, Default)]
pub struct GlobalConfig {
    pub log_level: LogLevel,
    /// Override for the i3 IPC socket path. When unset the daemon asks i3
    /// itself (or `$I3SOCK`) for the path.
    pub socket_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

/// Pango markup templates for the rendered workspace list
///
/// Each template is expanded per workspace with `{name}` replaced by the
/// workspace's display name. The focused workspace uses `focused`, every
/// other workspace uses `unfocused`.
#[derive(Debug, Clone)]
pub struct FormatConfig {
    pub focused: String,
    pub unfocused: String,
    pub separator: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            focused: "<span background=\"green\" underline=\"double\">{name}</span>".to_string(),
            unfocused: "<span>{name}</span>".to_string(),
            separator: " ".to_string(),
        }
    }
}

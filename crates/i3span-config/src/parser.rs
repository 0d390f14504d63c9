//! KDL configuration parser

use std::path::Path;

use crate::error::ConfigError;
use crate::model::*;

/// Parse a configuration file from the given path
///
/// A missing file is not an error: the daemon is fully functional with
/// defaults, so this returns `Config::default()` when the path does not
/// exist.
pub fn parse_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        tracing::debug!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    parse_config_str(&content)
}

/// Parse configuration from a string
pub fn parse_config_str(content: &str) -> Result<Config, ConfigError> {
    let doc: kdl::KdlDocument = content.parse().map_err(|e: kdl::KdlError| {
        // Convert span from kdl's miette version to our miette version
        let offset = e.span.offset();
        let len = e.span.len();
        let span = miette::SourceSpan::from((offset, len));
        ConfigError::ParseError {
            src: content.to_string(),
            span,
            source: e,
        }
    })?;

    let mut config = Config::default();

    for node in doc.nodes() {
        match node.name().value() {
            "global" => {
                config.global = parse_global(node)?;
            }
            "format" => {
                config.format = parse_format(node)?;
            }
            name => {
                tracing::warn!("Unknown top-level node: {}", name);
            }
        }
    }

    Ok(config)
}

/// Extract the first string argument of a node, erroring when absent
fn string_arg(node: &kdl::KdlNode) -> Result<String, ConfigError> {
    node.entries()
        .first()
        .and_then(|e| e.value().as_string())
        .map(|s| s.to_string())
        .ok_or_else(|| ConfigError::MissingValue {
            option: node.name().value().to_string(),
        })
}

fn parse_global(node: &kdl::KdlNode) -> Result<GlobalConfig, ConfigError> {
    let mut global = GlobalConfig::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "log-level" => {
                    let val = string_arg(child)?;
                    global.log_level = val
                        .parse()
                        .map_err(|e| ConfigError::Invalid { message: e })?;
                }
                "socket-path" => {
                    let val = string_arg(child)?;
                    global.socket_path = Some(shellexpand::tilde(&val).into_owned().into());
                }
                name => {
                    tracing::warn!("Unknown global config option: {}", name);
                }
            }
        }
    }

    Ok(global)
}

fn parse_format(node: &kdl::KdlNode) -> Result<FormatConfig, ConfigError> {
    let mut format = FormatConfig::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "focused" => format.focused = string_arg(child)?,
                "unfocused" => format.unfocused = string_arg(child)?,
                "separator" => format.separator = string_arg(child)?,
                name => {
                    tracing::warn!("Unknown format option: {}", name);
                }
            }
        }
    }

    // Templates without a {name} placeholder render every workspace
    // identically, which is almost certainly a mistake.
    for (which, template) in [("focused", &format.focused), ("unfocused", &format.unfocused)] {
        if !template.contains("{name}") {
            return Err(ConfigError::Invalid {
                message: format!("format.{} template has no {{name}} placeholder", which),
            });
        }
    }

    Ok(format)
}

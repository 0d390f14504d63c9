//! Configuration parsing for i3span
//!
//! This crate handles parsing the optional KDL configuration file that
//! controls the daemon's log level, socket-path override, and the Pango
//! markup templates used when rendering the workspace list.

mod error;
mod model;
mod parser;

pub use error::ConfigError;
pub use model::*;
pub use parser::{parse_config, parse_config_str};

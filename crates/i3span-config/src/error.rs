use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Failed to parse KDL")]
    #[diagnostic(code(i3span::config::parse_error))]
    ParseError {
        #[source_code]
        src: String,
        #[label("here")]
        span: miette::SourceSpan,
        #[source]
        source: kdl::KdlError,
    },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(i3span::config::invalid))]
    Invalid { message: String },

    #[error("Missing value for option: {option}")]
    #[diagnostic(code(i3span::config::missing_value))]
    MissingValue { option: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

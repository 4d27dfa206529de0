use miette::Diagnostic;
use thiserror::Error;

/// Main error type for npconvert operations
#[derive(Error, Diagnostic, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    #[diagnostic(code(npconvert::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(npconvert::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("{format} conversion is not yet supported")]
    #[diagnostic(
        code(npconvert::format),
        help("Only Citizens saves can be converted at the moment")
    )]
    UnsupportedFormat { format: String },

    #[error("Invalid source format: {name}")]
    #[diagnostic(
        code(npconvert::format),
        help("Use one of: citizens, znpcs, znpcsplus")
    )]
    UnknownFormat { name: String },

    #[error("Malformed NPC entry '{entry}': {message}")]
    #[diagnostic(code(npconvert::malformed))]
    MalformedEntry {
        entry: String,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("{failed} of {total} inputs could not be converted")]
    #[diagnostic(
        code(npconvert::convert),
        help("Each failure is listed above; run `npconvert check` on a single file for details")
    )]
    Failed { failed: usize, total: usize },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(npconvert::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Output error: {message}")]
    #[diagnostic(code(npconvert::output))]
    Output {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl ConvertError {
    /// Shorthand for a malformed entry without help text.
    pub fn malformed(entry: impl Into<String>, message: impl Into<String>) -> Self {
        ConvertError::MalformedEntry {
            entry: entry.into(),
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

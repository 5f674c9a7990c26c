use std::path::PathBuf;
use thiserror::Error;

/// A JSON syntax error in editor text, with its 1-based position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl From<serde_json::Error> for SyntaxError {
    fn from(e: serde_json::Error) -> Self {
        SyntaxError {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
        }
    }
}

#[derive(Error, Debug)]
pub enum FormatError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(String),

    #[error("unknown template: {0}")]
    UnknownTemplate(String),
}

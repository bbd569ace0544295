use thiserror::Error;

/// Failure surfaced by the `Result`-returning convenience entry points.
///
/// The parser itself never bails out mid-document: it records formatted
/// diagnostics (see [`crate::Parser::errors`]) and keeps going. `Syntax`
/// carries the first recorded error of a failed parse.
#[derive(Debug, Error)]
pub enum Error {
    #[error("syntax error at line {line}, col {col}: {message}")]
    Syntax { line: u32, col: u32, message: String },

    #[cfg(feature = "json")]
    #[error("serde_json error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, Error>;

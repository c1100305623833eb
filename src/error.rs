//! Error types for mdpack operations.

use thiserror::Error;

/// Errors that abort a document conversion.
///
/// Problems with individual images are not errors: they are logged and the
/// image is left as it was.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTML parsing error: {0}")]
    Parse(String),

    #[error("Syntax highlighting error: {0}")]
    Highlight(String),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;

// Error taxonomy for shortcut decoding.
//
// Every failure is fatal to the decode call that raised it: there is no
// partial result and no recovery.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Structural validation failure. The string is a human-readable reason
    /// such as "Unexpected header size".
    #[error("invalid shortcut file: {0}")]
    InvalidFormat(String),

    /// The stream ended before a read could be completed.
    #[error("unexpected end of stream")]
    EndOfStream,

    /// Any other failure from the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidFormat(reason.into())
    }

    /// The reason carried by an `InvalidFormat` error.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::InvalidFormat(reason) => Some(reason),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Errors raised by the viewer engine.
///
/// Apart from `Io` and `Config`, every variant is an integration precondition:
/// a correctly wired host never sees them.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),

    /// The requested page index is outside `[0, count)`.
    IndexOutOfRange { index: usize, count: usize },

    /// The pager has no current page to transition from or to.
    NoCurrentPage,

    /// The page source returned no origin view for the index.
    MissingOriginView(usize),

    /// A transition was requested while another one is still running.
    TransitionInProgress,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::IndexOutOfRange { index, count } => {
                write!(f, "Page index {} out of range (count {})", index, count)
            }
            Error::NoCurrentPage => write!(f, "No current page"),
            Error::MissingOriginView(index) => {
                write!(f, "No origin view for page {}", index)
            }
            Error::TransitionInProgress => write!(f, "A transition is already in progress"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

//! Error kinds shared across the search pipeline.
//!
//! Only `ArgumentError` ever aborts a run; the rest are surfaced as
//! diagnostics on stderr while scanning continues (see `search::run`).

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The pattern parser rejected a pattern string at the given character index.
    MalformedPattern { pattern: String, index: usize },
    /// A file could not be opened, read, or decoded as UTF-8.
    SourceUnreadable { source: String, reason: String },
    /// Bad CLI usage; the process exits immediately with code 2.
    ArgumentError(String),
}

impl Error {
    /// Render as a `source: description` diagnostic line, lowercased. Not
    /// meaningful for `ArgumentError`, which is a top-level usage message
    /// rather than a per-source diagnostic.
    pub fn diagnostic(&self) -> String {
        match self {
            Error::MalformedPattern { pattern, .. } => format!("{}: invalid pattern", pattern),
            Error::SourceUnreadable { source, reason } => {
                format!("{}: {}", source, reason.to_lowercase())
            }
            Error::ArgumentError(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diagnostic())
    }
}

impl std::error::Error for Error {}

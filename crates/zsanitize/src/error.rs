//! Error types for zsanitize

use std::fmt;
use thiserror::Error;

/// Position in a source document (1-based line and column)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl Pos {
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The markup could not be turned into a usable tree
    ParseFailure,
    /// The whitelist document has the wrong shape
    ConfigFormat,
    /// Elements nest deeper than the configured parser limit
    DepthLimit,
    /// Reading or writing a source failed
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseFailure => write!(f, "unable to parse html"),
            Self::ConfigFormat => write!(f, "invalid whitelist configuration"),
            Self::DepthLimit => write!(f, "document nested too deeply"),
            Self::Io => write!(f, "i/o error"),
        }
    }
}

/// Main error type for zsanitize
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    pos: Option<Pos>,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            pos: None,
            message,
        }
    }

    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            pos: None,
            message: message.into(),
        }
    }

    /// Create error at specific position
    pub fn at(kind: ErrorKind, line: usize, col: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            pos: Some(Pos::new(line, col)),
            message: message.into(),
        }
    }

    pub fn parse_failure(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::ParseFailure, message)
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn pos(&self) -> Option<Pos> {
        self.pos
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pos {
            Some(pos) => write!(f, "{} at {}: {}", self.kind, pos, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            return Self::with_message(ErrorKind::Io, err.to_string());
        }
        // line 0 means serde_json had no position to report
        if err.line() == 0 {
            return Self::with_message(ErrorKind::ConfigFormat, err.to_string());
        }
        Self::at(ErrorKind::ConfigFormat, err.line(), err.column(), err.to_string())
    }
}

/// Result type alias for zsanitize
pub type Result<T> = std::result::Result<T, Error>;

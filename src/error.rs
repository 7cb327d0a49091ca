//! Error handling for the lock file codec.
//!
//! Every failure to read or write a lock file surfaces as a [`LockError`].
//! Format errors are never retried internally: callers that hit one should
//! treat the restore state as stale and re-resolve rather than trust a
//! partially parsed file. No converter returns a partial entity.

use thiserror::Error;

use crate::json::TokenKind;

/// Errors raised while reading or writing a lock file.
#[derive(Debug, Error)]
pub enum LockError {
    /// The bytes at `position` are not valid JSON.
    #[error("invalid JSON at byte {position}: {reason}")]
    InvalidJson {
        /// Byte offset of the offending input
        position: u64,
        /// Short description of what was wrong
        reason: &'static str,
    },

    /// A converter required one token kind and found another.
    #[error("unexpected token at byte {position}: expected {expected}, found {found}")]
    UnexpectedToken {
        /// Token kind the converter required
        expected: TokenKind,
        /// Token kind actually present
        found: TokenKind,
        /// Byte offset of the found token
        position: u64,
    },

    /// The stream ended while more tokens were required.
    #[error("unexpected end of stream at byte {position}")]
    UnexpectedEof {
        /// Byte offset where the stream ended
        position: u64,
    },

    /// A string value was not valid UTF-8 once unescaped.
    #[error("invalid UTF-8 in string at byte {position}")]
    InvalidUtf8 {
        /// Byte offset of the string token
        position: u64,
    },

    /// A number did not fit the integer type the field requires.
    #[error("number out of range at byte {position}")]
    NumberOutOfRange {
        /// Byte offset of the number token
        position: u64,
    },

    /// A composite `name/version` key could not be split.
    #[error("malformed key {key:?}: {reason}")]
    MalformedKey {
        /// The raw property name
        key: String,
        /// Short description of what was wrong
        reason: &'static str,
    },

    /// A version segment could not be parsed.
    #[error("invalid version {value:?}: {reason}")]
    InvalidVersion {
        /// The raw version text
        value: String,
        /// Parser diagnostic
        reason: String,
    },

    /// Two libraries share the same (name, version) identity.
    #[error("duplicate library {0}")]
    DuplicateLibrary(String),

    /// Objects or arrays nest deeper than the configured limit.
    #[error("nesting depth {depth} exceeds limit {limit}")]
    NestingTooDeep {
        /// Depth reached
        depth: u64,
        /// Configured limit
        limit: u64,
    },

    /// A string is longer than the configured limit.
    #[error("string length {length} exceeds limit {limit}")]
    StringTooLong {
        /// Bytes read so far
        length: u64,
        /// Configured limit
        limit: u64,
    },

    /// The input stream is larger than the configured limit.
    #[error("input exceeds {limit} bytes")]
    InputTooLarge {
        /// Configured limit
        limit: u64,
    },

    /// The underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LockError {
    /// Returns true when the error describes the content of the file rather
    /// than the stream carrying it.
    pub fn is_format_error(&self) -> bool {
        !matches!(self, LockError::Io(_))
    }

    /// Byte offset associated with the error, if any.
    pub fn position(&self) -> Option<u64> {
        match self {
            LockError::InvalidJson { position, .. }
            | LockError::UnexpectedToken { position, .. }
            | LockError::UnexpectedEof { position }
            | LockError::InvalidUtf8 { position }
            | LockError::NumberOutOfRange { position } => Some(*position),
            _ => None,
        }
    }

    /// Stable variant name, for machine-readable reports.
    pub fn name(&self) -> &'static str {
        match self {
            LockError::InvalidJson { .. } => "InvalidJson",
            LockError::UnexpectedToken { .. } => "UnexpectedToken",
            LockError::UnexpectedEof { .. } => "UnexpectedEof",
            LockError::InvalidUtf8 { .. } => "InvalidUtf8",
            LockError::NumberOutOfRange { .. } => "NumberOutOfRange",
            LockError::MalformedKey { .. } => "MalformedKey",
            LockError::InvalidVersion { .. } => "InvalidVersion",
            LockError::DuplicateLibrary(_) => "DuplicateLibrary",
            LockError::NestingTooDeep { .. } => "NestingTooDeep",
            LockError::StringTooLong { .. } => "StringTooLong",
            LockError::InputTooLarge { .. } => "InputTooLarge",
            LockError::Io(_) => "Io",
        }
    }
}

/// Result type for codec operations.
pub type LockResult<T> = Result<T, LockError>;

//! Error types and position tracking for ADL parsing
//!
//! Every parse failure carries a [`Location`]: the source label plus the
//! number of characters consumed when the failure was detected.

use std::fmt;
use std::io;
use thiserror::Error;

/// A point in the input, measured in characters consumed
///
/// ADL diagnostics are measured in raw characters pulled from the source,
/// not line/column pairs. The counter is 1-based and includes every
/// character read, comments included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    /// Label identifying the input, usually a file path
    pub source: String,
    /// 1-based count of characters consumed so far
    pub offset: u64,
}

impl Location {
    /// Creates a location from a source label and character offset
    pub fn new(source: impl Into<String>, offset: u64) -> Self {
        Self {
            source: source.into(),
            offset,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.offset)
    }
}

/// A grammar violation or truncation encountered while parsing
///
/// All variants are fatal to the parse in progress: the caller receives
/// either a complete [`Entry`](crate::Entry) tree or one of these.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A quote or brace appeared inside a bare key or type name
    #[error("illegal character '{character}' in a key declaration at {location}")]
    IllegalKeyCharacter { character: char, location: Location },

    /// Something other than `=` followed a whitespace-terminated key
    #[error("expected '=' after a key name, found '{character}' at {location}")]
    ExpectedSeparator { character: char, location: Location },

    /// A delimiter character appeared inside a bare value token
    #[error("illegal character '{character}' in a value declaration at {location}")]
    IllegalValueCharacter { character: char, location: Location },

    /// A quote or brace opened in the middle of a bare token
    #[error("'{character}' may not open in the middle of a bare token at {location}")]
    DelimiterInsideToken { character: char, location: Location },

    /// A value was not followed by whitespace or a closing brace
    #[error("expected whitespace or '}}' after a value, found '{character}' at {location}")]
    ExpectedDelimiter { character: char, location: Location },

    /// A key was declared without a value before the entry ended
    #[error("key '{key}' has no value at {location}")]
    DanglingKey { key: String, location: Location },

    /// A quoted string was still open at end of input
    #[error("unterminated quoted string at {location}")]
    UnterminatedString { location: Location },

    /// A `[` list was still open at end of input
    #[error("unterminated list at {location}")]
    UnterminatedList { location: Location },

    /// The input ended in the middle of a key, separator, or value
    #[error("unexpected end of input at {location}")]
    UnexpectedEof { location: Location },

    /// Entries were nested deeper than the configured limit
    #[error("maximum nesting depth {limit} exceeded at {location}")]
    DepthExceeded { limit: usize, location: Location },

    /// The byte stream did not decode as UTF-8
    #[error("invalid UTF-8 sequence at {location}")]
    InvalidUtf8 { location: Location },

    /// The underlying stream failed mid-parse
    #[error("read error at {location}: {error}")]
    Read {
        location: Location,
        #[source]
        error: io::Error,
    },
}

impl ParseError {
    /// Returns the location at which the failure was detected
    pub fn location(&self) -> &Location {
        match self {
            Self::IllegalKeyCharacter { location, .. }
            | Self::ExpectedSeparator { location, .. }
            | Self::IllegalValueCharacter { location, .. }
            | Self::DelimiterInsideToken { location, .. }
            | Self::ExpectedDelimiter { location, .. }
            | Self::DanglingKey { location, .. }
            | Self::UnterminatedString { location }
            | Self::UnterminatedList { location }
            | Self::UnexpectedEof { location }
            | Self::DepthExceeded { location, .. }
            | Self::InvalidUtf8 { location }
            | Self::Read { location, .. } => location,
        }
    }
}

/// Top-level error type for ADL operations
#[derive(Debug, Error)]
pub enum AdlError {
    /// Parsing error
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O error opening the input
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display_is_label_then_offset() {
        let location = Location::new("assets/tower.adl", 42);
        assert_eq!(location.to_string(), "assets/tower.adl: 42");
    }

    #[test]
    fn parse_error_display_includes_location() {
        let error = ParseError::UnterminatedString {
            location: Location::new("a.adl", 7),
        };
        assert_eq!(error.to_string(), "unterminated quoted string at a.adl: 7");
        assert_eq!(error.location().offset, 7);
    }

    #[test]
    fn adl_error_wraps_parse_error() {
        let error: AdlError = ParseError::UnexpectedEof {
            location: Location::new("b.adl", 3),
        }
        .into();
        assert!(matches!(error, AdlError::Parse(_)));
        assert_eq!(
            error.to_string(),
            "parse error: unexpected end of input at b.adl: 3"
        );
    }
}

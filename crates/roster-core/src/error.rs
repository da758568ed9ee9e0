//! # Format Errors
//!
//! A single error type, [`InvalidFormatError`], covers every way an
//! exported registry document can be rejected. Each variant carries the
//! structured context of the failure (the attribute name, the offending
//! literal) so callers can match on fields instead of message text.
//!
//! The `Display` output is stable and is what operators see verbatim.

use std::fmt;

use thiserror::Error;

/// Convenience alias used across the roster crates.
pub type Result<T> = std::result::Result<T, InvalidFormatError>;

/// The JSON type an attribute was required to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A JSON `true` or `false`.
    Bool,
    /// Any JSON string.
    String,
    /// A JSON string with at least one character.
    NonEmptyString,
    /// A JSON object.
    Object,
    /// A JSON array.
    List,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::String => "string",
            Self::NonEmptyString => "non-empty string",
            Self::Object => "object",
            Self::List => "list",
        };
        f.write_str(name)
    }
}

/// Rejection of an input document.
///
/// Every validation failure is fatal to the operation that raised it;
/// there is no partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidFormatError {
    /// The input was empty or absent.
    #[error("stream cannot be empty or None")]
    EmptyStream,

    /// The input is not well-formed JSON.
    #[error("invalid json format. {message}")]
    InvalidJson {
        /// Diagnostic forwarded from the JSON decoder.
        message: String,
        /// 1-based line of the syntax error.
        line: usize,
        /// 1-based column of the syntax error.
        column: usize,
    },

    /// A required attribute is absent.
    #[error("Attribute {attribute} not found")]
    MissingAttribute {
        /// Name of the absent attribute.
        attribute: String,
    },

    /// An attribute is present but holds a value of the wrong JSON type.
    #[error("'{attribute}' must have a {expected} value")]
    WrongType {
        /// Name of the offending attribute.
        attribute: String,
        /// The type the attribute must have.
        expected: ValueKind,
    },

    /// A string that does not denote a valid calendar timestamp.
    #[error("invalid date format: {value}")]
    InvalidDate {
        /// The literal that failed to parse.
        value: String,
    },

    /// An enrollment names an organization the document does not declare.
    #[error("organization {name} not found")]
    UnknownOrganization {
        /// The unresolved organization name.
        name: String,
    },

    /// A value that must be unique within the document appears twice.
    #[error("duplicate {attribute} value: {value}")]
    DuplicateValue {
        /// Name of the attribute that must be unique.
        attribute: String,
        /// The repeated value.
        value: String,
    },
}

impl InvalidFormatError {
    /// A required attribute is absent.
    pub fn missing(attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            attribute: attribute.into(),
        }
    }

    /// An attribute holds a value of the wrong type.
    pub fn wrong_type(attribute: impl Into<String>, expected: ValueKind) -> Self {
        Self::WrongType {
            attribute: attribute.into(),
            expected,
        }
    }

    /// A timestamp literal could not be parsed.
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }

    /// Name of the attribute this error is about, when there is one.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Self::MissingAttribute { attribute }
            | Self::WrongType { attribute, .. }
            | Self::DuplicateValue { attribute, .. } => Some(attribute),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for InvalidFormatError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidJson {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_attribute() {
        assert_eq!(
            InvalidFormatError::missing("uuid").to_string(),
            "Attribute uuid not found"
        );
        assert_eq!(
            InvalidFormatError::missing("is_top").to_string(),
            "Attribute is_top not found"
        );
    }

    #[test]
    fn wrong_type_message_for_is_top() {
        let err = InvalidFormatError::wrong_type("is_top", ValueKind::Bool);
        assert_eq!(err.to_string(), "'is_top' must have a bool value");
    }

    #[test]
    fn invalid_date_carries_literal() {
        let err = InvalidFormatError::invalid_date("2100-01-32T00:00:00");
        assert_eq!(err.to_string(), "invalid date format: 2100-01-32T00:00:00");
    }

    #[test]
    fn empty_stream_message() {
        assert_eq!(
            InvalidFormatError::EmptyStream.to_string(),
            "stream cannot be empty or None"
        );
    }

    #[test]
    fn invalid_json_is_prefixed() {
        let decode = serde_json::from_str::<serde_json::Value>("{\"a\": 1 \"b\": 2}")
            .unwrap_err();
        let err = InvalidFormatError::from(decode);
        assert!(err.to_string().starts_with("invalid json format. "));
        assert!(matches!(
            err,
            InvalidFormatError::InvalidJson { line: 1, .. }
        ));
    }

    #[test]
    fn attribute_accessor() {
        assert_eq!(InvalidFormatError::missing("uuid").attribute(), Some("uuid"));
        assert_eq!(InvalidFormatError::EmptyStream.attribute(), None);
        assert_eq!(InvalidFormatError::invalid_date("x").attribute(), None);
    }
}

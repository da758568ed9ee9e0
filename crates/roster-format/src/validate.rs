//! # Schema Validators
//!
//! Low-level checks shared by the document parser and the organizations
//! stream parser: stream admission, JSON decoding, required-key presence,
//! and type checks on decoded values.
//!
//! ## Trust Boundary
//!
//! These functions are the only place untrusted input is inspected. Each
//! one either returns a typed view of the value or an
//! [`InvalidFormatError`] naming the attribute that failed. Nothing is
//! coerced and no default is substituted for a required value.

use roster_core::{InvalidFormatError, Result, Timestamp, ValueKind};
use serde_json::{Map, Value};

/// A decoded JSON object.
pub type Object = Map<String, Value>;

/// Attribute name reported when the top-level value is not an object.
pub const DOCUMENT: &str = "document";

/// Admit a stream and decode it as JSON.
///
/// # Errors
///
/// - [`InvalidFormatError::EmptyStream`] when `stream` is `None` or `""`.
/// - [`InvalidFormatError::InvalidJson`] when the text is not well-formed JSON.
pub fn decode(stream: Option<&str>) -> Result<Value> {
    let text = match stream {
        Some(text) if !text.is_empty() => text,
        _ => return Err(InvalidFormatError::EmptyStream),
    };
    Ok(serde_json::from_str(text)?)
}

/// Admit a stream whose top-level value must be a JSON object.
pub fn decode_object(stream: Option<&str>) -> Result<Object> {
    match decode(stream)? {
        Value::Object(doc) => Ok(doc),
        _ => Err(InvalidFormatError::wrong_type(DOCUMENT, ValueKind::Object)),
    }
}

/// Fetch a required attribute.
pub fn require<'a>(obj: &'a Object, key: &str) -> Result<&'a Value> {
    obj.get(key).ok_or_else(|| InvalidFormatError::missing(key))
}

pub fn as_object<'a>(value: &'a Value, attribute: &str) -> Result<&'a Object> {
    value
        .as_object()
        .ok_or_else(|| InvalidFormatError::wrong_type(attribute, ValueKind::Object))
}

pub fn as_list<'a>(value: &'a Value, attribute: &str) -> Result<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| InvalidFormatError::wrong_type(attribute, ValueKind::List))
}

pub fn as_str<'a>(value: &'a Value, attribute: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| InvalidFormatError::wrong_type(attribute, ValueKind::String))
}

/// Only JSON booleans pass; `"yes"`, `1` and `null` are rejected.
pub fn as_bool(value: &Value, attribute: &str) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| InvalidFormatError::wrong_type(attribute, ValueKind::Bool))
}

pub fn require_str<'a>(obj: &'a Object, key: &str) -> Result<&'a str> {
    as_str(require(obj, key)?, key)
}

pub fn require_non_empty_str<'a>(obj: &'a Object, key: &str) -> Result<&'a str> {
    match require(obj, key)?.as_str() {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(InvalidFormatError::wrong_type(key, ValueKind::NonEmptyString)),
    }
}

pub fn require_bool(obj: &Object, key: &str) -> Result<bool> {
    as_bool(require(obj, key)?, key)
}

pub fn require_list<'a>(obj: &'a Object, key: &str) -> Result<&'a [Value]> {
    as_list(require(obj, key)?, key)
}

/// An optional string attribute: absent and `null` both mean `None`.
pub fn optional_str<'a>(obj: &'a Object, key: &str) -> Result<Option<&'a str>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => as_str(value, key).map(Some),
    }
}

/// A required `YYYY-MM-DDTHH:MM:SS` timestamp attribute.
pub fn require_timestamp(obj: &Object, key: &str) -> Result<Timestamp> {
    Timestamp::parse(require_str(obj, key)?)
}

//! Canonical wire strings for scalar values.
//!
//! - Strings: verbatim
//! - Integers and longs: base-10, optional leading `-`
//! - Booleans: lowercase `true` / `false`
//! - Timestamps: ISO 8601 UTC with milliseconds (`2006-02-03T16:45:09.000Z`)

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::descriptor::ScalarKind;
use crate::error::{CodecError, CodecResult};
use crate::value::{Scalar, Timestamp, Value};

/// `strftime` pattern used for every timestamp on the wire.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Render a scalar as its wire string.
#[must_use]
pub fn format_scalar(scalar: &Scalar) -> String {
    match scalar {
        Scalar::String(s) => s.clone(),
        Scalar::Integer(v) => v.to_string(),
        Scalar::Long(v) => v.to_string(),
        Scalar::Boolean(v) => v.to_string(),
        Scalar::Timestamp(ts) => format_timestamp(ts),
    }
}

/// Render a value that must be a scalar.
///
/// Only scalars have a single wire string; anything else is a caller error.
pub fn format_value(value: &Value) -> CodecResult<String> {
    match value {
        Value::Scalar(s) => Ok(format_scalar(s)),
        other => Err(CodecError::InvalidArgument(format!(
            "cannot format {} value as a scalar",
            other.kind_name()
        ))),
    }
}

/// Format a timestamp as ISO 8601 with milliseconds and `Z` suffix.
#[must_use]
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.as_datetime().format(TIMESTAMP_FORMAT).to_string()
}

/// Parse an ISO 8601 timestamp.
///
/// Accepts RFC 3339 with any offset, and the fixed wire format.
pub fn parse_timestamp(s: &str) -> Result<Timestamp, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| Timestamp::new(dt.with_timezone(&Utc)))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.fZ")
                .map(|ndt| Timestamp::new(ndt.and_utc()))
        })
}

/// Parse wire text into a scalar of the given kind.
///
/// On failure returns a description of the problem; callers attach the field.
pub fn parse_scalar(kind: ScalarKind, text: &str) -> Result<Scalar, String> {
    match kind {
        ScalarKind::String => Ok(Scalar::String(text.to_owned())),
        ScalarKind::Integer => text
            .trim()
            .parse::<i32>()
            .map(Scalar::Integer)
            .map_err(|e| e.to_string()),
        ScalarKind::Long => text
            .trim()
            .parse::<i64>()
            .map(Scalar::Long)
            .map_err(|e| e.to_string()),
        ScalarKind::Boolean => match text.trim() {
            "true" => Ok(Scalar::Boolean(true)),
            "false" => Ok(Scalar::Boolean(false)),
            _ => Err("expected 'true' or 'false'".to_owned()),
        },
        ScalarKind::Timestamp => parse_timestamp(text.trim())
            .map(Scalar::Timestamp)
            .map_err(|e| e.to_string()),
    }
}

//! Response fix-ups for the Graph API's non-conformant content types and error shapes.

// self
use crate::{
	_prelude::*,
	error::{ErrorEnvelope, RemoteApiError},
};

/// Content type the engine decodes as JSON.
pub const CONTENT_TYPE_JSON: &str = "application/json";
/// Content type the engine decodes as form pairs.
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Maps the Graph API's pseudo-JSONP and plain-text content types onto decodable ones.
///
/// Anything containing `javascript` becomes JSON, anything containing `plain` becomes
/// form-urlencoded, and everything else passes through untouched.
pub fn normalize_content_type(content_type: &str) -> String {
	if content_type.contains("javascript") {
		CONTENT_TYPE_JSON.to_owned()
	} else if content_type.contains("plain") {
		CONTENT_TYPE_FORM.to_owned()
	} else {
		content_type.to_owned()
	}
}

/// Extracts the `error` envelope, if the body carries a non-empty one.
pub fn error_envelope(body: &Value) -> Option<ErrorEnvelope> {
	let error = body.get("error").filter(|value| !is_empty_value(value))?;
	let envelope = match error {
		Value::Object(fields) => ErrorEnvelope {
			kind: fields.get("type").map(text).unwrap_or_default(),
			message: fields.get("message").map(text).unwrap_or_default(),
			code: fields.get("code").and_then(integer).unwrap_or_default(),
		},
		// RFC 6749 style `{"error": "invalid_grant", "error_description": "..."}`.
		other => ErrorEnvelope {
			kind: text(other),
			message: body.get("error_description").map(text).unwrap_or_default(),
			code: 0,
		},
	};

	Some(envelope)
}

/// Fails with [`RemoteApiError`] when the body carries a non-empty `error` key.
pub fn detect_error(body: &Value) -> Result<(), RemoteApiError> {
	match error_envelope(body) {
		Some(envelope) => Err(RemoteApiError { envelope, body: body.clone() }),
		None => Ok(()),
	}
}

/// Loose emptiness: `null`, `false`, `0`, `""`, `"0"`, `[]`, and `{}` are empty.
pub fn is_empty_value(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::Bool(flag) => !flag,
		Value::Number(n) => n.as_f64() == Some(0.0),
		Value::String(s) => s.is_empty() || s == "0",
		Value::Array(items) => items.is_empty(),
		Value::Object(fields) => fields.is_empty(),
	}
}

fn text(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

fn integer(value: &Value) -> Option<i64> {
	match value {
		Value::Number(n) => n.as_i64(),
		Value::String(s) => s.trim().parse().ok(),
		_ => None,
	}
}

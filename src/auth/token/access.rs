//! Access tokens decoded from token endpoint responses.

// self
use crate::{_prelude::*, auth::token::secret::Secret};

/// Errors produced while decoding an [`AccessToken`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum AccessTokenError {
	/// Issued when the payload has no `access_token`.
	#[error("Required option not passed: `access_token`.")]
	MissingAccessToken,
	/// Issued when `expires_in` is not a whole number of seconds.
	#[error("The expires_in value must be an integer.")]
	NonNumericExpiresIn,
	/// Issued when `expires` or `expires_in` cannot be represented as an instant.
	#[error("The expiry value exceeds the supported range.")]
	ExpiryOutOfRange,
	/// Issued when an expiry check runs against a token without one.
	#[error("The expires value is not set on the token.")]
	MissingExpiry,
}

/// Access token issued by the token endpoint.
///
/// Unknown response keys (such as `token_type`) are preserved in [`values`](Self::values).
#[derive(Clone, Serialize, Deserialize)]
pub struct AccessToken {
	/// Access token secret; callers must avoid logging it.
	pub access_token: Secret,
	/// Refresh token secret, if the provider issued one.
	pub refresh_token: Option<Secret>,
	/// Absolute expiry instant, when the provider supplied one.
	pub expires_at: Option<OffsetDateTime>,
	/// Identifier of the resource owner, when the token response carries it.
	pub resource_owner_id: Option<String>,
	/// Remaining response fields.
	pub values: Map<String, Value>,
}
impl AccessToken {
	/// Values of `expires` up to this instant are lifetimes rather than timestamps.
	const EXPIRATION_TIMESTAMP_FLOOR: i64 = 1_349_067_600;

	/// Wraps a bare token value without expiry or extra fields.
	pub fn new(token: impl Into<String>) -> Self {
		Self {
			access_token: Secret::new(token),
			refresh_token: None,
			expires_at: None,
			resource_owner_id: None,
			values: Map::new(),
		}
	}

	/// Decodes a token endpoint payload, resolving relative lifetimes against `now`.
	pub fn from_response(
		mut body: Map<String, Value>,
		now: OffsetDateTime,
	) -> Result<Self, AccessTokenError> {
		let access_token = body
			.remove("access_token")
			.as_ref()
			.and_then(scalar_to_string)
			.ok_or(AccessTokenError::MissingAccessToken)?;
		let resource_owner_id = body.remove("resource_owner_id").as_ref().and_then(scalar_to_string);
		let refresh_token =
			body.remove("refresh_token").as_ref().and_then(scalar_to_string).map(Secret::new);
		let expires_in = body.remove("expires_in");
		let expires = body.remove("expires");
		let expires_at = match (expires_in, expires) {
			(Some(lifetime), _) => {
				let secs = numeric_seconds(&lifetime).ok_or(AccessTokenError::NonNumericExpiresIn)?;

				if secs == 0 { None } else { Some(offset(now, secs)?) }
			},
			(None, Some(expires)) => match numeric_seconds(&expires) {
				Some(0) | None => None,
				Some(secs) if secs > Self::EXPIRATION_TIMESTAMP_FLOOR => Some(
					OffsetDateTime::from_unix_timestamp(secs)
						.map_err(|_| AccessTokenError::ExpiryOutOfRange)?,
				),
				Some(secs) => Some(offset(now, secs)?),
			},
			(None, None) => None,
		};

		Ok(Self {
			access_token: Secret::new(access_token),
			refresh_token,
			expires_at,
			resource_owner_id,
			values: body,
		})
	}

	/// Sets an absolute expiry instant.
	pub fn with_expires_at(mut self, instant: OffsetDateTime) -> Self {
		self.expires_at = Some(instant);

		self
	}

	/// Attaches a refresh token value.
	pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
		self.refresh_token = Some(Secret::new(token));

		self
	}

	/// Returns the raw token value. Callers must avoid logging this string.
	pub fn token(&self) -> &str {
		self.access_token.expose()
	}

	/// Returns `true` if the token carries an expiry that has passed at `instant`.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| instant >= expires_at)
	}

	/// Checks expiry against the current clock, failing when no expiry is known.
	pub fn has_expired(&self) -> Result<bool, AccessTokenError> {
		let expires_at = self.expires_at.ok_or(AccessTokenError::MissingExpiry)?;

		Ok(OffsetDateTime::now_utc() >= expires_at)
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("access_token", &"<redacted>")
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("expires_at", &self.expires_at)
			.field("resource_owner_id", &self.resource_owner_id)
			.field("values", &self.values)
			.finish()
	}
}

fn scalar_to_string(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		_ => None,
	}
}

fn numeric_seconds(value: &Value) -> Option<i64> {
	match value {
		Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_seconds)),
		Value::String(s) => {
			let trimmed = s.trim();

			trimmed.parse::<i64>().ok().or_else(|| trimmed.parse::<f64>().ok().and_then(whole_seconds))
		},
		_ => None,
	}
}

// Only integral values inside the `i64` range count as seconds.
fn whole_seconds(value: f64) -> Option<i64> {
	(value.is_finite()
		&& value.fract() == 0.0
		&& value >= i64::MIN as f64
		&& value < i64::MAX as f64)
		.then_some(value as i64)
}

fn offset(now: OffsetDateTime, secs: i64) -> Result<OffsetDateTime, AccessTokenError> {
	now.checked_add(Duration::seconds(secs)).ok_or(AccessTokenError::ExpiryOutOfRange)
}

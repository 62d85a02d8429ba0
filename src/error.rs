//! Crate-level error types shared across the provider, engine, and flows.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The Graph API answered with an `error` envelope.
	#[error(transparent)]
	Remote(#[from] RemoteApiError),
	/// Temporary upstream failure or an undecodable response.
	#[error(transparent)]
	Transient(#[from] TransientError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The provider categorically refuses the requested operation.
	#[error("Unsupported operation: {reason}.")]
	UnsupportedOperation {
		/// Provider-supplied reason string.
		reason: String,
	},
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Provider options failed validation.
	#[error(transparent)]
	InvalidProviderConfig(#[from] crate::provider::ProviderConfigError),
	/// An endpoint could not be derived from the configured hosts.
	#[error("Endpoint `{endpoint}` could not be built.")]
	InvalidEndpoint {
		/// Endpoint path relative to the host.
		endpoint: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Requested scopes cannot be normalized.
	#[error("Requested scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),

	/// No grant is registered under the requested name.
	#[error("Grant `{grant}` is not registered.")]
	UnknownGrant {
		/// Requested grant name.
		grant: String,
	},
	/// A grant-required request parameter was not supplied.
	#[error("Required parameter not passed: `{parameter}` (grant `{grant}`).")]
	MissingGrantParameter {
		/// Grant name.
		grant: String,
		/// Missing parameter key.
		parameter: String,
	},
	/// Token endpoint payload could not be turned into an access token.
	#[error("Unable to build access token.")]
	TokenResponse(#[from] crate::auth::AccessTokenError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Structured `error` object returned by the Graph API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
	/// Provider error class (for example `OAuthException`).
	#[serde(rename = "type")]
	pub kind: String,
	/// Human-readable message.
	pub message: String,
	/// Numeric provider error code.
	pub code: i64,
}
impl Display for ErrorEnvelope {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}: {}", self.kind, self.message)
	}
}

/// Failure reported by the Graph API inside a decoded response body.
#[derive(Clone, Debug, PartialEq, ThisError)]
#[error("{envelope}")]
pub struct RemoteApiError {
	/// Parsed `error` envelope.
	pub envelope: ErrorEnvelope,
	/// Full decoded response body.
	pub body: Value,
}
impl RemoteApiError {
	/// Numeric provider error code.
	pub fn code(&self) -> i64 {
		self.envelope.code
	}
}

/// Temporary failure variants (safe to retry).
#[derive(Debug, ThisError)]
pub enum TransientError {
	/// Endpoint returned an unexpected but non-fatal response.
	#[error("Graph API returned an unexpected response: {message}.")]
	UnexpectedResponse {
		/// Summary of the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Endpoint responded with malformed JSON that could not be parsed.
	#[error("Graph API returned malformed JSON.")]
	ResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the Graph API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the Graph API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

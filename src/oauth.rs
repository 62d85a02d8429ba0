//! Request engine shared by every network-facing client operation.
//!
//! The engine owns transport, body decoding, and error detection. Providers only
//! supply [`ProviderStrategy`] hooks, so the same engine drives token exchanges and
//! resource owner fetches.

pub use oauth2;

// crates.io
use oauth2::{
	AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
	http::{
		Method, Request,
		header::{ACCEPT, CONTENT_TYPE, HeaderValue},
	},
};
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	error::{ConfigError, TransientError, TransportError},
	http::{ApiHttpClient, ResponseMetadata, ResponseMetadataSlot},
	obs::FlowKind,
	provider::{CONTENT_TYPE_FORM, CONTENT_TYPE_JSON, ProviderStrategy, TokenRequest},
};

/// Maps HTTP transport failures into crate [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a crate error.
	fn map_transport_error(
		&self,
		flow: FlowKind,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<E>,
	) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		flow: FlowKind,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(flow, meta, *inner),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) => map_generic_transport_error(flow, meta, message),
			_ => map_generic_transport_error(flow, meta, "unknown failure"),
		}
	}
}

/// Transport + decoding pipeline driven by [`ProviderStrategy`] hooks.
pub(crate) struct GraphEngine<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	http_client: Arc<C>,
	error_mapper: Arc<M>,
}
impl<C, M> GraphEngine<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	pub(crate) fn new(http_client: impl Into<Arc<C>>, error_mapper: impl Into<Arc<M>>) -> Self {
		Self { http_client: http_client.into(), error_mapper: error_mapper.into() }
	}

	/// Posts a prepared token request and decodes the access token.
	pub(crate) async fn request_access_token<S>(
		&self,
		strategy: &S,
		request: &TokenRequest,
	) -> Result<AccessToken>
	where
		S: ?Sized + ProviderStrategy,
	{
		let url = strategy.token_url()?;
		let body = url::form_urlencoded::Serializer::new(String::new())
			.extend_pairs(&request.params)
			.finish();
		let http_request = Request::builder()
			.method(Method::POST)
			.uri(url.as_str())
			.header(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_FORM))
			.header(ACCEPT, HeaderValue::from_static(CONTENT_TYPE_JSON))
			.body(body.into_bytes())
			.map_err(ConfigError::from)?;
		let (body, meta) = self.dispatch(strategy, FlowKind::TokenExchange, http_request).await?;
		let fields = expect_object(body, meta.as_ref())?;

		Ok(AccessToken::from_response(fields, OffsetDateTime::now_utc()).map_err(ConfigError::from)?)
	}

	/// Fetches the signed `/me` payload and wraps it through the provider factory.
	pub(crate) async fn fetch_resource_owner<S>(
		&self,
		strategy: &S,
		token: &AccessToken,
	) -> Result<S::ResourceOwner>
	where
		S: ?Sized + ProviderStrategy,
	{
		let url = strategy.resource_owner_url(token)?;
		let http_request = Request::builder()
			.method(Method::GET)
			.uri(url.as_str())
			.header(ACCEPT, HeaderValue::from_static(CONTENT_TYPE_JSON))
			.body(Vec::new())
			.map_err(ConfigError::from)?;
		let (body, meta) = self.dispatch(strategy, FlowKind::ResourceOwner, http_request).await?;
		let fields = expect_object(body, meta.as_ref())?;

		Ok(strategy.create_resource_owner(fields, token))
	}

	async fn dispatch<S>(
		&self,
		strategy: &S,
		flow: FlowKind,
		request: HttpRequest,
	) -> Result<(Value, Option<ResponseMetadata>)>
	where
		S: ?Sized + ProviderStrategy,
	{
		let slot = ResponseMetadataSlot::default();
		let handle = self.http_client.with_metadata(slot.clone());
		let response = handle
			.call(request)
			.await
			.map_err(|err| self.error_mapper.map_transport_error(flow, slot.take().as_ref(), err))?;
		let meta = slot.take();
		let raw_type = joined_content_type(&response);
		let content_type = strategy.normalize_content_type(&raw_type);

		#[cfg(feature = "tracing")]
		if content_type != raw_type {
			tracing::debug!(flow = flow.as_str(), from = %raw_type, to = %content_type, "content type rewritten");
		}

		let status = response.status().as_u16();
		let body = decode_body(&content_type, status, response.body(), meta.as_ref())?;

		strategy.detect_error(&body)?;

		Ok((body, meta))
	}
}
impl<C, M> Clone for GraphEngine<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self { http_client: Arc::clone(&self.http_client), error_mapper: Arc::clone(&self.error_mapper) }
	}
}

fn joined_content_type(response: &HttpResponse) -> String {
	response
		.headers()
		.get_all(CONTENT_TYPE)
		.iter()
		.filter_map(|value| value.to_str().ok())
		.collect::<Vec<_>>()
		.join(";")
}

/// Decodes a body according to its (already normalized) content type.
///
/// Form bodies become objects of strings. Anything else is tried as JSON; when that fails
/// the raw text is kept unless the type claims JSON or the status is 500.
fn decode_body(
	content_type: &str,
	status: u16,
	bytes: &[u8],
	meta: Option<&ResponseMetadata>,
) -> Result<Value> {
	if content_type.contains("urlencoded") {
		let fields = url::form_urlencoded::parse(bytes)
			.into_owned()
			.map(|(key, value)| (key, Value::String(value)))
			.collect::<Map<_, _>>();

		return Ok(Value::Object(fields));
	}

	let mut deserializer = serde_json::Deserializer::from_slice(bytes);

	match serde_path_to_error::deserialize::<_, Value>(&mut deserializer) {
		Ok(value) => Ok(value),
		Err(source) if content_type.contains("json") =>
			Err(TransientError::ResponseParse { source, status: Some(status) }.into()),
		Err(_) if status == 500 => Err(TransientError::UnexpectedResponse {
			message: "server error without a JSON body".into(),
			status: Some(status),
			retry_after: meta_retry_after(meta),
		}
		.into()),
		Err(_) => Ok(Value::String(String::from_utf8_lossy(bytes).into_owned())),
	}
}

fn expect_object(body: Value, meta: Option<&ResponseMetadata>) -> Result<Map<String, Value>> {
	match body {
		Value::Object(fields) => Ok(fields),
		_ => Err(TransientError::UnexpectedResponse {
			message: "expected JSON".into(),
			status: meta_status(meta),
			retry_after: meta_retry_after(meta),
		}
		.into()),
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(flow: FlowKind, meta: Option<&ResponseMetadata>, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransientError::UnexpectedResponse {
			message: format!("request timed out during {flow}"),
			status: meta_status(meta).or_else(|| err.status().map(|code| code.as_u16())),
			retry_after: meta_retry_after(meta),
		}
		.into();
	}

	TransportError::from(err).into()
}

#[cfg(feature = "reqwest")]
fn map_generic_transport_error(
	flow: FlowKind,
	meta: Option<&ResponseMetadata>,
	message: impl Display,
) -> Error {
	TransientError::UnexpectedResponse {
		message: format!("HTTP client error during {flow}: {message}"),
		status: meta_status(meta),
		retry_after: meta_retry_after(meta),
	}
	.into()
}

fn meta_status(meta: Option<&ResponseMetadata>) -> Option<u16> {
	meta.and_then(|value| value.status)
}

fn meta_retry_after(meta: Option<&ResponseMetadata>) -> Option<Duration> {
	meta.and_then(|value| value.retry_after)
}

mod common;

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};
// crates.io
use time::Duration;
// self
use common::credentials;
use oauth2_benevaut::{
	auth::AccessToken,
	error::{Error, TransientError},
	flows::Client,
	http::{ApiHttpClient, ResponseMetadata, ResponseMetadataSlot},
	oauth::{
		TransportErrorMapper,
		oauth2::{
			AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
			http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
		},
	},
	obs::FlowKind,
	provider::{Benevaut, ProviderConfig},
};

#[derive(Debug)]
struct Throttled;
impl Display for Throttled {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Transport throttled.")
	}
}
impl StdError for Throttled {}

#[derive(Clone, Default)]
struct FakeHttpClient {
	calls: Arc<AtomicUsize>,
	throttle: bool,
}
impl ApiHttpClient for FakeHttpClient {
	type Handle = FakeHttpHandle;
	type TransportError = Throttled;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		FakeHttpHandle { slot, calls: Arc::clone(&self.calls), throttle: self.throttle }
	}
}

struct FakeHttpHandle {
	slot: ResponseMetadataSlot,
	calls: Arc<AtomicUsize>,
	throttle: bool,
}
impl<'a> AsyncHttpClient<'a> for FakeHttpHandle {
	type Error = HttpClientError<Throttled>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'a + Send + Sync>>;

	fn call(&'a self, request: HttpRequest) -> Self::Future {
		Box::pin(async move {
			self.calls.fetch_add(1, Ordering::SeqCst);
			self.slot.take();

			if self.throttle {
				self.slot.store(ResponseMetadata {
					status: Some(429),
					retry_after: Some(Duration::seconds(30)),
				});

				return Err(HttpClientError::Reqwest(Box::new(Throttled)));
			}

			self.slot.store(ResponseMetadata { status: Some(200), retry_after: None });

			let body = if request.uri().path().ends_with("/me") {
				r#"{"id":"7","name":"Fake"}"#
			} else {
				r#"{"access_token":"fake-token","expires_in":0}"#
			};
			let mut response = HttpResponse::new(body.as_bytes().to_vec());

			*response.status_mut() = StatusCode::OK;
			response
				.headers_mut()
				.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

			Ok(response)
		})
	}
}

#[derive(Default)]
struct FakeMapper;
impl TransportErrorMapper<Throttled> for FakeMapper {
	fn map_transport_error(
		&self,
		flow: FlowKind,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<Throttled>,
	) -> Error {
		TransientError::UnexpectedResponse {
			message: format!("{flow}: {error}"),
			status: metadata.and_then(|meta| meta.status),
			retry_after: metadata.and_then(|meta| meta.retry_after),
		}
		.into()
	}
}

fn client(http: FakeHttpClient) -> Client<FakeHttpClient, FakeMapper> {
	let config = ProviderConfig::builder()
		.graph_api_version("v2.8")
		.build()
		.expect("Provider config should build.");

	Client::with_http_client(Benevaut::new(credentials(), config), http, FakeMapper)
}

#[tokio::test]
async fn custom_transport_drives_token_and_profile_calls() {
	let http = FakeHttpClient::default();
	let client = client(http.clone());
	let token = client.exchange_code("code").await.expect("Fake exchange should succeed.");

	assert_eq!(token.token(), "fake-token");
	assert!(token.expires_at.is_none());

	let user = client.fetch_resource_owner(&token).await.expect("Fake profile should decode.");

	assert_eq!(user.id().as_deref(), Some("7"));
	assert_eq!(http.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn refresh_requests_never_reach_the_transport() {
	let http = FakeHttpClient::default();
	let client = client(http.clone());
	let err = client
		.request_token("refresh_token", [("refresh_token".to_owned(), "r".to_owned())].into())
		.await
		.expect_err("Refreshing must be refused.");

	assert!(matches!(err, Error::UnsupportedOperation { ref reason } if reason.contains("refresh")));
	assert_eq!(err.to_string(), "Unsupported operation: Benevaut does not support token refreshing.");

	let err = client
		.request_token(
			"authorization_code",
			[("code".to_owned(), "c".to_owned()), ("refresh_token".to_owned(), "r".to_owned())].into(),
		)
		.await
		.expect_err("A refresh_token parameter must be refused for any grant.");

	assert!(matches!(err, Error::UnsupportedOperation { .. }));
	assert_eq!(http.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn transport_errors_flow_through_the_mapper_with_metadata() {
	let http = FakeHttpClient { throttle: true, ..Default::default() };
	let client = client(http);
	let err = client
		.fetch_resource_owner(&AccessToken::new("token"))
		.await
		.expect_err("Throttled transports must fail.");

	match err {
		Error::Transient(TransientError::UnexpectedResponse { message, status, retry_after }) => {
			assert!(message.starts_with("resource_owner"));
			assert_eq!(status, Some(429));
			assert_eq!(retry_after, Some(Duration::seconds(30)));
		},
		other => panic!("Expected a transient error, got {other:?}."),
	}
}

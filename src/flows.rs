//! Network-facing operations built on the provider and the request engine.

mod resource_owner;
mod token_exchange;

// self
use crate::{
	_prelude::*,
	auth::ScopeSet,
	http::ApiHttpClient,
	oauth::{GraphEngine, TransportErrorMapper},
	obs::{FlowKind, FlowSpan},
	provider::Benevaut,
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestBenevautClient = Client<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Runs token exchanges and profile fetches against the Benevaut Graph API.
///
/// The client pairs an immutable [`Benevaut`] provider with a transport + error mapper.
/// It keeps no per-request state, so clones are cheap and can be shared across tasks.
pub struct Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	provider: Arc<Benevaut>,
	engine: GraphEngine<C, M>,
}
impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		provider: Benevaut,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self { provider: Arc::new(provider), engine: GraphEngine::new(http_client, mapper) }
	}

	/// Provider backing this client.
	pub fn provider(&self) -> &Benevaut {
		&self.provider
	}

	/// Builds the authorization dialog URL the user agent should be sent to.
	///
	/// `None` scopes select the provider defaults (`public_profile`, `email`).
	pub fn authorization_url(&self, scopes: Option<&ScopeSet>, state: Option<&str>) -> Result<Url> {
		let span = FlowSpan::start(FlowKind::Authorization, "authorization_url");
		let _guard = span.entered();

		span.finish(self.provider.authorization_request_url(scopes, state))
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(provider: Benevaut) -> Self {
		Self::with_http_client(
			provider,
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}
impl<C, M> Clone for Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self { provider: Arc::clone(&self.provider), engine: self.engine.clone() }
	}
}
impl<C, M> Debug for Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client").field("provider", &self.provider).finish()
	}
}

//! Token endpoint operations: authorization code exchange, arbitrary registered grants,
//! and the long-lived token swap.
//!
//! Every request passes through [`Benevaut::token_request`] first, so refresh attempts
//! and unknown grants fail before the transport is touched.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	flows::Client,
	http::ApiHttpClient,
	oauth::TransportErrorMapper,
	obs::{FlowKind, FlowSpan},
	provider::{AB_EXCHANGE_TOKEN, Grant, StaticGrant, TokenRequest},
};

impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Exchanges an authorization code returned to the redirect URI.
	pub async fn exchange_code(&self, code: &str) -> Result<AccessToken> {
		let request = self.provider.token_request(
			StaticGrant::AUTHORIZATION_CODE.name(),
			BTreeMap::from([("code".to_owned(), code.to_owned())]),
		);

		self.run_token_flow("exchange_code", request).await
	}

	/// Requests a token for any registered grant.
	///
	/// `params` are merged over the client defaults. Requests naming the `refresh_token`
	/// grant or carrying a `refresh_token` parameter are refused with
	/// [`Error::UnsupportedOperation`].
	pub async fn request_token(
		&self,
		grant: &str,
		params: BTreeMap<String, String>,
	) -> Result<AccessToken> {
		let request = self.provider.token_request(grant, params);

		self.run_token_flow("request_token", request).await
	}

	/// Swaps a short-lived access token for a long-lived one via `ab_exchange_token`.
	pub async fn exchange_long_lived_token(&self, short_lived_token: &str) -> Result<AccessToken> {
		let request = self.provider.long_lived_token_request(short_lived_token);

		self.run_token_flow(AB_EXCHANGE_TOKEN, request).await
	}

	async fn run_token_flow(
		&self,
		stage: &'static str,
		request: Result<TokenRequest>,
	) -> Result<AccessToken> {
		let span = FlowSpan::start(FlowKind::TokenExchange, stage);
		let result = span
			.instrument(async move {
				let request = request?;

				self.engine.request_access_token(self.provider.as_ref(), &request).await
			})
			.await;

		span.finish(result)
	}
}

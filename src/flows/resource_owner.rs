// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	flows::Client,
	http::ApiHttpClient,
	oauth::TransportErrorMapper,
	obs::{FlowKind, FlowSpan},
	owner::BenevautUser,
};

impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches the `/me` profile for `token`, signing the request with `appsecret_proof`.
	pub async fn fetch_resource_owner(&self, token: &AccessToken) -> Result<BenevautUser> {
		let span = FlowSpan::start(FlowKind::ResourceOwner, "fetch_resource_owner");
		let result = span
			.instrument(self.engine.fetch_resource_owner(self.provider.as_ref(), token))
			.await;

		span.finish(result)
	}
}

//! Provider strategy hooks consumed by the request engine.
//!
//! The engine owns transport and decoding. Providers plug their endpoints and response
//! fix-ups in through [`ProviderStrategy`].

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ScopeSet},
	error::RemoteApiError,
};

/// Strategy hooks a provider supplies to the generic engine.
///
/// Implementors are required to be `Send + Sync`. Only the endpoint builders, the
/// error detector, and the resource owner factory are mandatory. The remaining hooks
/// default to pass-through behavior.
pub trait ProviderStrategy: Send + Sync {
	/// Profile type produced by [`create_resource_owner`](Self::create_resource_owner).
	type ResourceOwner;

	/// Base authorization dialog URL (without query parameters).
	fn authorization_url(&self) -> Result<Url>;

	/// Token endpoint URL.
	fn token_url(&self) -> Result<Url>;

	/// Fully signed resource owner URL for `token`.
	fn resource_owner_url(&self, token: &AccessToken) -> Result<Url>;

	/// Scopes requested when the caller does not pick any.
	fn default_scopes(&self) -> ScopeSet {
		ScopeSet::default()
	}

	/// Separator used to join scopes in authorization URLs.
	fn scope_separator(&self) -> char {
		','
	}

	/// Runs before a token request is prepared; rejecting here prevents any network call.
	fn check_token_request(&self, _grant: &str, _params: &BTreeMap<String, String>) -> Result<()> {
		Ok(())
	}

	/// Rewrites the response content type before the engine picks a body decoder.
	fn normalize_content_type(&self, content_type: &str) -> String {
		content_type.to_owned()
	}

	/// Inspects every decoded body and reports provider errors.
	fn detect_error(&self, body: &Value) -> Result<(), RemoteApiError>;

	/// Wraps a decoded resource owner payload.
	fn create_resource_owner(
		&self,
		body: Map<String, Value>,
		token: &AccessToken,
	) -> Self::ResourceOwner;
}

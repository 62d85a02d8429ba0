//! Client credentials sent with every token request.

// self
use crate::{_prelude::*, auth::Secret};

/// OAuth client credentials registered with the provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Application secret; signs requests and authenticates token calls.
	pub client_secret: Secret,
	/// Redirect URI registered for the client.
	pub redirect_uri: Url,
}
impl Credentials {
	/// Bundles the three client values.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<Secret>,
		redirect_uri: Url,
	) -> Self {
		Self { client_id: client_id.into(), client_secret: client_secret.into(), redirect_uri }
	}

	/// Form parameters every token request starts from.
	pub fn token_request_defaults(&self) -> BTreeMap<String, String> {
		BTreeMap::from([
			("client_id".to_owned(), self.client_id.clone()),
			("client_secret".to_owned(), self.client_secret.expose().to_owned()),
			("redirect_uri".to_owned(), self.redirect_uri.to_string()),
		])
	}
}

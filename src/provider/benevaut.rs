//! The Benevaut provider and its `/me` request signing.

// std
use std::convert::Infallible;
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ScopeSet},
	error::{ConfigError, RemoteApiError},
	ext::{AppSecretProofSigner, RequestSignerExt},
	owner::BenevautUser,
	provider::{
		Credentials, ProviderStrategy,
		config::{ProviderConfig, ProviderOptions},
		grant::{AB_EXCHANGE_TOKEN, Grant, GrantRegistry, StaticGrant, TokenRequest},
		hosts::{HostPair, HostTier},
		response,
	},
};

/// Scopes requested when the caller does not pick any.
pub const DEFAULT_SCOPES: [&str; 2] = ["public_profile", "email"];

const REFRESH_TOKEN: &str = "refresh_token";

/// Benevaut Graph API provider.
///
/// Holds the client credentials and validated configuration; every operation is a pure
/// function of those two, so a single instance can be shared freely.
#[derive(Clone, Debug)]
pub struct Benevaut {
	credentials: Credentials,
	config: ProviderConfig,
	grants: GrantRegistry,
	signer: AppSecretProofSigner,
}
impl Benevaut {
	/// Creates a provider from credentials and an already validated configuration.
	pub fn new(credentials: Credentials, config: ProviderConfig) -> Self {
		let signer = AppSecretProofSigner::new(credentials.client_secret.clone());

		Self { credentials, config, grants: GrantRegistry::default(), signer }
	}

	/// Validates raw options and creates the provider.
	pub fn from_options(credentials: Credentials, options: ProviderOptions) -> Result<Self> {
		let config = ProviderConfig::from_options(options).map_err(ConfigError::from)?;

		Ok(Self::new(credentials, config))
	}

	/// Registers an additional grant (or replaces a built-in one).
	pub fn with_grant(mut self, grant: impl 'static + Grant) -> Self {
		self.grants = self.grants.register(grant);

		self
	}

	/// Client credentials used for token requests.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Grants accepted by [`token_request`](Self::token_request).
	pub fn grants(&self) -> &GrantRegistry {
		&self.grants
	}

	/// Validated configuration.
	pub fn config(&self) -> &ProviderConfig {
		&self.config
	}

	/// Host tier selected by the beta toggle.
	pub fn tier(&self) -> HostTier {
		HostTier::from_beta(self.config.beta_tier)
	}

	/// Authorization dialog URL carrying the standard query parameters.
	///
	/// `scopes` falls back to [`default_scopes`](ProviderStrategy::default_scopes). The
	/// `state` value is forwarded verbatim; generating and checking it is up to the caller.
	pub fn authorization_request_url(
		&self,
		scopes: Option<&ScopeSet>,
		state: Option<&str>,
	) -> Result<Url> {
		let mut url = self.authorization_url()?;
		let defaults = self.default_scopes();
		let scope = scopes.unwrap_or(&defaults).join(self.scope_separator());
		let mut pairs = url.query_pairs_mut();

		if let Some(state) = state {
			pairs.append_pair("state", state);
		}

		pairs.append_pair("scope", &scope);
		pairs.append_pair("response_type", "code");
		pairs.append_pair("approval_prompt", "auto");
		pairs.append_pair("redirect_uri", self.credentials.redirect_uri.as_str());
		pairs.append_pair("client_id", &self.credentials.client_id);

		drop(pairs);

		Ok(url)
	}

	/// Builds the token request for `grant`, refusing refresh flows up front.
	pub fn token_request(
		&self,
		grant: &str,
		params: BTreeMap<String, String>,
	) -> Result<TokenRequest> {
		self.check_token_request(grant, &params)?;

		let request = self
			.grants
			.get(grant)?
			.prepare_request(self.credentials.token_request_defaults(), params)?;

		Ok(request)
	}

	/// Builds the `ab_exchange_token` request swapping a short-lived token for a long-lived one.
	pub fn long_lived_token_request(&self, short_lived_token: &str) -> Result<TokenRequest> {
		self.token_request(
			StaticGrant::EXCHANGE_TOKEN.name(),
			BTreeMap::from([(AB_EXCHANGE_TOKEN.to_owned(), short_lived_token.to_owned())]),
		)
	}

	fn endpoint(&self, hosts: &HostPair, path: &str) -> Result<Url> {
		let path = format!("{}/{path}", self.config.graph_api_version);

		Ok(hosts.endpoint(self.tier(), &path)?)
	}
}
impl ProviderStrategy for Benevaut {
	type ResourceOwner = BenevautUser;

	fn authorization_url(&self) -> Result<Url> {
		self.endpoint(&self.config.hosts.dialog, "dialog/oauth")
	}

	fn token_url(&self) -> Result<Url> {
		self.endpoint(&self.config.hosts.graph, "oauth/access_token")
	}

	fn resource_owner_url(&self, token: &AccessToken) -> Result<Url> {
		let mut url = self.endpoint(&self.config.hosts.graph, "me")?;

		url.query_pairs_mut().append_pair("fields", &self.config.fields.join(","));

		let signed: Result<Url, Infallible> = self.signer.attach_token(url, token);

		Ok(signed.unwrap_or_else(|never| match never {}))
	}

	fn default_scopes(&self) -> ScopeSet {
		ScopeSet::new(DEFAULT_SCOPES).unwrap_or_default()
	}

	fn check_token_request(&self, grant: &str, params: &BTreeMap<String, String>) -> Result<()> {
		if grant == REFRESH_TOKEN || params.contains_key(REFRESH_TOKEN) {
			return Err(Error::UnsupportedOperation {
				reason: "Benevaut does not support token refreshing".into(),
			});
		}

		Ok(())
	}

	fn normalize_content_type(&self, content_type: &str) -> String {
		response::normalize_content_type(content_type)
	}

	fn detect_error(&self, body: &Value) -> Result<(), RemoteApiError> {
		response::detect_error(body)
	}

	fn create_resource_owner(&self, body: Map<String, Value>, _token: &AccessToken) -> BenevautUser {
		BenevautUser::new(body)
	}
}

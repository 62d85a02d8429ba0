//! Token grants and the registry that builds token requests from them.

// self
use crate::{_prelude::*, error::ConfigError};

/// Form parameter naming the grant.
pub const GRANT_TYPE_PARAM: &str = "grant_type";
/// Grant (and parameter) that exchanges a short-lived token for a long-lived one.
pub const AB_EXCHANGE_TOKEN: &str = "ab_exchange_token";

/// Parameter validation + request building strategy for one grant type.
///
/// Implementations are looked up by [`name`](Grant::name) at call time through a
/// [`GrantRegistry`]. Override [`prepare_request`](Grant::prepare_request) only when
/// the default merge is not enough.
pub trait Grant: Send + Sync + Debug {
	/// Identifier sent as `grant_type`.
	fn name(&self) -> &str;

	/// Parameters that must be present in the merged request.
	fn required_parameters(&self) -> &[&str];

	/// Merges `defaults`, `grant_type`, and caller `options` (later wins) and checks
	/// required parameters.
	fn prepare_request(
		&self,
		defaults: BTreeMap<String, String>,
		options: BTreeMap<String, String>,
	) -> Result<TokenRequest, ConfigError> {
		let mut params = defaults;

		params.insert(GRANT_TYPE_PARAM.into(), self.name().into());
		params.extend(options);

		for required in self.required_parameters() {
			if !params.contains_key(*required) {
				return Err(ConfigError::MissingGrantParameter {
					grant: self.name().into(),
					parameter: (*required).into(),
				});
			}
		}

		Ok(TokenRequest { grant: self.name().into(), params })
	}
}

/// Grant described entirely by its name and required parameter keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaticGrant {
	name: &'static str,
	required: &'static [&'static str],
}
impl StaticGrant {
	/// `authorization_code` grant.
	pub const AUTHORIZATION_CODE: Self = Self::new("authorization_code", &["code"]);
	/// `client_credentials` grant.
	pub const CLIENT_CREDENTIALS: Self = Self::new("client_credentials", &[]);
	/// Long-lived token exchange; the grant name doubles as its only parameter key.
	pub const EXCHANGE_TOKEN: Self = Self::new(AB_EXCHANGE_TOKEN, &[AB_EXCHANGE_TOKEN]);
	/// `password` grant.
	pub const PASSWORD: Self = Self::new("password", &["username", "password"]);

	/// Declares a grant with the given name and required parameters.
	pub const fn new(name: &'static str, required: &'static [&'static str]) -> Self {
		Self { name, required }
	}
}
impl Grant for StaticGrant {
	fn name(&self) -> &str {
		self.name
	}

	fn required_parameters(&self) -> &[&str] {
		self.required
	}
}
impl Display for StaticGrant {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.name)
	}
}

/// Prepared token endpoint request (form parameters, `grant_type` included).
#[derive(Clone, PartialEq, Eq)]
pub struct TokenRequest {
	/// Grant name the request was built for.
	pub grant: String,
	/// Form parameters to post.
	pub params: BTreeMap<String, String>,
}
impl Debug for TokenRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenRequest")
			.field("grant", &self.grant)
			.field("params", &self.params.keys().collect::<Vec<_>>())
			.finish()
	}
}

/// Grant name → strategy lookup table.
#[derive(Clone, Debug)]
pub struct GrantRegistry {
	grants: HashMap<String, Arc<dyn Grant>>,
}
impl GrantRegistry {
	/// Creates a registry without any grants.
	pub fn empty() -> Self {
		Self { grants: HashMap::new() }
	}

	/// Registers (or replaces) a grant under its own name.
	pub fn register(mut self, grant: impl 'static + Grant) -> Self {
		self.grants.insert(grant.name().to_owned(), Arc::new(grant));

		self
	}

	/// Looks up a grant by name.
	pub fn get(&self, name: &str) -> Result<&dyn Grant, ConfigError> {
		self.grants
			.get(name)
			.map(|grant| grant.as_ref())
			.ok_or_else(|| ConfigError::UnknownGrant { grant: name.to_owned() })
	}

	/// Returns true if a grant is registered under `name`.
	pub fn contains(&self, name: &str) -> bool {
		self.grants.contains_key(name)
	}
}
impl Default for GrantRegistry {
	fn default() -> Self {
		Self::empty()
			.register(StaticGrant::AUTHORIZATION_CODE)
			.register(StaticGrant::CLIENT_CREDENTIALS)
			.register(StaticGrant::PASSWORD)
			.register(StaticGrant::EXCHANGE_TOKEN)
	}
}

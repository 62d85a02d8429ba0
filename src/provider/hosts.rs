//! Dialog and graph host pairs for the production and beta tiers.

// self
use crate::{_prelude::*, error::ConfigError, provider::config::ProviderConfigError};

/// Production dialog host.
pub const DIALOG_HOST: &str = "https://api.benevaut.fr/";
/// Beta tier dialog host.
pub const DIALOG_HOST_BETA: &str = "https://beta.api.benevaut.fr/";
/// Production Graph API host.
pub const GRAPH_HOST: &str = "https://graph.benevaut.fr/";
/// Beta tier Graph API host.
pub const GRAPH_HOST_BETA: &str = "https://beta.graph.benevaut.fr/";

/// Deployment tier selected by the beta toggle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostTier {
	#[default]
	/// Production hosts.
	Production,
	/// Beta tier hosts.
	Beta,
}
impl HostTier {
	/// Maps the beta toggle onto a tier.
	pub fn from_beta(enabled: bool) -> Self {
		if enabled { Self::Beta } else { Self::Production }
	}
}

/// Production and beta variants of one host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostPair {
	/// Host used outside the beta tier.
	pub production: Url,
	/// Host used when the beta tier is enabled.
	pub beta: Url,
}
impl HostPair {
	/// Creates a pair from two base URLs.
	pub fn new(production: Url, beta: Url) -> Self {
		Self { production, beta }
	}

	/// Returns the host for the given tier.
	pub fn select(&self, tier: HostTier) -> &Url {
		match tier {
			HostTier::Production => &self.production,
			HostTier::Beta => &self.beta,
		}
	}

	/// Joins `{version}/{path}` onto the tier's host.
	pub fn endpoint(&self, tier: HostTier, path: &str) -> Result<Url, ConfigError> {
		self.select(tier)
			.join(path)
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: path.to_owned(), source })
	}

	fn validate(&self, name: &'static str) -> Result<(), ProviderConfigError> {
		for url in [&self.production, &self.beta] {
			if url.cannot_be_a_base() || !url.path().ends_with('/') {
				return Err(ProviderConfigError::InvalidHost { host: name, url: url.to_string() });
			}
		}

		Ok(())
	}

	fn from_static(production: &str, beta: &str) -> Self {
		// Constants above are well-formed absolute URLs.
		let parse = |raw: &str| Url::parse(raw).unwrap_or_else(|_| unreachable!());

		Self::new(parse(production), parse(beta))
	}
}

/// The two independent host pairs: one for authorization dialogs, one for Graph API calls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderHosts {
	/// Hosts serving `/dialog/oauth`.
	pub dialog: HostPair,
	/// Hosts serving `/oauth/access_token` and `/me`.
	pub graph: HostPair,
}
impl ProviderHosts {
	pub(crate) fn validate(&self) -> Result<(), ProviderConfigError> {
		self.dialog.validate("dialog")?;
		self.graph.validate("graph")
	}
}
impl Default for ProviderHosts {
	fn default() -> Self {
		Self {
			dialog: HostPair::from_static(DIALOG_HOST, DIALOG_HOST_BETA),
			graph: HostPair::from_static(GRAPH_HOST, GRAPH_HOST_BETA),
		}
	}
}

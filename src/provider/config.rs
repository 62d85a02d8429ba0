//! Validated provider settings and the Graph API version type.

// std
use std::{cmp::Ordering, sync::LazyLock};
// crates.io
use regex::Regex;
// self
use crate::{_prelude::*, provider::hosts::ProviderHosts};

static GRAPH_API_VERSION: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^v([0-9]+)\.([0-9]+)$").expect("Graph API version pattern must compile.")
});

/// Fields requested from `/me` when the caller does not provide a list.
pub const DEFAULT_FIELDS: [&str; 9] = [
	"id",
	"name",
	"first_name",
	"last_name",
	"email",
	"hometown",
	"picture.type(large){url,is_silhouette}",
	"gender",
	"age_range",
];

/// First Graph API version (`major`, `minor`) that dropped the `bio` field.
pub const BIO_REMOVED_IN: (u64, u64) = (2, 8);

/// Errors raised while validating provider options.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ProviderConfigError {
	/// `graphApiVersion` was not supplied.
	#[error("The `graphApiVersion` option is not set; a default Graph API version is required.")]
	MissingGraphApiVersion,
	/// `graphApiVersion` does not look like `v<major>.<minor>`.
	#[error(
		"The `graphApiVersion` must start with the letter `v` followed by a version number (e.g. `v2.4`), got `{value}`."
	)]
	InvalidGraphApiVersion {
		/// Rejected input.
		value: String,
	},
	/// A host override is not usable as a base URL.
	#[error("The {host} host cannot be used as a base URL: {url}.")]
	InvalidHost {
		/// Which host failed validation.
		host: &'static str,
		/// Host URL that failed validation.
		url: String,
	},
}

/// Validated Graph API version (`v<major>.<minor>`).
///
/// The configured spelling is kept verbatim for endpoint paths. The numeric components
/// only drive version comparisons and saturate at [`u64::MAX`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GraphApiVersion {
	raw: String,
	major: u64,
	minor: u64,
}
impl GraphApiVersion {
	/// Parses and validates a `v<major>.<minor>` string.
	pub fn parse(value: &str) -> Result<Self, ProviderConfigError> {
		let captures = GRAPH_API_VERSION
			.captures(value)
			.ok_or_else(|| ProviderConfigError::InvalidGraphApiVersion { value: value.to_owned() })?;
		let component = |index: usize| captures[index].parse::<u64>().unwrap_or(u64::MAX);

		Ok(Self { raw: value.to_owned(), major: component(1), minor: component(2) })
	}

	/// Version exactly as configured.
	pub fn as_str(&self) -> &str {
		&self.raw
	}

	/// Major component.
	pub fn major(&self) -> u64 {
		self.major
	}

	/// Minor component.
	pub fn minor(&self) -> u64 {
		self.minor
	}
}
impl PartialOrd for GraphApiVersion {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}
impl Ord for GraphApiVersion {
	fn cmp(&self, other: &Self) -> Ordering {
		(self.major, self.minor, &self.raw).cmp(&(other.major, other.minor, &other.raw))
	}
}
impl Display for GraphApiVersion {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.raw)
	}
}
impl FromStr for GraphApiVersion {
	type Err = ProviderConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}
impl Serialize for GraphApiVersion {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.collect_str(self)
	}
}
impl<'de> Deserialize<'de> for GraphApiVersion {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let raw = String::deserialize(deserializer)?;

		Self::parse(&raw).map_err(serde::de::Error::custom)
	}
}

/// Fields that older Graph API versions still expose and the default list should request.
pub fn legacy_fields_for(version: &GraphApiVersion) -> Vec<String> {
	if (version.major(), version.minor()) < BIO_REMOVED_IN { vec!["bio".to_owned()] } else { Vec::new() }
}

/// Default `/me` field list for a Graph API version.
pub fn default_fields_for(version: &GraphApiVersion) -> Vec<String> {
	DEFAULT_FIELDS.iter().map(|field| (*field).to_owned()).chain(legacy_fields_for(version)).collect()
}

/// Raw provider options, as they appear in configuration files.
///
/// Keys use the provider's camelCase spelling (`graphApiVersion`, `enableBetaTier`,
/// `fields`). Convert with [`ProviderConfig::from_options`] to validate them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderOptions {
	/// Graph API version (`v<major>.<minor>`); required.
	pub graph_api_version: Option<String>,
	/// Routes every call to the beta tier hosts.
	pub enable_beta_tier: bool,
	/// Fields requested from `/me`; empty or absent selects the defaults.
	pub fields: Option<Vec<String>>,
}

/// Immutable, validated provider configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProviderConfig {
	/// Graph API version prefixed to every endpoint path.
	pub graph_api_version: GraphApiVersion,
	/// Whether the beta tier hosts are used.
	pub beta_tier: bool,
	/// Ordered field list requested from `/me`.
	pub fields: Vec<String>,
	/// Host pairs the endpoints are derived from.
	pub hosts: ProviderHosts,
}
impl ProviderConfig {
	/// Creates a builder with production hosts and default fields.
	pub fn builder() -> ProviderConfigBuilder {
		ProviderConfigBuilder::default()
	}

	/// Validates raw options.
	pub fn from_options(options: ProviderOptions) -> Result<Self, ProviderConfigError> {
		let mut builder = Self::builder().enable_beta_tier(options.enable_beta_tier);

		if let Some(version) = options.graph_api_version {
			builder = builder.graph_api_version(version);
		}
		if let Some(fields) = options.fields {
			builder = builder.fields(fields);
		}

		builder.build()
	}
}
impl TryFrom<ProviderOptions> for ProviderConfig {
	type Error = ProviderConfigError;

	fn try_from(options: ProviderOptions) -> Result<Self, Self::Error> {
		Self::from_options(options)
	}
}

/// Builder for [`ProviderConfig`] values.
#[derive(Clone, Debug, Default)]
pub struct ProviderConfigBuilder {
	/// Unvalidated Graph API version.
	pub graph_api_version: Option<String>,
	/// Beta tier toggle.
	pub beta_tier: bool,
	/// Caller-supplied `/me` fields.
	pub fields: Option<Vec<String>>,
	/// Host overrides.
	pub hosts: Option<ProviderHosts>,
}
impl ProviderConfigBuilder {
	/// Sets the Graph API version.
	pub fn graph_api_version(mut self, version: impl Into<String>) -> Self {
		self.graph_api_version = Some(version.into());

		self
	}

	/// Toggles the beta tier hosts.
	pub fn enable_beta_tier(mut self, enabled: bool) -> Self {
		self.beta_tier = enabled;

		self
	}

	/// Overrides the `/me` field list.
	pub fn fields<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.fields = Some(fields.into_iter().map(Into::into).collect());

		self
	}

	/// Overrides the dialog and graph hosts.
	pub fn hosts(mut self, hosts: ProviderHosts) -> Self {
		self.hosts = Some(hosts);

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ProviderConfig, ProviderConfigError> {
		let raw = self
			.graph_api_version
			.filter(|value| !value.is_empty())
			.ok_or(ProviderConfigError::MissingGraphApiVersion)?;
		let graph_api_version = GraphApiVersion::parse(&raw)?;
		let fields = match self.fields {
			Some(fields) if !fields.is_empty() => fields,
			_ => default_fields_for(&graph_api_version),
		};
		let hosts = self.hosts.unwrap_or_default();

		hosts.validate()?;

		Ok(ProviderConfig { graph_api_version, beta_tier: self.beta_tier, fields, hosts })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn versions_parse_and_compare_numerically() {
		let v2_8 = GraphApiVersion::parse("v2.8").expect("v2.8 should parse.");
		let v2_10 = GraphApiVersion::parse("v2.10").expect("v2.10 should parse.");
		let v10_0 = GraphApiVersion::parse("v10.0").expect("v10.0 should parse.");

		assert!(v2_8 < v2_10);
		assert!(v2_10 < v10_0);
		assert_eq!(v2_10.to_string(), "v2.10");
		assert_eq!((v10_0.major(), v10_0.minor()), (10, 0));
	}

	#[test]
	fn versions_keep_their_configured_spelling() {
		let padded = GraphApiVersion::parse("v2.08").expect("v2.08 should parse.");

		assert_eq!(padded.to_string(), "v2.08");
		assert_eq!(padded.as_str(), "v2.08");
		assert_eq!((padded.major(), padded.minor()), (2, 8));
		assert!(legacy_fields_for(&padded).is_empty());

		let huge = GraphApiVersion::parse("v4294967296.0").expect("Oversized versions should parse.");

		assert_eq!(huge.major(), 4_294_967_296);
		assert_eq!(huge.to_string(), "v4294967296.0");

		let overflowing = GraphApiVersion::parse("v99999999999999999999999.1")
			.expect("Versions beyond u64 should still parse.");

		assert_eq!(overflowing.major(), u64::MAX);
		assert!(huge < overflowing);
	}

	#[test]
	fn malformed_versions_are_rejected() {
		for value in ["2.8", "v2", "v2.8.1", "V2.8", "v2.x", " v2.8", "vv2.8", "v\u{0662}.8", ""] {
			assert_eq!(
				GraphApiVersion::parse(value),
				Err(ProviderConfigError::InvalidGraphApiVersion { value: value.into() }),
				"`{value}` must be rejected."
			);
		}
	}

	#[test]
	fn legacy_fields_only_before_2_8() {
		let version = |raw: &str| GraphApiVersion::parse(raw).expect("Fixture should parse.");

		assert_eq!(legacy_fields_for(&version("v2.7")), vec!["bio".to_owned()]);
		assert_eq!(legacy_fields_for(&version("v1.0")), vec!["bio".to_owned()]);
		assert!(legacy_fields_for(&version("v2.8")).is_empty());
		assert!(legacy_fields_for(&version("v2.10")).is_empty());
		assert!(legacy_fields_for(&version("v3.0")).is_empty());
	}

	#[test]
	fn builder_requires_version() {
		assert_eq!(
			ProviderConfig::builder().build(),
			Err(ProviderConfigError::MissingGraphApiVersion)
		);
		assert_eq!(
			ProviderConfig::builder().graph_api_version("").build(),
			Err(ProviderConfigError::MissingGraphApiVersion)
		);
	}

	#[test]
	fn empty_field_override_falls_back_to_defaults() {
		let config = ProviderConfig::builder()
			.graph_api_version("v2.7")
			.fields(Vec::<String>::new())
			.build()
			.expect("Config should build.");

		assert_eq!(config.fields.len(), DEFAULT_FIELDS.len() + 1);
		assert_eq!(config.fields.last().map(String::as_str), Some("bio"));

		let config = ProviderConfig::builder()
			.graph_api_version("v2.7")
			.fields(["id", "email"])
			.build()
			.expect("Config should build.");

		assert_eq!(config.fields, vec!["id".to_owned(), "email".to_owned()]);
	}
}

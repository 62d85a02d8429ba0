mod common;

// crates.io
use serde_json::json;
// self
use common::{CLIENT_ID, credentials};
use oauth2_benevaut::{
	auth::ScopeSet,
	error::{ConfigError, Error},
	provider::{
		Benevaut, DEFAULT_FIELDS, ProviderConfig, ProviderConfigError, ProviderOptions,
		ProviderStrategy,
	},
};

fn options(value: serde_json::Value) -> ProviderOptions {
	serde_json::from_value(value).expect("Options should deserialize.")
}

#[test]
fn camel_case_options_match_the_builder() {
	let from_options = ProviderConfig::try_from(options(json!({
		"graphApiVersion": "v2.7",
		"enableBetaTier": true,
		"fields": ["id", "email"]
	})))
	.expect("Options should validate.");
	let from_builder = ProviderConfig::builder()
		.graph_api_version("v2.7")
		.enable_beta_tier(true)
		.fields(["id", "email"])
		.build()
		.expect("Builder should validate.");

	assert_eq!(from_options, from_builder);
	assert_eq!(from_options.graph_api_version.to_string(), "v2.7");
	assert!(from_options.beta_tier);
}

#[test]
fn missing_and_malformed_versions_are_configuration_errors() {
	let err = Benevaut::from_options(credentials(), options(json!({})))
		.expect_err("A missing version must be rejected.");

	assert!(matches!(
		err,
		Error::Config(ConfigError::InvalidProviderConfig(ProviderConfigError::MissingGraphApiVersion))
	));

	let err = Benevaut::from_options(credentials(), options(json!({ "graphApiVersion": "2.8" })))
		.expect_err("A version without the `v` prefix must be rejected.");

	assert!(matches!(
		err,
		Error::Config(ConfigError::InvalidProviderConfig(
			ProviderConfigError::InvalidGraphApiVersion { ref value }
		)) if value == "2.8"
	));
	assert!(err.to_string().contains("v2.4"));
}

#[test]
fn default_fields_depend_on_version() {
	let legacy = Benevaut::from_options(credentials(), options(json!({ "graphApiVersion": "v2.7" })))
		.expect("v2.7 should validate.");
	let current =
		Benevaut::from_options(credentials(), options(json!({ "graphApiVersion": "v2.10" })))
			.expect("v2.10 should validate.");

	assert_eq!(legacy.config().fields.len(), DEFAULT_FIELDS.len() + 1);
	assert!(legacy.config().fields.iter().any(|field| field == "bio"));
	assert_eq!(current.config().fields, DEFAULT_FIELDS.map(String::from).to_vec());
}

#[test]
fn configured_versions_reach_endpoints_verbatim() {
	let padded =
		Benevaut::from_options(credentials(), options(json!({ "graphApiVersion": "v2.08" })))
			.expect("Zero-padded versions should validate.");

	assert_eq!(
		padded.authorization_url().expect("URL should build.").as_str(),
		"https://api.benevaut.fr/v2.08/dialog/oauth"
	);
	assert!(!padded.config().fields.iter().any(|field| field == "bio"));

	let huge = Benevaut::from_options(
		credentials(),
		options(json!({ "graphApiVersion": "v4294967296.0" })),
	)
	.expect("Versions past u32 should validate.");

	assert_eq!(
		huge.token_url().expect("URL should build.").as_str(),
		"https://graph.benevaut.fr/v4294967296.0/oauth/access_token"
	);
	assert_eq!(
		serde_json::to_value(&huge.config().graph_api_version).expect("Version should serialize."),
		json!("v4294967296.0")
	);
}

#[test]
fn beta_tier_switches_every_host() {
	let provider = Benevaut::from_options(
		credentials(),
		options(json!({ "graphApiVersion": "v2.8", "enableBetaTier": true })),
	)
	.expect("Beta options should validate.");

	assert_eq!(
		provider.authorization_url().expect("URL should build.").as_str(),
		"https://beta.api.benevaut.fr/v2.8/dialog/oauth"
	);
	assert_eq!(
		provider.token_url().expect("URL should build.").as_str(),
		"https://beta.graph.benevaut.fr/v2.8/oauth/access_token"
	);
}

#[test]
fn authorization_url_honours_requested_scopes() {
	let provider =
		Benevaut::from_options(credentials(), options(json!({ "graphApiVersion": "v2.8" })))
			.expect("Options should validate.");
	let scopes = ScopeSet::new(["user_friends", "email"]).expect("Scopes should be valid.");
	let url = provider
		.authorization_request_url(Some(&scopes), None)
		.expect("Authorization URL should build.");
	let query = url.query_pairs().into_owned().collect::<Vec<_>>();

	assert!(query.contains(&("scope".into(), "email,user_friends".into())));
	assert!(query.contains(&("client_id".into(), CLIENT_ID.into())));
	assert!(!query.iter().any(|(key, _)| key == "state"));
}

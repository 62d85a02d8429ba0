#![allow(dead_code)]

// crates.io
use httpmock::MockServer;
// self
use oauth2_benevaut::{
	flows::{Client, ReqwestBenevautClient},
	provider::{Benevaut, Credentials, HostPair, ProviderConfig, ProviderHosts},
	url::Url,
};

pub const CLIENT_ID: &str = "benevaut-client";
pub const CLIENT_SECRET: &str = "client-secret";
pub const REDIRECT_URI: &str = "https://app.example.com/callback";

pub fn url(raw: &str) -> Url {
	Url::parse(raw).expect("Test URL should parse.")
}

pub fn credentials() -> Credentials {
	Credentials::new(CLIENT_ID, CLIENT_SECRET, url(REDIRECT_URI))
}

/// Routes production hosts to `/` and beta hosts to `/beta/` on the mock server.
pub fn mock_hosts(server: &MockServer) -> ProviderHosts {
	let pair = || HostPair::new(url(&server.url("/")), url(&server.url("/beta/")));

	ProviderHosts { dialog: pair(), graph: pair() }
}

pub fn mock_provider(server: &MockServer, version: &str, beta: bool) -> Benevaut {
	let config = ProviderConfig::builder()
		.graph_api_version(version)
		.enable_beta_tier(beta)
		.hosts(mock_hosts(server))
		.build()
		.expect("Mock provider config should build.");

	Benevaut::new(credentials(), config)
}

pub fn mock_client(server: &MockServer, version: &str, beta: bool) -> ReqwestBenevautClient {
	Client::new(mock_provider(server, version, beta))
}

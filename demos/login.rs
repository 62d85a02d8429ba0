//! Walks through the Benevaut login: print the dialog URL, exchange the returned code,
//! upgrade to a long-lived token, then fetch the signed `/me` profile.
//!
//! ```sh
//! BENEVAUT_CLIENT_ID=... BENEVAUT_CLIENT_SECRET=... cargo run --example login
//! BENEVAUT_CLIENT_ID=... BENEVAUT_CLIENT_SECRET=... BENEVAUT_CODE=... cargo run --example login
//! ```

// std
use std::env;
// crates.io
use color_eyre::{Result, eyre::WrapErr};
use serde_json::json;
use url::Url;
// self
use oauth2_benevaut::{
	flows::ReqwestBenevautClient,
	provider::{Benevaut, Credentials, ProviderOptions},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let credentials = Credentials::new(
		env::var("BENEVAUT_CLIENT_ID").wrap_err("BENEVAUT_CLIENT_ID is not set.")?,
		env::var("BENEVAUT_CLIENT_SECRET").wrap_err("BENEVAUT_CLIENT_SECRET is not set.")?,
		Url::parse("https://app.example.com/oauth/callback")?,
	);
	let options: ProviderOptions = serde_json::from_value(json!({
		"graphApiVersion": "v2.8",
		"enableBetaTier": env::var("BENEVAUT_BETA").is_ok(),
	}))?;
	let client = ReqwestBenevautClient::new(Benevaut::from_options(credentials, options)?);

	println!("Send your user to {}.", client.authorization_url(None, Some("demo-state"))?);

	let Ok(code) = env::var("BENEVAUT_CODE") else {
		println!("Set BENEVAUT_CODE to the `code` returned to the callback to continue.");

		return Ok(());
	};
	let short_lived = client.exchange_code(&code).await?;
	let long_lived = client.exchange_long_lived_token(short_lived.token()).await?;

	println!("Long-lived token expires at {:?}.", long_lived.expires_at);

	let user = client.fetch_resource_owner(&long_lived).await?;

	println!("Signed in as {} ({}).", user.name().unwrap_or("<unknown>"), user.id().unwrap_or_default());
	println!("{}", serde_json::to_string_pretty(&user)?);

	Ok(())
}

//! Request signing contracts that attach access tokens and their `appsecret_proof` to
//! outbound Graph API requests.

// std
use std::convert::Infallible;
// self
use crate::{
	_prelude::*,
	auth::{APPSECRET_PROOF_PARAM, AccessToken, AppSecretProof, Secret},
};

/// Query parameter carrying the access token on Graph API requests.
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Describes how to attach an [`AccessToken`] to an outbound request without
/// constraining the HTTP client type.
pub trait RequestSignerExt<Request, Error>
where
	Self: Send + Sync,
{
	/// Consumes the provided request and injects the token plus whatever proof the
	/// provider requires.
	fn attach_token(&self, request: Request, token: &AccessToken) -> Result<Request, Error>;
}

/// Signer that appends `access_token` and a freshly computed `appsecret_proof`.
#[derive(Clone, Debug)]
pub struct AppSecretProofSigner {
	app_secret: Secret,
}
impl AppSecretProofSigner {
	/// Creates a signer keyed by the application secret.
	pub fn new(app_secret: impl Into<Secret>) -> Self {
		Self { app_secret: app_secret.into() }
	}

	/// Computes the proof for `token`; never cached, since it is bound to the token.
	pub fn proof(&self, token: &AccessToken) -> String {
		AppSecretProof::create(self.app_secret.expose(), token.token())
	}
}
impl RequestSignerExt<Url, Infallible> for AppSecretProofSigner {
	fn attach_token(&self, mut request: Url, token: &AccessToken) -> Result<Url, Infallible> {
		request
			.query_pairs_mut()
			.append_pair(ACCESS_TOKEN_PARAM, token.token())
			.append_pair(APPSECRET_PROOF_PARAM, &self.proof(token));

		Ok(request)
	}
}
#[cfg(feature = "reqwest")]
impl RequestSignerExt<reqwest::RequestBuilder, Infallible> for AppSecretProofSigner {
	fn attach_token(
		&self,
		request: reqwest::RequestBuilder,
		token: &AccessToken,
	) -> Result<reqwest::RequestBuilder, Infallible> {
		let proof = self.proof(token);

		Ok(request.query(&[(ACCESS_TOKEN_PARAM, token.token()), (APPSECRET_PROOF_PARAM, &proof)]))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn pairs(url: &Url) -> HashMap<String, String> {
		url.query_pairs().into_owned().collect()
	}

	#[test]
	fn url_signing_appends_token_and_proof() {
		let signer = AppSecretProofSigner::new("secret");
		let base = Url::parse("https://graph.benevaut.fr/v2.8/me/friends?limit=5")
			.expect("Fixture URL should parse.");
		let Ok(signed) = signer.attach_token(base, &AccessToken::new("token"));
		let query = pairs(&signed);

		assert_eq!(query.get("limit").map(String::as_str), Some("5"));
		assert_eq!(query.get(ACCESS_TOKEN_PARAM).map(String::as_str), Some("token"));
		assert_eq!(
			query.get(APPSECRET_PROOF_PARAM).map(String::as_str),
			Some("e941110e3d2bfe82621f0e3e1434730d7305d106c5f68c87165d0b27a4611a4a")
		);
	}

	#[test]
	fn proof_tracks_the_token() {
		let signer = AppSecretProofSigner::new("secret");

		assert_eq!(signer.proof(&AccessToken::new("a")), signer.proof(&AccessToken::new("a")));
		assert_ne!(signer.proof(&AccessToken::new("a")), signer.proof(&AccessToken::new("b")));
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn reqwest_builders_are_signed() {
		let signer = AppSecretProofSigner::new("secret");
		let builder = ReqwestClient::new().get("https://graph.benevaut.fr/v2.8/me");
		let Ok(builder) = signer.attach_token(builder, &AccessToken::new("token"));
		let request = builder.build().expect("Signed request should build.");
		let query = pairs(request.url());

		assert_eq!(query.get(ACCESS_TOKEN_PARAM).map(String::as_str), Some("token"));
		assert!(query.contains_key(APPSECRET_PROOF_PARAM));
	}
}

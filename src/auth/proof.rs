//! `appsecret_proof` signatures binding an access token to the application secret.

// crates.io
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Query parameter carrying the proof on Graph API requests.
pub const APPSECRET_PROOF_PARAM: &str = "appsecret_proof";

/// Request signature proving possession of the app secret without sending it.
///
/// The Graph API recomputes the HMAC on its side, so the proof must be derived from
/// the exact token string attached to the same request.
#[derive(Clone, Copy, Debug)]
pub struct AppSecretProof;
impl AppSecretProof {
	/// Computes the lowercase hex HMAC-SHA256 of `access_token` keyed by `app_secret`.
	pub fn create(app_secret: &str, access_token: &str) -> String {
		// HMAC accepts keys of any length.
		let mut mac = <HmacSha256 as Mac>::new_from_slice(app_secret.as_bytes())
			.unwrap_or_else(|_| unreachable!());

		mac.update(access_token.as_bytes());

		hex::encode(mac.finalize().into_bytes())
	}
}

//! Public extension contracts for signing Graph API requests.
//!
//! The crate signs its own `/me` calls; [`AppSecretProofSigner`] exposes the same
//! signing step so callers can attach `access_token` + `appsecret_proof` to any other
//! Graph request they build.

pub mod request_signer;

pub use request_signer::*;

//! Auth-domain models: scopes, access tokens, secrets, and the `appsecret_proof` signature.

pub mod proof;
pub mod scope;
pub mod token;

pub use proof::*;
pub use scope::*;
pub use token::{access::*, secret::*};

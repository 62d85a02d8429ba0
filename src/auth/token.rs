//! Access token model and redacting secret wrapper.

pub mod access;
pub mod secret;

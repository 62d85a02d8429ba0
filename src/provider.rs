//! Provider configuration (data) and strategies (behavior).
//!
//! `config` and `hosts` validate the Graph API settings and host pairs. `grant` holds the name → strategy registry used to build token requests, and
//! `response` carries the Graph API's content type and error envelope fix-ups.
//! [`Benevaut`] ties these together and implements [`ProviderStrategy`], the hook
//! set consumed by the request engine.

pub mod benevaut;
pub mod config;
pub mod credentials;
pub mod grant;
pub mod hosts;
pub mod response;
pub mod strategy;

pub use benevaut::*;
pub use config::*;
pub use credentials::*;
pub use grant::*;
pub use hosts::*;
pub use response::*;
pub use strategy::*;

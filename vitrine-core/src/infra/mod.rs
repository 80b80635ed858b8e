//! Infrastructure: the HTTP binding and client configuration.

pub mod config;
pub mod http;

pub use http::{HTTP_TARGET, HttpEndpoint};

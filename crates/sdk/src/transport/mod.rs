//! Transport layer for the community SDK.

pub mod http;

pub use http::HttpTransport;

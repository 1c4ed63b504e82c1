//! Adapter implementations for board client ports.

pub mod http;

pub use http::HttpTaskApi;

//! Utility modules shared by the API client and the binary.
//!
//! - [`HttpClient`]: pooled reqwest client carrying the crate user agent

mod http;

pub use http::{HttpClient, DEFAULT_USER_AGENT};

//! HTTP client module
//!
//! Transport boundary of the connector: one `reqwest::Client` per process,
//! the bearer credential attached to each request, and a uniform failure for
//! any non-success status.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub(crate) use client::endpoint_of;
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;

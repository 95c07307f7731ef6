// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # jarclient - Stateful HTTP Request Helper
//!
//! A thin layer over an HTTP transport that remembers cookies per host,
//! picks a proxy per call, bounds every call with a deadline and returns one
//! normalized response shape for success and error statuses alike.
//!
//! ## Features
//!
//! - Cookie jar: `Set-Cookie` answers are stored per host and resent
//! - Ad hoc cookies: a caller `Cookie` header is merged over stored cookies
//! - Proxies: default proxy, per-call override, per-call opt-out
//! - Deadlines: per-client timeout or per-call `custom_timeout`
//! - Normalized results: 4xx/5xx answers are results, not errors
//! - Pluggable transport: `reqwest` by default, any [`Transport`] otherwise
//!
//! ## Example
//!
//! ```rust,no_run
//! use jarclient::{CallOptions, HttpClient, HttpClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::with_config(
//!         HttpClientConfig::new().header("accept", "application/json"),
//!     );
//!
//!     let response = client.get("https://api64.ipify.org?format=json").await?;
//!     println!("{:?}", response.json());
//!
//!     let page = client
//!         .do_request("https://example.com/", None, Some(CallOptions::new().raw()))
//!         .await?;
//!     println!("{} {:?}", page.status, page.text());
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;

// Re-exports for convenience

// Errors
pub use error::{BoxError, Error, Result};

// HTTP
pub use http::{
    host_of, CallOptions, Cookie, CookieMap, CookieStore, HttpClient, HttpClientConfig,
    NormalizedResponse, Payload, ProxyAgent, RawResponse, RequestOptions, ResolvedRequest,
    ResponseBody, ReqwestTransport, Transport, TransportConfig, TransportError,
};

/// jarclient version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

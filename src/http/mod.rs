// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client layer for jarclient
//!
//! Provides a stateful HTTP client with a per-host cookie jar, proxy
//! selection, call deadlines and normalized responses.

mod client;
mod config;
pub mod cookie;
pub mod deadline;
pub mod proxy;
mod request;
mod response;
mod store;
mod transport;

use std::time::Duration;

pub use client::{host_of, HttpClient};
pub use config::HttpClientConfig;
pub use cookie::{Cookie, CookieMap};
pub use proxy::ProxyAgent;
pub use request::{CallOptions, RequestOptions, ResolvedRequest};
pub use response::{NormalizedResponse, Payload, RawResponse, ResponseBody};
pub use store::CookieStore;
pub use transport::{ReqwestTransport, Transport, TransportConfig, TransportError};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Common HTTP headers
pub mod headers {
    pub const CONTENT_TYPE: &str = "content-type";
    pub const COOKIE: &str = "cookie";
    pub const SET_COOKIE: &str = "set-cookie";
    pub const USER_AGENT: &str = "user-agent";
}

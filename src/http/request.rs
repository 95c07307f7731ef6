// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-call request types

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use url::Url;

use super::proxy::ProxyAgent;
use crate::error::Result;

/// Caller-supplied request fields
///
/// Method, query and body are passed to the transport verbatim. A `cookie`
/// header is read as ad hoc cookies and merged with the stored ones.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Request method
    pub method: Method,
    /// Request headers
    pub headers: HeaderMap,
    /// Query pairs appended to the URL
    pub query: Vec<(String, String)>,
    /// Request body
    pub body: Option<Bytes>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    /// Create options for a GET request
    pub fn new() -> Self {
        Self::default()
    }

    /// Create options for a POST request
    pub fn post() -> Self {
        Self::new().method(Method::POST)
    }

    /// Set the method
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set a header
    ///
    /// Names or values that are not valid header text are ignored.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Send ad hoc cookies with this call, in `Cookie` header form
    pub fn cookies(self, cookies: impl AsRef<str>) -> Self {
        self.header(super::headers::COOKIE, cookies)
    }

    /// Append a query pair
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Set the request body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set JSON body
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        let json = serde_json::to_vec(data)?;
        self.body = Some(Bytes::from(json));
        Ok(self.header(super::headers::CONTENT_TYPE, "application/json"))
    }

    /// Set form body
    pub fn form<K, V>(mut self, fields: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(
                fields
                    .iter()
                    .map(|(k, v)| -> (&str, &str) { (k.as_ref(), v.as_ref()) }),
            )
            .finish();
        self.body = Some(Bytes::from(body));
        self.header(
            super::headers::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
    }
}

/// Per-call behaviour switches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOptions {
    /// Parse the body as JSON
    pub json_result: bool,
    /// Apply the client's default proxy
    pub use_default_proxy: bool,
    /// Send the cookies stored for the host
    pub use_saved_cookies: bool,
    /// Proxy for this call only, overrides the default
    pub custom_proxy: Option<String>,
    /// Deadline for this call, overrides the client timeout
    pub custom_timeout: Option<Duration>,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            json_result: true,
            use_default_proxy: true,
            use_saved_cookies: true,
            custom_proxy: None,
            custom_timeout: None,
        }
    }
}

impl CallOptions {
    /// Create default call options
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the raw body text instead of JSON
    pub fn raw(mut self) -> Self {
        self.json_result = false;
        self
    }

    /// Enable/disable JSON parsing of the body
    pub fn json_result(mut self, json: bool) -> Self {
        self.json_result = json;
        self
    }

    /// Enable/disable the client's default proxy
    pub fn use_default_proxy(mut self, use_default: bool) -> Self {
        self.use_default_proxy = use_default;
        self
    }

    /// Enable/disable stored cookies
    pub fn use_saved_cookies(mut self, use_saved: bool) -> Self {
        self.use_saved_cookies = use_saved;
        self
    }

    /// Set a proxy for this call
    pub fn custom_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.custom_proxy = Some(proxy.into());
        self
    }

    /// Set a deadline for this call
    pub fn custom_timeout(mut self, timeout: Duration) -> Self {
        self.custom_timeout = Some(timeout);
        self
    }
}

/// Fully resolved request handed to the transport
#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    /// Request method
    pub method: Method,
    /// Target URL, query applied
    pub url: Url,
    /// Final headers: cookie, user agent, defaults and caller headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Option<Bytes>,
    /// Per-request transport timeout
    pub timeout: Duration,
    /// Proxy agent, `None` for a direct connection
    pub proxy: Option<ProxyAgent>,
}

impl ResolvedRequest {
    /// Get a header value, if it is valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
    }

    /// `Cookie` header sent with the request
    pub fn cookie_header(&self) -> Option<&str> {
        self.header(super::headers::COOKIE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_options() {
        let options = RequestOptions::post()
            .header("x-custom", "value")
            .header("bad header", "ignored")
            .query("page", "2");

        assert_eq!(options.method, Method::POST);
        assert_eq!(options.headers.len(), 1);
        assert_eq!(options.query, vec![("page".to_string(), "2".to_string())]);
    }

    #[test]
    fn test_form_body() {
        let options = RequestOptions::post().form(&[("q", "a b"), ("lang", "en&fi")]);

        assert_eq!(options.body.unwrap(), Bytes::from("q=a+b&lang=en%26fi"));
        assert_eq!(
            options.headers.get("content-type").unwrap(),
            "application/x-www-form-urlencoded"
        );
    }

    #[test]
    fn test_json_body() {
        let options = RequestOptions::post()
            .json(&serde_json::json!({"id": 1}))
            .unwrap();

        assert_eq!(options.body.unwrap(), Bytes::from(r#"{"id":1}"#));
        assert_eq!(options.headers.get("content-type").unwrap(), "application/json");
    }

    #[test]
    fn test_call_options_defaults() {
        let options = CallOptions::default();
        assert!(options.json_result);
        assert!(options.use_default_proxy);
        assert!(options.use_saved_cookies);
        assert!(options.custom_proxy.is_none());
        assert!(options.custom_timeout.is_none());

        assert!(!CallOptions::new().raw().json_result);
    }
}

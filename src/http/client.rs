// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE, USER_AGENT};
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use super::config::HttpClientConfig;
use super::cookie::{pack_cookies, parse_cookie_header, CookieMap};
use super::deadline;
use super::proxy::resolve_agent;
use super::request::{CallOptions, RequestOptions, ResolvedRequest};
use super::response::NormalizedResponse;
use super::store::CookieStore;
use super::transport::{ReqwestTransport, Transport, TransportError};
use crate::error::{Error, Result};

/// Cookie partition key for `url`
///
/// Drops a leading `http://` or `https://` and keeps everything up to the
/// first `/`, so ports stay part of the host.
pub fn host_of(url: &str) -> &str {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    rest.split_once('/').map_or(rest, |(host, _)| host)
}

/// HTTP client with cookie management
///
/// Clones share configuration, proxy, cookie store and transport.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: HttpClientConfig,
    /// Default proxy, reassignable after construction
    proxy: RwLock<Option<String>>,
    cookies: CookieStore,
    transport: Arc<dyn Transport>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client on top of a custom transport
    pub fn with_transport(config: HttpClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                proxy: RwLock::new(config.proxy.clone()),
                config,
                cookies: CookieStore::new(),
                transport,
            }),
        }
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.inner.config
    }

    /// Get the cookie store
    pub fn cookie_store(&self) -> &CookieStore {
        &self.inner.cookies
    }

    /// Current default proxy
    pub fn proxy(&self) -> Option<String> {
        self.inner.proxy.read().clone()
    }

    /// Replace the default proxy, `None` to connect directly
    pub fn set_proxy(&self, proxy: Option<String>) {
        *self.inner.proxy.write() = proxy;
    }

    /// Replace every cookie stored for `host`
    pub fn set_cookies(&self, host: impl Into<String>, cookies: CookieMap) {
        self.inner.cookies.set(host, cookies);
    }

    /// All hosts with stored cookies
    pub fn all_hosts(&self) -> Vec<String> {
        self.inner.cookies.hosts()
    }

    /// Cookies stored for `host`, `None` when the host is unknown
    pub fn cookies(&self, host: &str) -> Option<CookieMap> {
        self.inner.cookies.get(host)
    }

    /// Cookies of every host
    pub fn all_cookies(&self) -> HashMap<String, CookieMap> {
        self.inner.cookies.all()
    }

    /// Clear cookies of one host, or of every host with `None`
    pub fn clear_cookies(&self, host: Option<&str>) {
        match host {
            Some(host) => self.inner.cookies.clear_host(host),
            None => self.inner.cookies.clear(),
        }
    }

    /// Execute a GET request expecting JSON
    pub async fn get(&self, url: &str) -> Result<NormalizedResponse> {
        self.do_request(url, None, None).await
    }

    /// Execute a POST request with a JSON body
    pub async fn post_json<T: Serialize>(&self, url: &str, data: &T) -> Result<NormalizedResponse> {
        let request = RequestOptions::post()
            .json(data)
            .map_err(|e| Error::request(url, e))?;
        self.do_request(url, Some(request), None).await
    }

    /// Execute a request
    ///
    /// Stored cookies for the host are sent and `Set-Cookie` answers are fed
    /// back into the store. Error statuses come back as
    /// [`Payload::HttpError`](super::Payload::HttpError), not as failures.
    /// Every failure is wrapped in [`Error::Request`].
    ///
    /// The call is bounded by `custom_timeout` or the configured timeout. The
    /// same duration is handed to the transport, so the deadline decides when
    /// a slow call gives up. The deadline is best-effort: a call that outlives
    /// it is not cancelled and may still update the cookie store, but its
    /// result is dropped.
    pub async fn do_request(
        &self,
        url: &str,
        request: Option<RequestOptions>,
        options: Option<CallOptions>,
    ) -> Result<NormalizedResponse> {
        let deadline = self.inner.deadline(options.as_ref());

        let inner = Arc::clone(&self.inner);
        let target = url.to_string();
        let call = async move { inner.perform(&target, request, options.as_ref()).await };

        deadline::guard(call, deadline, url)
            .await
            .map_err(|e| Error::request(url, e))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientInner {
    /// Deadline of one call: `custom_timeout`, else the configured timeout
    fn deadline(&self, options: Option<&CallOptions>) -> Duration {
        options
            .and_then(|o| o.custom_timeout)
            .unwrap_or(self.config.timeout)
    }

    async fn perform(
        &self,
        url: &str,
        request: Option<RequestOptions>,
        options: Option<&CallOptions>,
    ) -> Result<NormalizedResponse> {
        let host = host_of(url);
        let json = options.map_or(true, |o| o.json_result);
        let resolved = self.resolve(url, host, request.unwrap_or_default(), options)?;

        debug!(
            method = %resolved.method,
            url = %resolved.url,
            host = %host,
            proxy = ?resolved.proxy.as_ref().map(|p| p.url().as_str()),
            "Sending request"
        );

        match self.transport.send(&resolved).await {
            Ok(raw) => {
                self.cookies.set_from_raw(host, raw.set_cookies());
                NormalizedResponse::from_raw(raw, false, json, resolved)
            }
            Err(TransportError::Status(raw)) => {
                debug!(url = %resolved.url, status = %raw.status, "Server answered with error status");
                NormalizedResponse::from_raw(raw, true, json, resolved)
            }
            Err(TransportError::Network(cause)) => {
                warn!(url = %resolved.url, error = %cause, "Transport failed");
                Err(Error::Transport(cause))
            }
        }
    }

    /// Build the final request: headers, cookies, proxy and timeout
    fn resolve(
        &self,
        url: &str,
        host: &str,
        request: RequestOptions,
        options: Option<&CallOptions>,
    ) -> Result<ResolvedRequest> {
        let RequestOptions {
            method,
            headers: mut caller_headers,
            query,
            body,
        } = request;

        let ad_hoc = caller_headers
            .remove(COOKIE)
            .map(|value| parse_cookie_header(&String::from_utf8_lossy(value.as_bytes())))
            .unwrap_or_default();

        let mut effective = self.config.default_headers.clone();
        effective.extend(caller_headers);
        effective.remove(COOKIE);

        let mut headers = HeaderMap::new();
        if options.map_or(true, |o| o.use_saved_cookies) {
            let mut cookies = self.cookies.get(host).unwrap_or_default();
            cookies.extend(ad_hoc);
            let packed = pack_cookies(&cookies);
            if !packed.is_empty() {
                let value = HeaderValue::from_str(&packed)
                    .map_err(|e| Error::InvalidHeader(format!("cookie: {}", e)))?;
                headers.insert(COOKIE, value);
            }
        }
        let user_agent = HeaderValue::from_str(&self.config.user_agent)
            .map_err(|e| Error::InvalidHeader(format!("user-agent: {}", e)))?;
        headers.insert(USER_AGENT, user_agent);
        headers.extend(effective);

        let mut target = Url::parse(url)?;
        if !query.is_empty() {
            target.query_pairs_mut().extend_pairs(query.iter());
        }

        let default_proxy = self.proxy.read().clone();
        let proxy = resolve_agent(default_proxy.as_deref(), options)?;

        Ok(ResolvedRequest {
            method,
            url: target,
            headers,
            body,
            timeout: self.deadline(options),
            proxy,
        })
    }
}

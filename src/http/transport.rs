// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport seam between the client and the wire
//!
//! The client only needs `send`. Redirects, TLS and pooling belong to the
//! transport. [`ReqwestTransport`] is the default implementation.

use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::redirect::Policy;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use super::request::ResolvedRequest;
use super::response::RawResponse;
use crate::error::{BoxError, Error, Result};

/// Failure reported by a transport
#[derive(Error, Debug)]
pub enum TransportError {
    /// The server answered with an error status
    #[error("HTTP status {}", .0.status)]
    Status(RawResponse),

    /// No response: connection, DNS, proxy or TLS failure
    #[error("Network error: {0}")]
    Network(#[source] BoxError),
}

impl TransportError {
    /// Create a network error from any cause
    pub fn network<E>(cause: E) -> Self
    where
        E: Into<BoxError>,
    {
        TransportError::Network(cause.into())
    }
}

/// Sends resolved requests
///
/// Implementations report 4xx/5xx answers as [`TransportError::Status`] and
/// keep the response, so the client can still normalize it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request
    async fn send(&self, request: &ResolvedRequest) -> std::result::Result<RawResponse, TransportError>;
}

/// Reqwest transport configuration
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            max_redirects: 10,
            accept_invalid_certs: false,
        }
    }
}

/// Transport backed by `reqwest`
///
/// Keeps one pooled client per proxy. Reqwest's cookie store stays off since
/// cookies are handled by the caller.
#[derive(Debug, Default)]
pub struct ReqwestTransport {
    config: TransportConfig,
    /// Clients keyed by proxy URL, `None` for direct connections
    clients: DashMap<Option<String>, Client>,
}

impl ReqwestTransport {
    /// Create a transport with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: TransportConfig) -> Self {
        Self {
            config,
            clients: DashMap::new(),
        }
    }

    /// Get or build the client for the request's proxy
    fn client_for(&self, request: &ResolvedRequest) -> Result<Client> {
        let key = request.proxy.as_ref().map(|p| p.url().to_string());
        if let Some(client) = self.clients.get(&key) {
            return Ok(client.clone());
        }

        let mut builder = Client::builder()
            .redirect(Policy::limited(self.config.max_redirects))
            .danger_accept_invalid_certs(self.config.accept_invalid_certs);
        builder = match &request.proxy {
            Some(agent) => builder.proxy(agent.to_reqwest()?),
            None => builder.no_proxy(),
        };
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        debug!(proxy = ?key, "Built transport client");
        self.clients.insert(key, client.clone());
        Ok(client)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ResolvedRequest) -> std::result::Result<RawResponse, TransportError> {
        let client = self.client_for(request).map_err(TransportError::network)?;

        let mut builder = client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone())
            .timeout(request.timeout);
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(TransportError::network)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(TransportError::network)?;

        let raw = RawResponse::new(status, headers, body);
        if raw.is_http_error() {
            Err(TransportError::Status(raw))
        } else {
            Ok(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::proxy::ProxyAgent;
    use reqwest::header::HeaderMap;
    use reqwest::Method;
    use std::time::Duration;

    fn request(proxy: Option<&str>) -> ResolvedRequest {
        ResolvedRequest {
            method: Method::GET,
            url: url::Url::parse("http://127.0.0.1:9/").unwrap(),
            headers: HeaderMap::new(),
            body: None,
            timeout: Duration::from_secs(1),
            proxy: proxy.map(|p| ProxyAgent::new(p).unwrap()),
        }
    }

    #[test]
    fn test_client_per_proxy() {
        let transport = ReqwestTransport::new();
        transport.client_for(&request(None)).unwrap();
        transport.client_for(&request(None)).unwrap();
        transport.client_for(&request(Some("http://127.0.0.1:3128"))).unwrap();

        assert_eq!(transport.clients.len(), 2);
    }

    #[test]
    fn test_with_config_builds_insecure_client() {
        let transport = ReqwestTransport::with_config(TransportConfig {
            accept_invalid_certs: true,
            ..TransportConfig::default()
        });

        assert!(transport.config.accept_invalid_certs);
        assert_eq!(transport.config.max_redirects, 10);
        transport.client_for(&request(None)).unwrap();
        assert_eq!(transport.clients.len(), 1);
    }

    #[tokio::test]
    async fn test_max_redirects_reaches_client() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        let location = format!("{}/end", server.uri());
        Mock::given(method("GET"))
            .and(path("/start"))
            .respond_with(ResponseTemplate::new(302).insert_header("location", location.as_str()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/end"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        let mut start = request(None);
        start.url = url::Url::parse(&format!("{}/start", server.uri())).unwrap();

        let following = ReqwestTransport::new();
        let raw = following.send(&start).await.unwrap();
        assert_eq!(raw.status.as_u16(), 200);

        let strict = ReqwestTransport::with_config(TransportConfig {
            max_redirects: 0,
            ..TransportConfig::default()
        });
        let err = strict.send(&start).await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }

    #[test]
    fn test_network_error_display() {
        let err = TransportError::network("connection refused");
        assert_eq!(err.to_string(), "Network error: connection refused");
    }
}

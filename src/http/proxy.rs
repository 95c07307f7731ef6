// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Proxy selection

use url::Url;

use super::request::CallOptions;
use crate::error::{Error, Result};

/// A proxy applied to both http and https targets
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProxyAgent {
    url: Url,
}

impl ProxyAgent {
    /// Create an agent for `proxy`
    pub fn new(proxy: &str) -> Result<Self> {
        let url = Url::parse(proxy)
            .map_err(|e| Error::config(format!("Invalid proxy URL {}: {}", proxy, e)))?;
        Ok(Self { url })
    }

    /// Proxy URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Build the reqwest proxy for every scheme
    pub fn to_reqwest(&self) -> Result<reqwest::Proxy> {
        reqwest::Proxy::all(self.url.as_str())
            .map_err(|e| Error::config(format!("Invalid proxy URL: {}", e)))
    }
}

/// Pick the proxy for one call
///
/// A custom proxy always wins. The client default applies when the caller
/// passed no options or left `use_default_proxy` on.
pub fn select_proxy<'a>(
    default_proxy: Option<&'a str>,
    options: Option<&'a CallOptions>,
) -> Option<&'a str> {
    if let Some(custom) = options.and_then(|o| o.custom_proxy.as_deref()) {
        return Some(custom);
    }
    match options {
        Some(o) if !o.use_default_proxy => None,
        _ => default_proxy,
    }
}

/// Resolve the agent for one call, `None` for a direct connection
pub fn resolve_agent(
    default_proxy: Option<&str>,
    options: Option<&CallOptions>,
) -> Result<Option<ProxyAgent>> {
    select_proxy(default_proxy, options)
        .map(ProxyAgent::new)
        .transpose()
}

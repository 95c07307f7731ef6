// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-host cookie storage

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use super::cookie::{parse_set_cookie, CookieMap};
use crate::error::Result;

/// Thread-safe cookie storage partitioned by host
///
/// Cloning yields another handle to the same storage. Expired cookies are
/// kept until they are overwritten or cleared.
#[derive(Debug, Clone, Default)]
pub struct CookieStore {
    /// Cookies stored by host
    hosts: Arc<DashMap<String, CookieMap>>,
}

impl CookieStore {
    /// Create a new empty cookie store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every cookie stored for `host`
    pub fn set(&self, host: impl Into<String>, cookies: CookieMap) {
        self.hosts.insert(host.into(), cookies);
    }

    /// Upsert cookies from raw `Set-Cookie` values
    ///
    /// The host entry is created on the first readable directive.
    pub fn set_from_raw<I, S>(&self, host: &str, directives: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for directive in directives {
            let directive = directive.as_ref();
            match parse_set_cookie(directive) {
                Some(cookie) => {
                    debug!(host = %host, cookie = %cookie.name, "Storing cookie");
                    self.hosts
                        .entry(host.to_string())
                        .or_default()
                        .insert(cookie.name.clone(), cookie);
                }
                None => debug!(host = %host, directive = %directive, "Skipping unnamed cookie"),
            }
        }
    }

    /// Get the cookies stored for `host`
    ///
    /// `None` when nothing was ever stored for the host.
    pub fn get(&self, host: &str) -> Option<CookieMap> {
        self.hosts.get(host).map(|entry| entry.value().clone())
    }

    /// All hosts with a cookie entry
    pub fn hosts(&self) -> Vec<String> {
        self.hosts.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Snapshot of every host's cookies
    pub fn all(&self) -> HashMap<String, CookieMap> {
        self.hosts
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Clear all cookies
    pub fn clear(&self) {
        self.hosts.clear();
    }

    /// Clear cookies for a specific host
    pub fn clear_host(&self, host: &str) {
        self.hosts.remove(host);
    }

    /// Get total cookie count
    pub fn len(&self) -> usize {
        self.hosts.iter().map(|e| e.value().len()).sum()
    }

    /// Check if store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Export all cookies as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.all())
    }

    /// Import cookies from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let hosts: HashMap<String, CookieMap> = serde_json::from_str(json)?;
        let store = CookieStore::new();
        for (host, cookies) in hosts {
            store.set(host, cookies);
        }
        Ok(store)
    }

    /// Write a JSON snapshot of the store to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        debug!(path = %path.as_ref().display(), hosts = self.hosts.len(), "Saved cookie snapshot");
        Ok(())
    }

    /// Load a store from a JSON snapshot at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::from_json(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::cookie::Cookie;

    #[test]
    fn test_set_from_raw() {
        let store = CookieStore::new();
        store.set_from_raw(
            "example.com",
            ["a=1", "b=2; Expires=Wed, 21 Oct 2025 07:28:00 GMT"],
        );

        let cookies = store.get("example.com").unwrap();
        assert_eq!(cookies.len(), 2);
        assert!(cookies["a"].expires.is_none());
        assert!(cookies["b"].expires.is_some());
    }

    #[test]
    fn test_last_write_wins() {
        let store = CookieStore::new();
        store.set_from_raw("example.com", ["a=1"]);
        store.set_from_raw("example.com", ["a=2"]);

        assert_eq!(store.get("example.com").unwrap()["a"].value, "2");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unknown_host() {
        let store = CookieStore::new();
        assert!(store.get("nowhere.test").is_none());

        store.set("empty.test", CookieMap::new());
        assert_eq!(store.get("empty.test"), Some(CookieMap::new()));
    }

    #[test]
    fn test_unreadable_directives_create_no_host() {
        let store = CookieStore::new();
        store.set_from_raw("example.com", ["garbage"]);
        assert!(store.get("example.com").is_none());
    }

    #[test]
    fn test_set_replaces() {
        let store = CookieStore::new();
        store.set_from_raw("example.com", ["a=1", "b=2"]);

        let mut replacement = CookieMap::new();
        replacement.insert("c".to_string(), Cookie::new("c", "3"));
        store.set("example.com", replacement);

        let cookies = store.get("example.com").unwrap();
        assert_eq!(cookies.keys().collect::<Vec<_>>(), vec!["c"]);
    }

    #[test]
    fn test_clear() {
        let store = CookieStore::new();
        store.set_from_raw("a.test", ["x=1"]);
        store.set_from_raw("b.test", ["y=1"]);

        store.clear_host("a.test");
        assert_eq!(store.hosts(), vec!["b.test".to_string()]);

        store.clear();
        assert!(store.hosts().is_empty());
        assert!(store.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_disjoint_writes() {
        let store = CookieStore::new();
        let tasks: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.set_from_raw("example.com", [format!("c{}={}", i, i)]);
                })
            })
            .collect();
        for task in futures::future::join_all(tasks).await {
            task.unwrap();
        }

        let cookies = store.get("example.com").unwrap();
        assert_eq!(cookies.len(), 32);
        assert!((0..32).all(|i| cookies.contains_key(&format!("c{}", i))));
    }

    #[test]
    fn test_snapshot_file() {
        let store = CookieStore::new();
        store.set_from_raw("example.com", ["a=1", "b=2; Expires=Wed, 21 Oct 2025 07:28:00 GMT"]);
        store.set_from_raw("other.test", ["c=3"]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        store.save(&path).unwrap();

        let restored = CookieStore::load(&path).unwrap();
        assert_eq!(restored.all(), store.all());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CookieStore::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, crate::error::Error::Io(_)));
    }
}

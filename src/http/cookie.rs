// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cookie records and the `Cookie` / `Set-Cookie` text codec
//!
//! Only name, value and expiry are kept. Domain, path, secure, httponly,
//! samesite and max-age attributes are dropped on parse.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cookies of one host keyed by name
pub type CookieMap = BTreeMap<String, Cookie>;

/// Separator between cookies in a `Cookie` header and between attributes
/// of a `Set-Cookie` directive
pub const SEPARATOR: &str = "; ";

/// A single HTTP cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name, never empty
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Expiration time (None = session cookie)
    pub expires: Option<DateTime<Utc>>,
}

impl Cookie {
    /// Create a new session cookie
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires: None,
        }
    }

    /// Set expiration time
    pub fn expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Check if the cookie is expired
    ///
    /// Informational only: the store never evicts expired cookies.
    pub fn is_expired(&self) -> bool {
        self.expires.map_or(false, |exp| exp < Utc::now())
    }

    /// Convert to cookie header format
    pub fn to_header_value(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// Pack cookies into a `Cookie` header value
///
/// Produces `"a=1; b=2; "`, trailing separator included. An empty map gives
/// an empty string.
pub fn pack_cookies(cookies: &CookieMap) -> String {
    let mut packed = String::new();
    for cookie in cookies.values() {
        packed.push_str(&cookie.to_header_value());
        packed.push_str(SEPARATOR);
    }
    packed
}

/// Parse a `Cookie` request header value
///
/// Segments without `=` or with an empty name are skipped. Parsed cookies
/// never carry an expiry.
pub fn parse_cookie_header(header: &str) -> CookieMap {
    header
        .split(SEPARATOR)
        .filter_map(|segment| segment.split_once('='))
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, value)| (name.to_string(), Cookie::new(name, value)))
        .collect()
}

/// Parse a single `Set-Cookie` directive
///
/// The first segment holds `name=value`. The first later segment containing
/// `Expires` supplies the expiry. Returns `None` when no name can be read.
///
/// The `Expires` match is case-sensitive: a lowercase `expires=` attribute is
/// ignored and the cookie has no expiry.
pub fn parse_set_cookie(directive: &str) -> Option<Cookie> {
    let mut segments = directive.split(SEPARATOR);
    let (name, value) = segments.next()?.split_once('=')?;
    if name.is_empty() {
        return None;
    }

    let mut cookie = Cookie::new(name, value);
    if let Some(attr) = segments.find(|segment| segment.contains("Expires")) {
        cookie.expires = attr
            .split_once('=')
            .and_then(|(_, date)| parse_cookie_date(date.trim()));
        if cookie.expires.is_none() {
            tracing::debug!(cookie = %cookie.name, attr = %attr, "Unreadable cookie expiry");
        }
    }

    Some(cookie)
}

/// Date layouts accepted in `Expires`, after the weekday is stripped
const EXPIRES_FORMATS: &[&str] = &[
    "%d %b %Y %H:%M:%S GMT",
    "%d-%b-%Y %H:%M:%S GMT",
    "%d-%b-%y %H:%M:%S GMT",
];

/// Parse the date formats servers use in `Expires`
///
/// The weekday is ignored, so a weekday that disagrees with the date does
/// not reject the value.
fn parse_cookie_date(date: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.with_timezone(&Utc));
    }

    let without_weekday = date.split_once(", ").map_or(date, |(_, rest)| rest);
    EXPIRES_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(without_weekday, format).ok())
        .map(|naive| naive.and_utc())
}

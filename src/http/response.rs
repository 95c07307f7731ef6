// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types

use std::borrow::Cow;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::request::ResolvedRequest;
use crate::error::{Error, Result};

/// Response as delivered by a transport
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body text
    pub body: String,
}

impl RawResponse {
    /// Create a new response
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Whether the status counts as an HTTP failure (4xx or 5xx)
    pub fn is_http_error(&self) -> bool {
        self.status.is_client_error() || self.status.is_server_error()
    }

    /// Get all values for a header
    ///
    /// Non-UTF-8 bytes are replaced rather than dropping the value.
    pub fn header_all(&self, name: &str) -> Vec<Cow<'_, str>> {
        self.headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()))
            .collect()
    }

    /// Get Set-Cookie headers
    pub fn set_cookies(&self) -> Vec<Cow<'_, str>> {
        self.header_all(super::headers::SET_COOKIE)
    }
}

/// Body of a normalized response
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Parsed JSON
    Json(Value),
    /// Raw text
    Text(String),
}

impl ResponseBody {
    /// Parse `body` as JSON or keep it as text
    fn decode(status: StatusCode, body: String, json: bool) -> Result<Self> {
        if !json {
            return Ok(ResponseBody::Text(body));
        }
        serde_json::from_str(&body)
            .map(ResponseBody::Json)
            .map_err(|source| Error::ResponseFormat {
                status: status.as_u16(),
                source,
            })
    }
}

/// Outcome of a call that reached the server
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Successful response parsed as JSON
    Json(Value),
    /// Successful response kept as text
    Text(String),
    /// Server answered with an error status
    HttpError(ResponseBody),
}

/// Uniform result of `HttpClient::do_request`
#[derive(Debug, Clone)]
pub struct NormalizedResponse {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response payload
    pub payload: Payload,
    /// Options the request was sent with
    pub request: ResolvedRequest,
}

impl NormalizedResponse {
    /// Normalize a transport response
    ///
    /// `http_error` marks a response delivered through a status failure.
    /// Fails with [`Error::ResponseFormat`] when JSON was requested and the
    /// body does not parse, whatever the status.
    pub fn from_raw(
        raw: RawResponse,
        http_error: bool,
        json: bool,
        request: ResolvedRequest,
    ) -> Result<Self> {
        let RawResponse {
            status,
            headers,
            body,
        } = raw;
        let body = ResponseBody::decode(status, body, json)?;
        let payload = match (http_error, body) {
            (true, body) => Payload::HttpError(body),
            (false, ResponseBody::Json(value)) => Payload::Json(value),
            (false, ResponseBody::Text(text)) => Payload::Text(text),
        };

        Ok(Self {
            status,
            headers,
            payload,
            request,
        })
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Check if the server answered with an error status
    pub fn is_http_error(&self) -> bool {
        matches!(self.payload, Payload::HttpError(_))
    }

    /// JSON body, for success and error payloads alike
    pub fn json(&self) -> Option<&Value> {
        match &self.payload {
            Payload::Json(value) | Payload::HttpError(ResponseBody::Json(value)) => Some(value),
            _ => None,
        }
    }

    /// Text body, for success and error payloads alike
    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(text) | Payload::HttpError(ResponseBody::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Deserialize the JSON body into `T`
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self
            .json()
            .ok_or_else(|| Error::other("response body was not parsed as JSON"))?;
        Ok(T::deserialize(value)?)
    }

    /// Get a header value, if it is valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use reqwest::Method;
    use std::time::Duration;

    fn resolved() -> ResolvedRequest {
        ResolvedRequest {
            method: Method::GET,
            url: url::Url::parse("https://example.com/api").unwrap(),
            headers: HeaderMap::new(),
            body: None,
            timeout: Duration::from_secs(30),
            proxy: None,
        }
    }

    #[test]
    fn test_set_cookies() {
        let mut headers = HeaderMap::new();
        headers.append("set-cookie", HeaderValue::from_static("a=1"));
        headers.append("set-cookie", HeaderValue::from_static("b=2; Path=/"));
        let raw = RawResponse::new(StatusCode::OK, headers, "");

        assert_eq!(raw.set_cookies(), vec!["a=1", "b=2; Path=/"]);
    }

    #[test]
    fn test_set_cookies_keep_utf8_values() {
        let mut headers = HeaderMap::new();
        headers.append("set-cookie", HeaderValue::from_static("a=1"));
        headers.append(
            "set-cookie",
            HeaderValue::from_bytes("name=Jürgen; Path=/".as_bytes()).unwrap(),
        );
        let raw = RawResponse::new(StatusCode::OK, headers, "");

        assert_eq!(raw.set_cookies(), vec!["a=1", "name=Jürgen; Path=/"]);
    }

    #[test]
    fn test_json_success() {
        let raw = RawResponse::new(StatusCode::OK, HeaderMap::new(), r#"{"ok":true}"#);
        let resp = NormalizedResponse::from_raw(raw, false, true, resolved()).unwrap();

        assert_eq!(resp.payload, Payload::Json(serde_json::json!({"ok": true})));
        assert_eq!(resp.status_code(), 200);
        assert!(resp.text().is_none());
    }

    #[test]
    fn test_http_error_json() {
        let raw = RawResponse::new(StatusCode::NOT_FOUND, HeaderMap::new(), r#"{"error":"missing"}"#);
        let resp = NormalizedResponse::from_raw(raw, true, true, resolved()).unwrap();

        assert!(resp.is_http_error());
        assert_eq!(resp.status_code(), 404);
        assert_eq!(resp.json().unwrap()["error"], "missing");
    }

    #[test]
    fn test_raw_text() {
        let raw = RawResponse::new(StatusCode::OK, HeaderMap::new(), "<html></html>");
        let resp = NormalizedResponse::from_raw(raw, false, false, resolved()).unwrap();

        assert_eq!(resp.text(), Some("<html></html>"));
    }

    #[test]
    fn test_invalid_json() {
        let raw = RawResponse::new(StatusCode::BAD_GATEWAY, HeaderMap::new(), "upstream down");
        let err = NormalizedResponse::from_raw(raw, true, true, resolved()).unwrap_err();

        assert!(err.is_response_format());
        assert_eq!(err.status_code(), Some(502));
    }

    #[test]
    fn test_deserialize() {
        #[derive(serde::Deserialize)]
        struct Ip {
            ip: String,
        }

        let raw = RawResponse::new(StatusCode::OK, HeaderMap::new(), r#"{"ip":"10.0.0.1"}"#);
        let resp = NormalizedResponse::from_raw(raw, false, true, resolved()).unwrap();
        let ip: Ip = resp.deserialize().unwrap();

        assert_eq!(ip.ip, "10.0.0.1");
    }
}

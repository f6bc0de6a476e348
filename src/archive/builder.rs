//! Building an [`ArchiveRequest`] from a live request.
//!
//! # Responsibilities
//! - Flatten header and query occurrences into name/value pairs
//! - Split `Cookie` headers into cookie entries
//! - Measure the canonical header block and the raw body
//!
//! # Design Decisions
//! - The body is passed in already buffered; buffering and replay belong to the middleware
//! - Cross-name header order follows `HeaderMap` iteration; per-name order is arrival order

use std::io::{self, Write};

use axum::http::{header, request::Parts, HeaderMap};
use serde::{Deserialize, Serialize};

use crate::archive::entry::{ArchiveRequest, Cookie, NameValuePair, PostData};

/// Options applied while capturing a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureOptions {
    /// Header names left out of the canonical header block (case-insensitive).
    pub excluded_headers: Vec<String>,
}

impl CaptureOptions {
    fn is_excluded(&self, name: &str) -> bool {
        self.excluded_headers
            .iter()
            .any(|excluded| excluded.eq_ignore_ascii_case(name))
    }
}

impl ArchiveRequest {
    /// Capture the request head and its buffered body.
    pub fn capture(parts: &Parts, body: &[u8], options: &CaptureOptions) -> Self {
        let headers_size = match canonical_header_block(&parts.headers, options) {
            Ok(block) => block.len(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to compute header block size");
                0
            }
        };

        Self {
            method: parts.method.to_string(),
            url: request_url(parts),
            http_version: format!("{:?}", parts.version),
            cookies: flatten_cookies(&parts.headers),
            headers: flatten_headers(&parts.headers),
            query_string: flatten_query(parts.uri.query()),
            post_data: PostData {
                mime_type: parts
                    .headers
                    .get(header::CONTENT_TYPE)
                    .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                    .unwrap_or_default(),
                text: String::from_utf8_lossy(body).into_owned(),
            },
            headers_size,
            body_size: body.len(),
        }
    }
}

/// Write the headers as `name: value\r\n` lines.
///
/// Names are sorted, values of one name keep arrival order, and CR/LF inside
/// values become spaces. The result approximates, but is not, the wire header size.
pub fn canonical_header_block(headers: &HeaderMap, options: &CaptureOptions) -> io::Result<Vec<u8>> {
    let mut names: Vec<_> = headers
        .keys()
        .filter(|name| !options.is_excluded(name.as_str()))
        .collect();
    names.sort_by(|a, b| a.as_str().cmp(b.as_str()));

    let mut block = Vec::new();
    for name in names {
        for value in headers.get_all(name) {
            let value = String::from_utf8_lossy(value.as_bytes());
            let value = value.trim().replace(|c: char| c == '\r' || c == '\n', " ");
            write!(block, "{}: {}\r\n", name.as_str(), value)?;
        }
    }
    Ok(block)
}

/// Absolute URL when the target is origin-form and a Host header is present.
fn request_url(parts: &Parts) -> String {
    let uri = &parts.uri;
    if uri.scheme().is_some() {
        return uri.to_string();
    }

    let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    match parts.headers.get(header::HOST).and_then(|h| h.to_str().ok()) {
        Some(host) if !host.is_empty() => format!("http://{}{}", host, target),
        _ => uri.to_string(),
    }
}

fn flatten_headers(headers: &HeaderMap) -> Vec<NameValuePair> {
    headers
        .iter()
        .map(|(name, value)| {
            NameValuePair::new(name.as_str(), String::from_utf8_lossy(value.as_bytes()))
        })
        .collect()
}

fn flatten_query(query: Option<&str>) -> Vec<NameValuePair> {
    match query {
        Some(query) => url::form_urlencoded::parse(query.as_bytes())
            .map(|(name, value)| NameValuePair::new(name, value))
            .collect(),
        None => Vec::new(),
    }
}

fn flatten_cookies(headers: &HeaderMap) -> Vec<Cookie> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(Cookie {
                name: name.to_string(),
                value: value.trim().to_string(),
            })
        })
        .collect()
}

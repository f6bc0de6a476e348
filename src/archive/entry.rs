//! Archive record types.
//!
//! Field names follow the request object of the HTTP Archive (HAR 1.2) format.

use serde::{Deserialize, Serialize};

/// A single name/value occurrence (header or query parameter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameValuePair {
    pub name: String,
    pub value: String,
}

impl NameValuePair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A cookie sent by the client in a `Cookie` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

/// Captured request body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    /// `Content-Type` of the request, empty if absent.
    pub mime_type: String,

    /// Raw body decoded as UTF-8 (lossy).
    pub text: String,
}

/// Immutable snapshot of one inbound request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveRequest {
    /// HTTP verb as received.
    pub method: String,

    /// Request URL including the query string.
    pub url: String,

    /// Protocol identifier, e.g. "HTTP/1.1".
    pub http_version: String,

    pub cookies: Vec<Cookie>,

    /// One entry per header occurrence.
    pub headers: Vec<NameValuePair>,

    /// One entry per query parameter occurrence.
    pub query_string: Vec<NameValuePair>,

    pub post_data: PostData,

    /// Length of the canonical header block (see [`canonical_header_block`]).
    ///
    /// [`canonical_header_block`]: crate::archive::canonical_header_block
    pub headers_size: usize,

    /// Length of the raw body in bytes.
    pub body_size: usize,
}

impl ArchiveRequest {
    /// Encode the record as the JSON value stored in the `request` column.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// All values of the header `name` (case-insensitive), in captured order.
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// All values of the query parameter `name`, in captured order.
    pub fn query_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.query_string
            .iter()
            .filter(move |q| q.name == name)
            .map(|q| q.value.as_str())
    }
}

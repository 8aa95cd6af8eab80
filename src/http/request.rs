//! Inbound request handling.
//!
//! # Responsibilities
//! - Assign every request an `x-request-id` (UUID v4)
//! - Capture the request as the core sees it ([`IncomingRequest`])
//! - Read the body bounded by the declared `Content-Length`
//! - Log the request before it is classified
//!
//! # Design Decisions
//! - A missing or unparseable `Content-Length` means an empty body
//! - Body read failures are logged and treated as an empty body; the
//!   request is still answered
//! - Logging never influences classification

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderValue, Request};
use std::net::SocketAddr;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::routing::classifier::strip_query;
use crate::routing::Verb;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Read the request ID assigned by the middleware, if any.
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// A request as seen by the classifier and the templates.
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    pub verb: Verb,
    /// Raw request target, query included.
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
    pub client_addr: SocketAddr,
}

impl IncomingRequest {
    pub fn new(verb: Verb, target: impl Into<String>, headers: &HeaderMap, client_addr: SocketAddr) -> Self {
        let headers = headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        Self {
            verb,
            target: target.into(),
            headers,
            body: Bytes::new(),
            client_addr,
        }
    }

    /// Path part of the target.
    pub fn path(&self) -> &str {
        strip_query(&self.target)
    }

    /// First value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Query parameters grouped by key, in first-seen order.
    pub fn query_params(&self) -> Vec<(String, Vec<String>)> {
        match self.target.split_once('?') {
            Some((_, query)) => parse_query(query),
            None => Vec::new(),
        }
    }

    /// Log the request. Runs before classification.
    pub fn log(&self, request_id: &str) {
        tracing::info!(
            request_id = %request_id,
            method = %self.verb,
            path = %self.target,
            client = %self.client_addr,
            user_agent = %self.header("user-agent").unwrap_or("unknown"),
            "Request received"
        );

        for (name, value) in &self.headers {
            tracing::debug!(request_id = %request_id, header = %name, value = %value, "Request header");
        }

        for (key, values) in self.query_params() {
            tracing::info!(request_id = %request_id, key = %key, values = ?values, "Query parameter");
        }
    }

    /// Log the body of a POST request.
    pub fn log_body(&self, request_id: &str) {
        tracing::debug!(request_id = %request_id, length = self.body.len(), "POST data length");
        match std::str::from_utf8(&self.body) {
            Ok(text) => tracing::debug!(request_id = %request_id, body = %text, "POST data (raw)"),
            Err(_) => tracing::debug!(request_id = %request_id, body = ?self.body, "POST data (binary)"),
        }
    }
}

/// Parse a query string the way form decoders do, dropping blank values.
pub fn parse_query(query: &str) -> Vec<(String, Vec<String>)> {
    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();

    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        match grouped.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value.into_owned()),
            None => grouped.push((key.into_owned(), vec![value.into_owned()])),
        }
    }

    grouped
}

/// Declared body length. Absent or unparseable means zero.
pub fn declared_content_length(headers: &HeaderMap) -> usize {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

/// Read at most the declared `Content-Length` bytes of a body.
///
/// Never fails: a body that cannot be read, or is larger than `max_size`,
/// is logged and replaced by an empty one.
pub async fn read_declared_body(body: Body, headers: &HeaderMap, max_size: usize, request_id: &str) -> Bytes {
    let declared = declared_content_length(headers);
    if declared == 0 {
        return Bytes::new();
    }

    match axum::body::to_bytes(body, max_size).await {
        Ok(mut bytes) => {
            bytes.truncate(declared);
            bytes
        }
        Err(e) => {
            tracing::warn!(
                request_id = %request_id,
                declared_length = declared,
                max_size,
                error = %e,
                "Failed to read request body, treating it as empty"
            );
            Bytes::new()
        }
    }
}

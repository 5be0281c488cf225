//! `HttpRequest`: an immutable HTTP request context.

use std::collections::HashMap;

/// HTTP request context for matching.
///
/// Paths may be given as they appear on the wire: a query string is parsed
/// off at build time, so [`path`](Self::path) is always the clean path and
/// [`query_param`](Self::query_param) sees the parsed parameters. Header
/// names are lowercased for case-insensitive lookup.
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    query_params: HashMap<String, String>,
}

impl HttpRequest {
    /// Start building a request.
    #[must_use]
    pub fn builder() -> HttpRequestBuilder {
        HttpRequestBuilder::default()
    }

    /// The HTTP method, as given (method matching is case-sensitive).
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The path without its query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Look up a header value by name, case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Look up a query parameter by name.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(String::as_str)
    }
}

/// Builder for [`HttpRequest`].
#[derive(Debug, Default)]
pub struct HttpRequestBuilder {
    request: HttpRequest,
}

impl HttpRequestBuilder {
    /// Set the HTTP method.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.request.method = method.into();
        self
    }

    /// Set the request path. A `?query` suffix is split off and parsed
    /// into query parameters (`key=value` pairs joined by `&`; a bare key
    /// maps to the empty string).
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        let raw: String = path.into();
        match raw.split_once('?') {
            Some((path, query)) => {
                self.request.path = path.to_string();
                for part in query.split('&').filter(|p| !p.is_empty()) {
                    let (key, value) = part.split_once('=').unwrap_or((part, ""));
                    self.request
                        .query_params
                        .insert(key.to_string(), value.to_string());
                }
            }
            None => self.request.path = raw,
        }
        self
    }

    /// Add a header. The name is lowercased for case-insensitive lookup.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request
            .headers
            .insert(name.into().to_lowercase(), value.into());
        self
    }

    /// Add a query parameter, overriding one parsed from the path.
    #[must_use]
    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query_params.insert(name.into(), value.into());
        self
    }

    /// Finish the request.
    #[must_use]
    pub fn build(self) -> HttpRequest {
        self.request
    }
}

//! `DataInput` implementations for [`HttpRequest`].

use unimatch::prelude::*;

use crate::request::HttpRequest;

/// Extracts the request path (without query string).
#[derive(Debug, Clone)]
pub struct PathInput;

impl DataInput<HttpRequest> for PathInput {
    fn get(&self, ctx: &HttpRequest) -> MatchingData {
        MatchingData::String(ctx.path().to_string())
    }
}

/// Extracts the HTTP method (case-sensitive).
#[derive(Debug, Clone)]
pub struct MethodInput;

impl DataInput<HttpRequest> for MethodInput {
    fn get(&self, ctx: &HttpRequest) -> MatchingData {
        MatchingData::String(ctx.method().to_string())
    }
}

/// Extracts a header value by name (case-insensitive lookup).
#[derive(Debug, Clone)]
pub struct HeaderInput {
    name: String,
}

impl HeaderInput {
    /// Extract the header `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_lowercase(),
        }
    }
}

impl DataInput<HttpRequest> for HeaderInput {
    fn get(&self, ctx: &HttpRequest) -> MatchingData {
        ctx.header(&self.name)
            .map_or(MatchingData::None, |v| MatchingData::String(v.to_string()))
    }
}

/// Extracts a query parameter value by name.
#[derive(Debug, Clone)]
pub struct QueryParamInput {
    name: String,
}

impl QueryParamInput {
    /// Extract the query parameter `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl DataInput<HttpRequest> for QueryParamInput {
    fn get(&self, ctx: &HttpRequest) -> MatchingData {
        ctx.query_param(&self.name)
            .map_or(MatchingData::None, |v| MatchingData::String(v.to_string()))
    }
}

// ── Registry support ───────────────────────────────────────────────────────

/// Configuration for [`HeaderInput`].
#[cfg(feature = "registry")]
#[derive(Debug, Clone, serde::Deserialize)]
pub struct HeaderInputConfig {
    /// The header name to extract (case-insensitive).
    pub name: String,
}

/// Configuration for [`QueryParamInput`].
#[cfg(feature = "registry")]
#[derive(Debug, Clone, serde::Deserialize)]
pub struct QueryParamInputConfig {
    /// The query parameter name to extract.
    pub name: String,
}

#[cfg(feature = "registry")]
impl unimatch::IntoDataInput<HttpRequest> for PathInput {
    type Config = unimatch::UnitConfig;

    fn from_config(
        _: unimatch::UnitConfig,
    ) -> Result<Box<dyn DataInput<HttpRequest>>, MatcherError> {
        Ok(Box::new(PathInput))
    }
}

#[cfg(feature = "registry")]
impl unimatch::IntoDataInput<HttpRequest> for MethodInput {
    type Config = unimatch::UnitConfig;

    fn from_config(
        _: unimatch::UnitConfig,
    ) -> Result<Box<dyn DataInput<HttpRequest>>, MatcherError> {
        Ok(Box::new(MethodInput))
    }
}

#[cfg(feature = "registry")]
impl unimatch::IntoDataInput<HttpRequest> for HeaderInput {
    type Config = HeaderInputConfig;

    fn from_config(
        config: HeaderInputConfig,
    ) -> Result<Box<dyn DataInput<HttpRequest>>, MatcherError> {
        if config.name.is_empty() {
            return Err(MatcherError::InvalidConfig(
                "HeaderInput requires a non-empty `name`".into(),
            ));
        }
        Ok(Box::new(HeaderInput::new(config.name)))
    }
}

#[cfg(feature = "registry")]
impl unimatch::IntoDataInput<HttpRequest> for QueryParamInput {
    type Config = QueryParamInputConfig;

    fn from_config(
        config: QueryParamInputConfig,
    ) -> Result<Box<dyn DataInput<HttpRequest>>, MatcherError> {
        if config.name.is_empty() {
            return Err(MatcherError::InvalidConfig(
                "QueryParamInput requires a non-empty `name`".into(),
            ));
        }
        Ok(Box::new(QueryParamInput::new(config.name)))
    }
}

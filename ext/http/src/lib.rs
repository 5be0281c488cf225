//! unimatch-http: HTTP request domain.
//!
//! Two ways in:
//!
//! 1. **Route compiler**: [`RouteMatch`] / [`compile_route_matches`] turn
//!    Gateway-style route specs into matcher trees.
//! 2. **Registry**: with the `registry` feature, the HTTP inputs register
//!    under `unimatch.http.v1.*` type URLs and matchers load from JSON/YAML
//!    documents.
//!
//! ```text
//! RouteMatch (route spec)
//!         ↓ compile()
//! Matcher<HttpRequest, A>
//!         ↑ register() + load_matcher()      [registry feature]
//! MatcherConfig (JSON/YAML document)
//! ```
//!
//! The context is the self-contained [`HttpRequest`]; no HTTP stack
//! involved; adapters index whatever server types they have into it.

mod inputs;
mod request;
mod route;

pub use inputs::{HeaderInput, MethodInput, PathInput, QueryParamInput};
pub use request::{HttpRequest, HttpRequestBuilder};
pub use route::{
    compile_route_matches, HeaderMatch, PathMatch, QueryParamMatch, RouteMatch, ValueMatch,
};

#[cfg(feature = "registry")]
pub use inputs::{HeaderInputConfig, QueryParamInputConfig};

/// Register all HTTP-domain types for [`HttpRequest`] with the given builder.
///
/// Registers core matchers and:
/// - `unimatch.http.v1.PathInput` → [`PathInput`]
/// - `unimatch.http.v1.MethodInput` → [`MethodInput`]
/// - `unimatch.http.v1.HeaderInput` → [`HeaderInput`] (config `{ "name": ... }`)
/// - `unimatch.http.v1.QueryParamInput` → [`QueryParamInput`] (config `{ "name": ... }`)
#[cfg(feature = "registry")]
#[must_use]
pub fn register(
    builder: unimatch::RegistryBuilder<HttpRequest>,
) -> unimatch::RegistryBuilder<HttpRequest> {
    unimatch::register_core_matchers(builder)
        .input::<PathInput>("unimatch.http.v1.PathInput")
        .input::<MethodInput>("unimatch.http.v1.MethodInput")
        .input::<HeaderInput>("unimatch.http.v1.HeaderInput")
        .input::<QueryParamInput>("unimatch.http.v1.QueryParamInput")
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        compile_route_matches, HeaderInput, HeaderMatch, HttpRequest, HttpRequestBuilder,
        MethodInput, PathInput, PathMatch, QueryParamInput, QueryParamMatch, RouteMatch,
        ValueMatch,
    };
    pub use unimatch::prelude::*;
}

#[cfg(all(test, feature = "registry"))]
mod registry_tests {
    use super::*;
    use unimatch::{MatcherConfig, MatcherError, RegistryBuilder};

    #[test]
    fn register_exposes_http_inputs() {
        let registry = register(RegistryBuilder::new()).build();
        assert!(registry.contains_input("unimatch.http.v1.PathInput"));
        assert!(registry.contains_input("unimatch.http.v1.MethodInput"));
        assert!(registry.contains_input("unimatch.http.v1.HeaderInput"));
        assert!(registry.contains_input("unimatch.http.v1.QueryParamInput"));
        assert!(registry.contains_matcher("unimatch.core.v1.StringMatcher"));
    }

    #[test]
    fn load_matcher_with_path_input() {
        let registry = register(RegistryBuilder::new()).build();

        let json = serde_json::json!({
            "matchers": [{
                "predicate": {
                    "type": "single",
                    "input": { "type_url": "unimatch.http.v1.PathInput", "config": {} },
                    "value_match": { "Prefix": "/api" }
                },
                "on_match": { "type": "action", "action": "api_backend" }
            }],
            "on_no_match": { "type": "action", "action": "default" }
        });
        let config: MatcherConfig<String> = serde_json::from_value(json).unwrap();
        let matcher = registry.load_matcher(config).unwrap();

        let api = HttpRequest::builder().method("GET").path("/api/users").build();
        assert_eq!(matcher.evaluate(&api), Some("api_backend".to_string()));

        let health = HttpRequest::builder().method("GET").path("/health").build();
        assert_eq!(matcher.evaluate(&health), Some("default".to_string()));
    }

    #[test]
    fn load_matcher_with_header_input() {
        let registry = register(RegistryBuilder::new()).build();

        let json = serde_json::json!({
            "matchers": [{
                "predicate": {
                    "type": "single",
                    "input": {
                        "type_url": "unimatch.http.v1.HeaderInput",
                        "config": { "name": "content-type" }
                    },
                    "value_match": { "Exact": "application/json" }
                },
                "on_match": { "type": "action", "action": "json_handler" }
            }]
        });
        let config: MatcherConfig<String> = serde_json::from_value(json).unwrap();
        let matcher = registry.load_matcher(config).unwrap();

        let json_req = HttpRequest::builder()
            .header("Content-Type", "application/json")
            .build();
        assert_eq!(matcher.evaluate(&json_req), Some("json_handler".to_string()));

        let html_req = HttpRequest::builder()
            .header("Content-Type", "text/html")
            .build();
        assert_eq!(matcher.evaluate(&html_req), None);
    }

    #[test]
    fn load_matcher_with_and_of_path_and_method() {
        let registry = register(RegistryBuilder::new()).build();

        let json = serde_json::json!({
            "matchers": [{
                "predicate": {
                    "type": "and",
                    "predicates": [
                        {
                            "type": "single",
                            "input": { "type_url": "unimatch.http.v1.PathInput", "config": {} },
                            "value_match": { "Prefix": "/api" }
                        },
                        {
                            "type": "single",
                            "input": { "type_url": "unimatch.http.v1.MethodInput", "config": {} },
                            "value_match": { "Exact": "POST" }
                        }
                    ]
                },
                "on_match": { "type": "action", "action": "api_write" }
            }]
        });
        let config: MatcherConfig<String> = serde_json::from_value(json).unwrap();
        let matcher = registry.load_matcher(config).unwrap();

        let post = HttpRequest::builder().method("POST").path("/api/users").build();
        assert_eq!(matcher.evaluate(&post), Some("api_write".to_string()));

        let get = HttpRequest::builder().method("GET").path("/api/users").build();
        assert_eq!(matcher.evaluate(&get), None);

        let wrong_path = HttpRequest::builder().method("POST").path("/health").build();
        assert_eq!(matcher.evaluate(&wrong_path), None);
    }

    #[test]
    fn empty_header_name_is_rejected() {
        let registry = register(RegistryBuilder::new()).build();
        let json = serde_json::json!({
            "matchers": [{
                "predicate": {
                    "type": "single",
                    "input": {
                        "type_url": "unimatch.http.v1.HeaderInput",
                        "config": { "name": "" }
                    },
                    "value_match": { "Exact": "x" }
                },
                "on_match": { "type": "action", "action": "hit" }
            }]
        });
        let config: MatcherConfig<String> = serde_json::from_value(json).unwrap();
        let err = registry.load_matcher(config).unwrap_err();
        assert!(matches!(err, MatcherError::InvalidConfig(_)));
    }
}

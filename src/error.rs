//! Error taxonomy for binding, rendering, and startup configuration.
//!
//! Per-request failures (`BindError`, `ResolveError`, `RenderError`) are
//! converted into structured HTTP responses at the dispatch/service boundary;
//! handler code never observes them. `ConfigError` is returned from
//! `AppService::new` so a misconfigured application fails to start instead of
//! failing per request.

use http::Method;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// A single schema-validation failure.
///
/// `field` is populated when the validator's diagnostic names a field
/// (serde reports these as `` missing field `population` `` and similar).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    pub field: Option<String>,
    pub detail: String,
}

impl ValidationFailure {
    pub fn from_detail(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        let field = field_from_detail(&detail);
        Self { field, detail }
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.detail)
    }
}

/// Extract the first backtick-quoted identifier from a serde diagnostic.
fn field_from_detail(detail: &str) -> Option<String> {
    let start = detail.find('`')? + 1;
    let end = detail[start..].find('`')? + start;
    if start == end {
        return None;
    }
    Some(detail[start..end].to_string())
}

/// Failure to bind one location-tagged parameter.
#[derive(Debug, Error)]
pub enum BindError {
    /// The body could not be decoded per the marker's expected format.
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    /// Decoded data failed schema validation.
    #[error("validation failed: {0}")]
    ValidationFailed(ValidationFailure),
}

/// One failed parameter within a handler signature, as reported to clients.
#[derive(Debug, Serialize)]
pub struct BindFailure {
    /// Short name of the parameter's schema model.
    pub parameter: &'static str,
    /// `"malformed_body"` or `"validation_failed"`.
    pub kind: &'static str,
    pub field: Option<String>,
    pub detail: String,
}

impl BindFailure {
    pub fn new(parameter: &'static str, error: BindError) -> Self {
        match error {
            BindError::MalformedBody(detail) => Self {
                parameter,
                kind: "malformed_body",
                field: None,
                detail,
            },
            BindError::ValidationFailed(failure) => Self {
                parameter,
                kind: "validation_failed",
                field: failure.field,
                detail: failure.detail,
            },
        }
    }
}

/// Aggregated binding failures for a handler invocation.
///
/// Parameters bind independently in declaration order and every failing
/// parameter is reported, so clients see the full diagnostic in one response.
#[derive(Debug, Error)]
#[error("{} parameter(s) failed to bind", failures.len())]
pub struct ResolveError {
    pub failures: Vec<BindFailure>,
}

impl ResolveError {
    /// Structured body for the 400 response.
    #[must_use]
    pub fn to_body(&self) -> Value {
        json!({
            "error": "request binding failed",
            "failures": self.failures,
        })
    }
}

/// Failure to serialize a handler's return payload.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No registered renderer accepts the negotiated content type.
    /// A server configuration problem, surfaced as a 500.
    #[error("no renderer available for accept {accept:?}")]
    NoRendererAvailable { accept: Option<String> },
    #[error("failed to serialize response payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Startup-time configuration errors. The application must not start.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("route {method} {path} names unregistered handler '{handler}'")]
    UnknownHandler {
        method: Method,
        path: String,
        handler: String,
    },
    #[error("duplicate route registration for {method} {path}")]
    DuplicateRoute { method: Method, path: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_from_detail() {
        assert_eq!(
            field_from_detail("missing field `population`"),
            Some("population".to_string())
        );
        assert_eq!(field_from_detail("no backticks here"), None);
    }

    #[test]
    fn test_resolve_error_body_lists_failures() {
        let err = ResolveError {
            failures: vec![BindFailure::new(
                "City",
                BindError::ValidationFailed(ValidationFailure::from_detail(
                    "missing field `name`",
                )),
            )],
        };
        let body = err.to_body();
        assert_eq!(body["failures"][0]["parameter"], "City");
        assert_eq!(body["failures"][0]["field"], "name");
    }
}

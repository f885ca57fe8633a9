//! Response rendering and content negotiation.
//!
//! Handlers return serde-serializable payloads which the dispatcher converts
//! to a single JSON value; this module turns that value into response bytes.
//! The renderer list comes from [`Settings`](crate::server::Settings) and is
//! tried in registration order: the first renderer accepting the request's
//! `Accept` header wins. Rendering is a pure function of (payload, negotiated
//! content type) and holds no state.
//!
//! Plain-string payloads are not rendered here; the service layer passes them
//! through as `text/plain`, the host framework's default.

use crate::error::RenderError;
use serde_json::Value;
use std::sync::Arc;

/// Serializes response payloads for one media type.
pub trait Renderer: Send + Sync + std::fmt::Debug {
    /// Concrete media type this renderer produces, e.g. `application/json`.
    fn media_type(&self) -> &'static str;

    /// Whether this renderer satisfies the given `Accept` header. A missing
    /// header accepts anything; `*/*` and `type/*` ranges match per RFC 9110.
    fn can_render(&self, accept: Option<&str>) -> bool {
        match accept {
            None => true,
            Some(header) => header
                .split(',')
                .filter_map(|part| part.split(';').next())
                .map(str::trim)
                .any(|range| media_range_matches(range, self.media_type())),
        }
    }

    /// Serialize the payload to response bytes.
    fn render(&self, payload: &Value) -> Result<Vec<u8>, RenderError>;
}

fn media_range_matches(range: &str, media_type: &str) -> bool {
    if range == "*/*" {
        return true;
    }
    if range.eq_ignore_ascii_case(media_type) {
        return true;
    }
    match (range.split_once('/'), media_type.split_once('/')) {
        (Some((rt, "*")), Some((mt, _))) => rt.eq_ignore_ascii_case(mt),
        _ => false,
    }
}

/// Default renderer: payload serialized as compact JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn media_type(&self) -> &'static str {
        "application/json"
    }

    fn render(&self, payload: &Value) -> Result<Vec<u8>, RenderError> {
        Ok(serde_json::to_vec(payload)?)
    }
}

/// Ordered renderer list held by one app instance.
///
/// Not global state: each [`AppService`](crate::server::AppService) owns its
/// own set, so multiple apps in one process stay independent.
#[derive(Clone)]
pub struct RendererSet {
    renderers: Vec<Arc<dyn Renderer>>,
}

impl RendererSet {
    #[must_use]
    pub fn new(renderers: Vec<Arc<dyn Renderer>>) -> Self {
        Self { renderers }
    }

    /// First registered renderer that can satisfy the `Accept` header.
    pub fn negotiate(&self, accept: Option<&str>) -> Result<&dyn Renderer, RenderError> {
        self.renderers
            .iter()
            .find(|r| r.can_render(accept))
            .map(AsRef::as_ref)
            .ok_or_else(|| RenderError::NoRendererAvailable {
                accept: accept.map(str::to_string),
            })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

impl Default for RendererSet {
    fn default() -> Self {
        Self::new(vec![Arc::new(JsonRenderer)])
    }
}

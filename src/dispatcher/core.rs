use crate::ids::RequestId;
use http::Method;
use may::sync::mpsc;
use serde::Serialize;
use serde_json::Value;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Maximum inline headers before heap allocation.
/// Most requests carry ≤16 headers.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated query-parameter storage for the hot path.
///
/// Names use `Arc<str>` because they repeat across requests and
/// `Arc::clone()` is an O(1) atomic increment; values are per-request data
/// and stay `String`.
pub type ParamVec = SmallVec<[(Arc<str>, String); 8]>;

/// Stack-allocated header storage, same key layout as [`ParamVec`].
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Handler coroutine stack size from `TYPEBIND_STACK_SIZE` (decimal or
/// `0x`-hex), defaulting to 64 KiB.
pub(crate) fn handler_stack_size() -> usize {
    std::env::var("TYPEBIND_STACK_SIZE")
        .ok()
        .and_then(|s| {
            if let Some(hex) = s.strip_prefix("0x") {
                usize::from_str_radix(hex, 16).ok()
            } else {
                s.parse().ok()
            }
        })
        .unwrap_or(0x10000)
}

/// Request data passed to a handler coroutine.
///
/// Carries the raw extracted request pieces: query multimap, headers, the
/// declared content type, and the body bytes exactly as read. Body decoding
/// belongs to the binding layer, which memoizes it per request.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    /// Unique request ID for tracing and correlation.
    pub request_id: RequestId,
    pub method: Method,
    pub path: String,
    /// Name of the handler that should process this request.
    pub handler_name: String,
    /// Query string parameters in wire order; duplicates preserved.
    pub query_params: ParamVec,
    /// HTTP headers (lowercase names).
    pub headers: HeaderVec,
    /// Declared `Content-Type`, if any.
    pub content_type: Option<String>,
    /// Raw body bytes, read at most once from the connection.
    pub body: Option<Vec<u8>>,
    /// Channel for sending the response back to the dispatcher.
    pub reply_tx: mpsc::Sender<HandlerResponse>,
}

impl HandlerRequest {
    /// Get a query parameter by name, last occurrence winning on duplicates
    /// (e.g. `?limit=10&limit=20` yields `20`).
    #[inline]
    #[must_use]
    pub fn get_query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a header by name (case-insensitive per RFC 7230).
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Response data sent back from a handler coroutine.
#[derive(Debug, Clone, Serialize)]
pub struct HandlerResponse {
    /// HTTP status code (200, 400, 500, ...).
    pub status: u16,
    #[serde(skip_serializing)]
    pub headers: HeaderVec,
    /// Response payload as a JSON value; `Value::String` is passed through
    /// as plain text by the service layer.
    pub body: Value,
}

impl HandlerResponse {
    #[must_use]
    pub fn new(status: u16, headers: HeaderVec, body: Value) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// JSON response with the content type already set.
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), "application/json".to_string()));
        Self {
            status,
            headers,
            body,
        }
    }

    /// Error response with a `{ "error": message }` body.
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }))
    }

    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Type alias for a channel sender that dispatches requests to a handler.
pub type HandlerSender = mpsc::Sender<HandlerRequest>;

/// Dispatcher that routes requests to registered handler coroutines.
#[derive(Clone, Default)]
pub struct Dispatcher {
    /// Map of handler names to their channel senders.
    pub handlers: HashMap<String, HandlerSender>,
}

impl Dispatcher {
    /// Create a new empty dispatcher. Handlers are registered with
    /// [`Dispatcher::register_typed`](crate::typed).
    #[must_use]
    pub fn new() -> Self {
        Dispatcher {
            handlers: HashMap::new(),
        }
    }

    /// Whether a handler is registered under `name`. Used by the app
    /// adapter to reject misconfigured route tables at startup.
    #[must_use]
    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Dispatch a request to the named handler coroutine and wait for its
    /// reply.
    ///
    /// Returns `None` if no handler is registered under `handler_name`.
    /// A closed reply channel (handler crashed or its coroutine exited)
    /// yields a 503 so the connection gets a response instead of a drop.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn dispatch(
        &self,
        handler_name: &str,
        method: Method,
        path: String,
        query_params: ParamVec,
        headers: HeaderVec,
        content_type: Option<String>,
        body: Option<Vec<u8>>,
    ) -> Option<HandlerResponse> {
        let request_id = RequestId::new();
        let (reply_tx, reply_rx) = mpsc::channel();

        let tx = match self.handlers.get(handler_name) {
            Some(tx) => tx,
            None => {
                error!(
                    handler_name = %handler_name,
                    available_handlers = self.handlers.len(),
                    "Handler not found"
                );
                return None;
            }
        };

        let request = HandlerRequest {
            request_id,
            method,
            path,
            handler_name: handler_name.to_string(),
            query_params,
            headers,
            content_type,
            body,
            reply_tx,
        };

        info!(
            request_id = %request_id,
            handler_name = %handler_name,
            method = %request.method,
            path = %request.path,
            "Request dispatched to handler"
        );

        let start = Instant::now();
        if let Err(e) = tx.send(request) {
            error!(
                request_id = %request_id,
                handler_name = %handler_name,
                error = %e,
                "Failed to send request to handler"
            );
            return None;
        }

        match reply_rx.recv() {
            Ok(response) => {
                debug!(
                    request_id = %request_id,
                    handler_name = %handler_name,
                    latency_ms = start.elapsed().as_millis() as u64,
                    status = response.status,
                    "Handler response received"
                );
                Some(response)
            }
            Err(e) => {
                error!(
                    request_id = %request_id,
                    handler_name = %handler_name,
                    error = %e,
                    "Handler channel closed - handler may have crashed"
                );
                Some(HandlerResponse::error(
                    503,
                    &format!("Handler '{handler_name}' is not responding"),
                ))
            }
        }
    }
}

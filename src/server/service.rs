use super::request::parse_request;
use super::response::{write_json_error, write_rendered, write_text};
use crate::dispatcher::Dispatcher;
use crate::error::ConfigError;
use crate::render::{RendererSet, Renderer};
use crate::route::{Route, RouteTable};
use http::Method;
use may_minihttp::{HttpService, Request, Response};
use serde_json::{json, Value};
use std::io;
use std::sync::Arc;
use tracing::error;

/// Application configuration surface.
///
/// `renderers` is the ordered response-renderer list, tried in registration
/// order during content negotiation. Defaults to JSON only. Held per app
/// instance; multiple apps in one process stay independent.
pub struct Settings {
    pub renderers: Vec<Arc<dyn Renderer>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            renderers: vec![Arc::new(crate::render::JsonRenderer)],
        }
    }
}

/// The app adapter: composes parameter binding and response rendering into
/// the `may_minihttp` request lifecycle so every registered route benefits
/// without per-route boilerplate.
#[derive(Clone)]
pub struct AppService {
    routes: Arc<RouteTable>,
    dispatcher: Arc<Dispatcher>,
    renderers: Arc<RendererSet>,
}

impl std::fmt::Debug for AppService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppService").finish_non_exhaustive()
    }
}

impl AppService {
    /// Build the service, validating the configuration.
    ///
    /// Fails with [`ConfigError`] when a route names a handler that was
    /// never registered or when two routes collide — misconfiguration stops
    /// the application from starting instead of failing per request.
    pub fn new(
        routes: Vec<Route>,
        dispatcher: Dispatcher,
        settings: Settings,
    ) -> Result<Self, ConfigError> {
        let table = RouteTable::build(routes)?;
        for (method, path, handler) in table.entries() {
            if !dispatcher.has_handler(handler) {
                return Err(ConfigError::UnknownHandler {
                    method: method.clone(),
                    path: path.to_string(),
                    handler: handler.to_string(),
                });
            }
        }
        Ok(Self {
            routes: Arc::new(table),
            dispatcher: Arc::new(dispatcher),
            renderers: Arc::new(RendererSet::new(settings.renderers)),
        })
    }
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let parsed = parse_request(req);

        let method = match parsed.method.parse::<Method>() {
            Ok(m) => m,
            Err(_) => {
                write_json_error(res, 400, json!({ "error": "unsupported method" }));
                return Ok(());
            }
        };

        let handler_name = match self.routes.lookup(&method, &parsed.path) {
            Some(name) => name.to_string(),
            None => {
                write_json_error(
                    res,
                    404,
                    json!({ "error": "Not Found", "method": parsed.method, "path": parsed.path }),
                );
                return Ok(());
            }
        };

        let accept = parsed.get_header("accept").map(str::to_string);
        let content_type = parsed.get_header("content-type").map(str::to_string);

        let handler_response = self.dispatcher.dispatch(
            &handler_name,
            method,
            parsed.path.clone(),
            parsed.query_params,
            parsed.headers,
            content_type,
            parsed.body,
        );

        let hr = match handler_response {
            Some(hr) => hr,
            None => {
                write_json_error(
                    res,
                    500,
                    json!({
                        "error": "Handler failed or not registered",
                        "path": parsed.path
                    }),
                );
                return Ok(());
            }
        };

        // Framework-produced errors (binding failures, panics, closed
        // channels) are written directly; renderer negotiation only applies
        // to handler payloads.
        if hr.status >= 400 {
            write_json_error(res, hr.status, hr.body);
            return Ok(());
        }

        match hr.body {
            // Plain strings pass through to the framework's default
            // rendering, untouched by the renderer list.
            Value::String(text) => write_text(res, hr.status, text),
            payload => match self.renderers.negotiate(accept.as_deref()) {
                Ok(renderer) => match renderer.render(&payload) {
                    Ok(bytes) => write_rendered(res, hr.status, bytes, renderer.media_type()),
                    Err(err) => {
                        error!(error = %err, "Failed to render response payload");
                        write_json_error(res, 500, json!({ "error": err.to_string() }));
                    }
                },
                Err(err) => {
                    // Server misconfiguration: the renderer list cannot
                    // satisfy this request.
                    error!(error = %err, accept = ?accept, "No renderer available");
                    write_json_error(res, 500, json!({ "error": err.to_string() }));
                }
            },
        }

        Ok(())
    }
}

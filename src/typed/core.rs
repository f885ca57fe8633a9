use crate::bind::{BindArgs, RequestContext};
use crate::dispatcher::{
    handler_stack_size, Dispatcher, HandlerRequest, HandlerResponse, HandlerSender, ParamVec,
};
use http::Method;
use may::sync::mpsc;
use serde::Serialize;
use tracing::error;

/// Trait implemented by typed coroutine handlers.
///
/// `Args` is a tuple of location-tagged parameter types; every element binds
/// to a validated schema model before [`Handler::handle`] is invoked.
pub trait Handler: Send + 'static {
    /// The bindable argument tuple, e.g. `(QueryData<City>, BodyData<Computer>)`.
    type Args: BindArgs + Send + 'static;
    /// The response payload, serialized to JSON (a plain `String` passes
    /// through as text).
    type Response: Serialize + Send + 'static;

    fn handle(&self, req: BoundRequest<Self::Args>) -> Self::Response;
}

/// Request data passed to a typed handler.
///
/// Carries the bound, validated arguments plus the raw request metadata the
/// binding layer does not intercept (method, path, query multimap), so
/// handlers keep their native access to those.
#[derive(Debug, Clone)]
pub struct BoundRequest<T> {
    pub method: Method,
    pub path: String,
    pub handler_name: String,
    /// Raw query parameters in wire order, untouched by binding.
    pub query_params: ParamVec,
    /// Bound and validated handler arguments.
    pub args: T,
}

/// Spawn a typed handler coroutine and return a sender to communicate with it.
///
/// # Safety
///
/// Calls `may::coroutine::Builder::spawn()`, which is unsafe per the `may`
/// runtime. The caller must ensure the runtime is initialized and that the
/// handler is safe to run concurrently.
pub unsafe fn spawn_typed<H>(handler: H) -> anyhow::Result<HandlerSender>
where
    H: Handler,
{
    let (tx, rx) = mpsc::channel::<HandlerRequest>();
    let stack_size = handler_stack_size();

    // SAFETY: spawn is unsafe per the may runtime contract; handler and
    // request data are Send + 'static and every request is answered through
    // its reply channel.
    unsafe {
        may::coroutine::Builder::new()
            .stack_size(stack_size)
            .spawn(move || {
                for req in rx.iter() {
                    let reply_tx = req.reply_tx.clone();
                    let handler_name = req.handler_name.clone();

                    // catch_unwind keeps a panicking handler from killing the
                    // coroutine; the client gets a 500 instead.
                    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                        let ctx = RequestContext::new(
                            req.query_params.clone(),
                            req.content_type.clone(),
                            req.body.clone(),
                        );

                        let args = match H::Args::bind(&ctx) {
                            Ok(args) => args,
                            Err(err) => {
                                let _ = reply_tx.send(HandlerResponse::json(400, err.to_body()));
                                return;
                            }
                        };

                        let bound = BoundRequest {
                            method: req.method.clone(),
                            path: req.path.clone(),
                            handler_name: req.handler_name.clone(),
                            query_params: req.query_params.clone(),
                            args,
                        };

                        let payload = handler.handle(bound);

                        match serde_json::to_value(payload) {
                            Ok(body) => {
                                let _ = reply_tx.send(HandlerResponse::json(200, body));
                            }
                            Err(err) => {
                                error!(
                                    handler_name = %req.handler_name,
                                    error = %err,
                                    "Failed to serialize handler response"
                                );
                                let _ = reply_tx.send(HandlerResponse::error(
                                    500,
                                    "failed to serialize response",
                                ));
                            }
                        }
                    }));

                    if let Err(panic) = result {
                        error!(
                            handler_name = %handler_name,
                            panic = ?panic,
                            "Handler panicked"
                        );
                        let _ = reply_tx.send(HandlerResponse::error(500, "handler panicked"));
                    }
                }
            })
            .map_err(|e| anyhow::anyhow!("failed to spawn handler coroutine: {e}"))?;
    }

    Ok(tx)
}

impl Dispatcher {
    /// Register a typed handler under `name`, spawning its coroutine.
    ///
    /// Replaces any handler previously registered under the same name; the
    /// old sender is dropped, which closes its channel and lets the old
    /// coroutine exit.
    ///
    /// # Safety
    ///
    /// Same requirements as [`spawn_typed`]: the May coroutine runtime must
    /// be initialized before calling this.
    pub unsafe fn register_typed<H>(&mut self, name: &str, handler: H) -> anyhow::Result<()>
    where
        H: Handler,
    {
        let tx = spawn_typed(handler)?;
        self.handlers.insert(name.to_string(), tx);
        Ok(())
    }
}

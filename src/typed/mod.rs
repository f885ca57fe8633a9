//! # Typed Module
//!
//! Type-safe handler invocation. A [`Handler`] declares the argument tuple
//! it expects (`Args: BindArgs`) and the serializable payload it returns;
//! the spawned coroutine binds the arguments from the request context before
//! the handler body runs and serializes the return value afterwards.
//!
//! Binding failures never reach the handler: the coroutine replies 400 with
//! the aggregated failure list. Handler panics are caught and become 500
//! replies.

mod core;

pub use core::{spawn_typed, BoundRequest, Handler};

//! Coroutine-based request handler dispatch.
//!
//! The dispatcher keeps a registry of handler names to MPSC channel senders.
//! Each handler runs in its own `may` coroutine, spawned once at startup;
//! requests are sent to it over the channel together with a one-shot reply
//! channel for the response. Handler panics are caught and become 500
//! replies, so one failing handler cannot take the server down.
//!
//! Stack size for handler coroutines is configurable via the
//! `TYPEBIND_STACK_SIZE` environment variable (decimal or `0x`-hex,
//! default `0x10000`).

mod core;

pub(crate) use core::handler_stack_size;
pub use core::{
    Dispatcher, HandlerRequest, HandlerResponse, HandlerSender, HeaderVec, ParamVec,
    MAX_INLINE_HEADERS,
};

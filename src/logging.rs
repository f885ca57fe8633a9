//! Tracing initialization.
//!
//! Filtering follows `RUST_LOG`; defaults to `info` when unset. Safe to call
//! more than once (later calls are no-ops), which keeps test binaries happy.

use tracing_subscriber::EnvFilter;

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

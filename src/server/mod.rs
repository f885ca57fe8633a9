//! HTTP service layer: request parsing, response writing, and the app
//! adapter wiring binding and rendering into `may_minihttp`.

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_query_params, parse_request, ParsedRequest};
pub use service::{AppService, Settings};

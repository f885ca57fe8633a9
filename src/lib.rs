//! # typebind
//!
//! Typed, validated parameter binding and response rendering for
//! `may_minihttp` request handlers, built on the `may` coroutine runtime.
//!
//! Handlers declare location-tagged model parameters instead of parsing raw
//! request data. The binding layer extracts the raw bytes or fields each
//! parameter's location marker points at (query string, JSON body, form
//! body), validates them into the declared serde model, and invokes the
//! handler with the bound instances; the rendering layer serializes the
//! handler's return value through a configurable renderer list.
//!
//! ## Modules
//!
//! - [`bind`] - location markers, model wrappers, and the parameter resolver
//! - [`schema`] - the contract owed to the external validation library
//! - [`render`] - response renderers and content negotiation
//! - [`dispatcher`] - coroutine-based handler dispatch
//! - [`typed`] - type-safe handler trait and spawn loop
//! - [`route`] - exact-match route registration
//! - [`server`] - `may_minihttp` app adapter and server wrapper
//!
//! ## Example
//!
//! ```rust,no_run
//! use http::Method;
//! use serde::{Deserialize, Serialize};
//! use typebind::bind::QueryData;
//! use typebind::dispatcher::Dispatcher;
//! use typebind::route::Route;
//! use typebind::server::{AppService, HttpServer, Settings};
//! use typebind::typed::{BoundRequest, Handler};
//!
//! #[derive(Serialize, Deserialize)]
//! struct City {
//!     name: String,
//!     population: i64,
//! }
//!
//! #[derive(Clone)]
//! struct CityHandler;
//!
//! impl Handler for CityHandler {
//!     type Args = (QueryData<City>,);
//!     type Response = String;
//!
//!     fn handle(&self, req: BoundRequest<Self::Args>) -> String {
//!         let (city,) = req.args;
//!         format!("{} has {} citizens.", city.name, city.population)
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut dispatcher = Dispatcher::new();
//!     unsafe { dispatcher.register_typed("city_detail", CityHandler)? };
//!
//!     let service = AppService::new(
//!         vec![Route::new(Method::GET, "/city", "city_detail")],
//!         dispatcher,
//!         Settings::default(),
//!     )?;
//!     HttpServer(service).start("127.0.0.1:3000")?.join().ok();
//!     Ok(())
//! }
//! ```
//!
//! ## Runtime considerations
//!
//! Handlers run in `may` coroutines, one per registered handler, spawned at
//! startup. Stack size is configurable via `TYPEBIND_STACK_SIZE`. No state
//! is shared between requests; the only per-request shared resource is the
//! memoized body buffer inside [`bind::RequestContext`].

pub mod bind;
pub mod dispatcher;
pub mod error;
pub mod ids;
pub mod logging;
pub mod render;
pub mod route;
pub mod schema;
pub mod server;
pub mod typed;

pub use bind::{Bind, BindArgs, BodyData, FormData, Location, QueryData, RequestContext};
pub use error::{BindError, BindFailure, ConfigError, RenderError, ResolveError, ValidationFailure};
pub use render::{JsonRenderer, Renderer};
pub use route::Route;
pub use schema::SchemaModel;
pub use server::{AppService, HttpServer, ServerHandle, Settings};
pub use typed::{BoundRequest, Handler};

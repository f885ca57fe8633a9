//! # Bind Module
//!
//! Location-tagged parameter binding: the association between a handler
//! parameter's declared type, the place in the request its raw data comes
//! from, and the schema model it must validate against.
//!
//! ## Declaration styles
//!
//! Two equivalent styles are supported. Wrapping a schema generically:
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use typebind::bind::QueryData;
//!
//! #[derive(Serialize, Deserialize)]
//! struct City {
//!     name: String,
//!     population: i64,
//! }
//!
//! // handler argument tuple: (QueryData<City>,)
//! ```
//!
//! Or registering the location directly on the schema:
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use typebind::bind_location;
//!
//! #[derive(Serialize, Deserialize)]
//! struct City {
//!     name: String,
//!     population: i64,
//! }
//!
//! bind_location!(City, Query);
//! // handler argument tuple: (City,)
//! ```
//!
//! Both resolve identically: extract raw data per the marker's strategy,
//! validate against the schema, hand the instance to the handler. A
//! parameter either binds to a validated model or the request fails with a
//! 400 before the handler body executes.
//!
//! ## Duplicate keys
//!
//! Duplicate query-string and form keys resolve last-wins, so later values
//! override earlier ones.

mod context;
mod location;
mod resolve;
mod wrapper;

pub use context::RequestContext;
pub use location::Location;
pub use resolve::{resolve, BindArgs};
pub use wrapper::{Bind, BodyData, FormData, QueryData};

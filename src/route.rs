//! Route registration surface for the app adapter.
//!
//! Routes are exact-match `(method, path)` entries naming a registered
//! handler, mirroring the host framework's own route-list shape. Pattern
//! routing and path parameters stay with the host; this table only decides
//! which handler a request reaches.

use crate::error::ConfigError;
use http::Method;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub path: String,
    pub handler_name: String,
}

impl Route {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>, handler_name: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            handler_name: handler_name.into(),
        }
    }
}

/// Immutable exact-match lookup table, built once at startup.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: HashMap<(Method, String), String>,
}

impl RouteTable {
    /// Build the table, rejecting duplicate `(method, path)` registrations.
    pub fn build(routes: Vec<Route>) -> Result<Self, ConfigError> {
        let mut table = HashMap::new();
        for route in routes {
            let key = (route.method.clone(), route.path.clone());
            if table.contains_key(&key) {
                return Err(ConfigError::DuplicateRoute {
                    method: route.method,
                    path: route.path,
                });
            }
            table.insert(key, route.handler_name);
        }
        Ok(Self { routes: table })
    }

    #[must_use]
    pub fn lookup(&self, method: &Method, path: &str) -> Option<&str> {
        self.routes
            .get(&(method.clone(), path.to_string()))
            .map(String::as_str)
    }

    /// All `(method, path, handler)` entries, for startup validation.
    pub fn entries(&self) -> impl Iterator<Item = (&Method, &str, &str)> {
        self.routes
            .iter()
            .map(|((method, path), handler)| (method, path.as_str(), handler.as_str()))
    }
}

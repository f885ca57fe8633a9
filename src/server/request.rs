use crate::dispatcher::{HeaderVec, ParamVec};
use may_minihttp::Request;
use std::io::Read;
use std::sync::Arc;
use tracing::debug;

/// Parsed HTTP request data used by `AppService`.
#[derive(Debug, PartialEq)]
pub struct ParsedRequest {
    /// HTTP method (GET, POST, ...).
    pub method: String,
    /// Request path without the query string.
    pub path: String,
    /// HTTP headers (lowercase names).
    pub headers: HeaderVec,
    /// Query string parameters in wire order; duplicates preserved so the
    /// binding layer can apply its last-wins collapse.
    pub query_params: ParamVec,
    /// Raw body bytes, if the request carried any.
    pub body: Option<Vec<u8>>,
}

impl ParsedRequest {
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Parse query string parameters from a URL path, preserving order and
/// duplicates. Names and values are percent-decoded.
#[must_use]
pub fn parse_query_params(path: &str) -> ParamVec {
    let mut params = ParamVec::new();
    if let Some(pos) = path.find('?') {
        let query_str = &path[pos + 1..];
        for (k, v) in url::form_urlencoded::parse(query_str.as_bytes()) {
            params.push((Arc::from(k.as_ref()), v.into_owned()));
        }
    }
    params
}

/// Extract method, path, headers, query parameters, and raw body bytes from
/// a `may_minihttp::Request`. The body stream is consumed here, exactly once.
pub fn parse_request(req: Request) -> ParsedRequest {
    let method = req.method().to_string();
    let raw_path = req.path().to_string();
    let path = raw_path.split('?').next().unwrap_or("/").to_string();

    let headers: HeaderVec = req
        .headers()
        .iter()
        .map(|h| {
            (
                Arc::from(h.name.to_ascii_lowercase().as_str()),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    let query_params = parse_query_params(&raw_path);

    let body = {
        let mut bytes = Vec::new();
        match req.body().read_to_end(&mut bytes) {
            Ok(n) if n > 0 => Some(bytes),
            _ => None,
        }
    };

    debug!(
        method = %method,
        path = %path,
        header_count = headers.len(),
        query_count = query_params.len(),
        body_bytes = body.as_ref().map_or(0, Vec::len),
        "HTTP request parsed"
    );

    ParsedRequest {
        method,
        path,
        headers,
        query_params,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_params() {
        let q = parse_query_params("/p?x=1&y=2");
        assert_eq!(q.len(), 2);
        assert_eq!(q[0], (Arc::from("x"), "1".to_string()));
        assert_eq!(q[1], (Arc::from("y"), "2".to_string()));
    }

    #[test]
    fn test_parse_query_params_keeps_duplicates() {
        let q = parse_query_params("/p?x=1&x=2");
        assert_eq!(q.len(), 2);
        assert_eq!(q[1].1, "2");
    }

    #[test]
    fn test_parse_query_params_none() {
        assert!(parse_query_params("/p").is_empty());
    }
}

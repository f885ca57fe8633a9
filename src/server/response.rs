use may_minihttp::Response;
use serde_json::Value;

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "OK",
    }
}

/// Write rendered payload bytes with the renderer's media type.
pub fn write_rendered(res: &mut Response, status: u16, bytes: Vec<u8>, media_type: &str) {
    res.status_code(status as usize, status_reason(status));
    match media_type {
        "application/json" => res.header("Content-Type: application/json"),
        "text/plain" => res.header("Content-Type: text/plain"),
        other => {
            // may_minihttp wants 'static headers; uncommon media types leak
            // one small string per response.
            let header = format!("Content-Type: {other}").into_boxed_str();
            res.header(Box::leak(header))
        }
    };
    res.body_vec(bytes);
}

/// Write a plain-string payload untouched, the host framework's default
/// rendering for non-model return values.
pub fn write_text(res: &mut Response, status: u16, text: String) {
    res.status_code(status as usize, status_reason(status));
    res.header("Content-Type: text/plain");
    res.body_vec(text.into_bytes());
}

/// Write a structured JSON error body, bypassing renderer negotiation so
/// diagnostics still reach the client when rendering itself is the problem.
pub fn write_json_error(res: &mut Response, status: u16, body: Value) {
    res.status_code(status as usize, status_reason(status));
    res.header("Content-Type: application/json");
    res.body_vec(body.to_string().into_bytes());
}

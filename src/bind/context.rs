use crate::dispatcher::ParamVec;
use crate::error::BindError;
use once_cell::sync::OnceCell;
use serde_json::Value;

/// Read-only per-request view onto the raw data the resolver may extract.
///
/// Lifetime is one HTTP request. The body is read from the connection at
/// most once; its decoded JSON object and form fields are memoized here so
/// several body-bound parameters never re-read or re-parse it. Nothing in
/// this struct survives the request.
#[derive(Debug)]
pub struct RequestContext {
    query_params: ParamVec,
    content_type: Option<String>,
    body: Option<Vec<u8>>,
    // Decode outcomes are cached, including failures, so every parameter
    // bound to the body observes the same result.
    json_body: OnceCell<Result<Value, String>>,
    form_fields: OnceCell<Result<Vec<(String, String)>, String>>,
}

impl RequestContext {
    #[must_use]
    pub fn new(query_params: ParamVec, content_type: Option<String>, body: Option<Vec<u8>>) -> Self {
        Self {
            query_params,
            content_type,
            body,
            json_body: OnceCell::new(),
            form_fields: OnceCell::new(),
        }
    }

    /// Declared `Content-Type`, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Query-string fields collapsed to a plain mapping, last value winning
    /// on duplicate keys.
    #[must_use]
    pub fn query_fields(&self) -> Vec<(String, String)> {
        collapse_last_wins(
            self.query_params
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone())),
        )
    }

    /// The body decoded as a JSON object.
    ///
    /// Fails with [`BindError::MalformedBody`] when the body is empty, not
    /// valid JSON, or not a JSON object.
    pub fn json_object(&self) -> Result<&Value, BindError> {
        let decoded = self.json_body.get_or_init(|| {
            let bytes = match self.body.as_deref() {
                Some(b) if !b.is_empty() => b,
                _ => return Err("request body is empty".to_string()),
            };
            let value: Value = serde_json::from_slice(bytes)
                .map_err(|err| format!("invalid JSON: {err}"))?;
            if !value.is_object() {
                return Err("JSON body must be an object".to_string());
            }
            Ok(value)
        });
        decoded
            .as_ref()
            .map_err(|msg| BindError::MalformedBody(msg.clone()))
    }

    /// The body decoded as URL-encoded form fields, duplicates collapsed
    /// last-wins. An absent body yields an empty field list; schema
    /// validation then reports the missing fields.
    pub fn form_fields(&self) -> Result<&[(String, String)], BindError> {
        let decoded = self.form_fields.get_or_init(|| {
            let bytes = self.body.as_deref().unwrap_or(&[]);
            if std::str::from_utf8(bytes).is_err() {
                return Err("form body is not valid UTF-8".to_string());
            }
            let pairs = url::form_urlencoded::parse(bytes)
                .map(|(k, v)| (k.into_owned(), v.into_owned()));
            Ok(collapse_last_wins(pairs))
        });
        decoded
            .as_ref()
            .map(Vec::as_slice)
            .map_err(|msg| BindError::MalformedBody(msg.clone()))
    }
}

/// Collapse duplicate keys, keeping the last occurrence in its original
/// relative position of first appearance.
fn collapse_last_wins(pairs: impl Iterator<Item = (String, String)>) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = Vec::new();
    for (name, value) in pairs {
        if let Some(existing) = fields.iter_mut().find(|(k, _)| *k == name) {
            existing.1 = value;
        } else {
            fields.push((name, value));
        }
    }
    fields
}

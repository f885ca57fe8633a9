//! Tests for location-tagged parameter binding.
//!
//! # Test Coverage
//!
//! Validates the parameter resolver's core responsibilities:
//! - Query-string binding with type coercion (string -> int)
//! - JSON body binding, including malformed/empty/non-object bodies
//! - URL-encoded form body binding
//! - Last-wins duplicate key resolution for query and form data
//! - Both declaration styles (generic wrapper and `bind_location!`)
//! - Aggregated failure reporting across a multi-parameter signature

use serde::{Deserialize, Serialize};
use smallvec::smallvec;
use std::sync::Arc;
use typebind::bind::{BindArgs, BodyData, FormData, QueryData, RequestContext};
use typebind::bind_location;
use typebind::dispatcher::ParamVec;
use typebind::error::BindError;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct City {
    name: String,
    population: i64,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Computer {
    model: String,
    price: f64,
}

// Registration style: the schema itself is the parameter type.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Login {
    username: String,
    password: String,
}

bind_location!(Login, Form);

fn query_ctx(pairs: &[(&str, &str)]) -> RequestContext {
    let params: ParamVec = pairs
        .iter()
        .map(|(k, v)| (Arc::from(*k), v.to_string()))
        .collect();
    RequestContext::new(params, None, None)
}

fn json_ctx(body: &str) -> RequestContext {
    RequestContext::new(
        ParamVec::new(),
        Some("application/json".to_string()),
        Some(body.as_bytes().to_vec()),
    )
}

fn form_ctx(body: &str) -> RequestContext {
    RequestContext::new(
        ParamVec::new(),
        Some("application/x-www-form-urlencoded".to_string()),
        Some(body.as_bytes().to_vec()),
    )
}

#[test]
fn test_query_binding_coerces_fields() {
    let ctx = query_ctx(&[("name", "Springfield"), ("population", "30000")]);
    let (city,) = <(QueryData<City>,)>::bind(&ctx).unwrap();
    assert_eq!(city.name, "Springfield");
    assert_eq!(city.population, 30000);
}

#[test]
fn test_query_binding_duplicate_keys_last_wins() {
    let ctx = query_ctx(&[
        ("name", "Springfield"),
        ("population", "1"),
        ("population", "30000"),
    ]);
    let (city,) = <(QueryData<City>,)>::bind(&ctx).unwrap();
    assert_eq!(city.population, 30000);
}

#[test]
fn test_query_binding_missing_field_names_it() {
    let ctx = query_ctx(&[("name", "Springfield")]);
    let err = <(QueryData<City>,)>::bind(&ctx).unwrap_err();
    assert_eq!(err.failures.len(), 1);
    assert_eq!(err.failures[0].parameter, "City");
    assert_eq!(err.failures[0].kind, "validation_failed");
    assert_eq!(err.failures[0].field.as_deref(), Some("population"));
}

#[test]
fn test_json_body_binding() {
    let ctx = json_ctx(r#"{"model": "ZX Spectrum", "price": 99.9}"#);
    let (computer,) = <(BodyData<Computer>,)>::bind(&ctx).unwrap();
    assert_eq!(computer.model, "ZX Spectrum");
    assert!((computer.price - 99.9).abs() < f64::EPSILON);
}

#[test]
fn test_json_body_not_json_is_malformed() {
    let ctx = json_ctx("not json");
    let err = <(BodyData<Computer>,)>::bind(&ctx).unwrap_err();
    assert_eq!(err.failures[0].kind, "malformed_body");
}

#[test]
fn test_json_body_empty_is_malformed() {
    let ctx = RequestContext::new(ParamVec::new(), Some("application/json".to_string()), None);
    let err = <(BodyData<Computer>,)>::bind(&ctx).unwrap_err();
    assert_eq!(err.failures[0].kind, "malformed_body");
    assert!(err.failures[0].detail.contains("empty"));
}

#[test]
fn test_json_body_non_object_is_malformed() {
    let ctx = json_ctx("[1, 2, 3]");
    let err = <(BodyData<Computer>,)>::bind(&ctx).unwrap_err();
    assert_eq!(err.failures[0].kind, "malformed_body");
    assert!(err.failures[0].detail.contains("object"));
}

#[test]
fn test_json_body_missing_field_is_validation_failure() {
    let ctx = json_ctx(r#"{"model": "ZX Spectrum"}"#);
    let err = <(BodyData<Computer>,)>::bind(&ctx).unwrap_err();
    assert_eq!(err.failures[0].kind, "validation_failed");
    assert_eq!(err.failures[0].field.as_deref(), Some("price"));
}

#[test]
fn test_form_body_binding_wrapper_style() {
    let ctx = form_ctx("username=homer&password=doh");
    let (login,) = <(FormData<Login>,)>::bind(&ctx).unwrap();
    assert_eq!(login.username, "homer");
    assert_eq!(login.password, "doh");
}

#[test]
fn test_form_body_binding_registered_style() {
    // `bind_location!(Login, Form)` makes the bare schema bindable too.
    let ctx = form_ctx("username=homer&password=doh");
    let (login,) = <(Login,)>::bind(&ctx).unwrap();
    assert_eq!(
        login,
        Login {
            username: "homer".to_string(),
            password: "doh".to_string(),
        }
    );
}

#[test]
fn test_form_body_duplicate_keys_last_wins() {
    let ctx = form_ctx("username=homer&username=marge&password=doh");
    let (login,) = <(FormData<Login>,)>::bind(&ctx).unwrap();
    assert_eq!(login.username, "marge");
}

#[test]
fn test_form_body_percent_decoding() {
    let ctx = form_ctx("username=homer+simpson&password=d%26oh");
    let (login,) = <(FormData<Login>,)>::bind(&ctx).unwrap();
    assert_eq!(login.username, "homer simpson");
    assert_eq!(login.password, "d&oh");
}

#[test]
fn test_two_parameter_binding() {
    let params: ParamVec = smallvec![
        (Arc::from("name"), "Springfield".to_string()),
        (Arc::from("population"), "30000".to_string()),
    ];
    let ctx = RequestContext::new(
        params,
        Some("application/json".to_string()),
        Some(br#"{"model": "ZX Spectrum", "price": 99.9}"#.to_vec()),
    );
    let (city, computer) = <(QueryData<City>, BodyData<Computer>)>::bind(&ctx).unwrap();
    assert_eq!(city.name, "Springfield");
    assert_eq!(computer.model, "ZX Spectrum");
}

#[test]
fn test_failures_aggregate_in_declaration_order() {
    // Both parameters fail: query is missing a field, body is not JSON.
    let params: ParamVec = smallvec![(Arc::from("name"), "Springfield".to_string())];
    let ctx = RequestContext::new(params, None, Some(b"not json".to_vec()));
    let err = <(QueryData<City>, BodyData<Computer>)>::bind(&ctx).unwrap_err();
    assert_eq!(err.failures.len(), 2);
    assert_eq!(err.failures[0].parameter, "City");
    assert_eq!(err.failures[0].kind, "validation_failed");
    assert_eq!(err.failures[1].parameter, "Computer");
    assert_eq!(err.failures[1].kind, "malformed_body");
}

#[test]
fn test_body_decoded_once_for_multiple_parameters() {
    // Two parameters reference the body; the memoized decode serves both.
    let ctx = json_ctx(r#"{"model": "ZX Spectrum", "price": 99.9}"#);
    let (a, b) = <(BodyData<Computer>, BodyData<Computer>)>::bind(&ctx).unwrap();
    assert_eq!(a.model, b.model);
}

#[test]
fn test_json_object_error_is_malformed_body() {
    let ctx = json_ctx("{broken");
    assert!(matches!(
        ctx.json_object(),
        Err(BindError::MalformedBody(_))
    ));
}

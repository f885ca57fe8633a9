//! The contract owed to the external schema-validation library.
//!
//! A schema model is any user-authored struct that can be constructed from
//! raw request data and exported back to a plain mapping. The blanket impl
//! covers every `Serialize + DeserializeOwned` type, so integrators only
//! derive serde traits on their models; field-level coercion and constraint
//! checks stay with serde.

use crate::error::ValidationFailure;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub trait SchemaModel: Sized {
    /// Construct from a decoded JSON mapping (request body).
    fn from_mapping(mapping: Value) -> Result<Self, ValidationFailure>;

    /// Construct from raw string fields (query string or form body).
    ///
    /// Strings are coerced to the declared field types, so
    /// `population=30000` satisfies an integer field.
    fn from_fields(fields: &[(String, String)]) -> Result<Self, ValidationFailure>;

    /// Export the model to a plain JSON mapping.
    fn to_mapping(&self) -> Result<Value, serde_json::Error>;
}

impl<T> SchemaModel for T
where
    T: Serialize + DeserializeOwned,
{
    fn from_mapping(mapping: Value) -> Result<Self, ValidationFailure> {
        serde_json::from_value(mapping)
            .map_err(|err| ValidationFailure::from_detail(err.to_string()))
    }

    fn from_fields(fields: &[(String, String)]) -> Result<Self, ValidationFailure> {
        let mut encoder = url::form_urlencoded::Serializer::new(String::new());
        for (name, value) in fields {
            encoder.append_pair(name, value);
        }
        let encoded = encoder.finish();
        serde_urlencoded::from_str(&encoded)
            .map_err(|err| ValidationFailure::from_detail(err.to_string()))
    }

    fn to_mapping(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

use super::location::Location;
use crate::schema::SchemaModel;
use std::ops::{Deref, DerefMut};

/// Associates a handler parameter type with one location marker and one
/// schema model.
///
/// Implemented by the generic wrappers ([`QueryData`], [`BodyData`],
/// [`FormData`]) and, via [`bind_location!`](crate::bind_location), by schema
/// types directly. The resolver never inspects anything else: the location
/// picks the extraction strategy, the model does the validation.
pub trait Bind: Sized {
    const LOCATION: Location;
    type Model: SchemaModel;

    /// Wrap a validated model into the declared parameter type.
    fn from_model(model: Self::Model) -> Self;

    /// Short model name used in binding diagnostics.
    #[must_use]
    fn parameter() -> &'static str {
        let name = std::any::type_name::<Self::Model>();
        name.rsplit("::").next().unwrap_or(name)
    }
}

macro_rules! wrapper {
    ($(#[$doc:meta])* $name:ident, $location:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name<T>(pub T);

        impl<T> $name<T> {
            #[must_use]
            pub fn into_inner(self) -> T {
                self.0
            }
        }

        impl<T> Deref for $name<T> {
            type Target = T;

            fn deref(&self) -> &T {
                &self.0
            }
        }

        impl<T> DerefMut for $name<T> {
            fn deref_mut(&mut self) -> &mut T {
                &mut self.0
            }
        }

        impl<T: SchemaModel> Bind for $name<T> {
            const LOCATION: Location = Location::$location;
            type Model = T;

            fn from_model(model: T) -> Self {
                Self(model)
            }
        }
    };
}

wrapper!(
    /// Schema model validated from the query string.
    QueryData,
    Query
);
wrapper!(
    /// Schema model validated from a JSON request body.
    BodyData,
    Json
);
wrapper!(
    /// Schema model validated from a URL-encoded form body.
    FormData,
    Form
);

/// Register a location marker directly on a schema type, making the schema
/// itself usable as a handler parameter.
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use typebind::bind_location;
///
/// #[derive(Serialize, Deserialize)]
/// struct Computer {
///     model: String,
///     price: f64,
/// }
///
/// bind_location!(Computer, Json);
/// ```
#[macro_export]
macro_rules! bind_location {
    ($model:ty, $location:ident) => {
        impl $crate::bind::Bind for $model {
            const LOCATION: $crate::bind::Location = $crate::bind::Location::$location;
            type Model = $model;

            fn from_model(model: Self::Model) -> Self {
                model
            }
        }
    };
}

use super::context::RequestContext;
use super::location::Location;
use super::wrapper::Bind;
use crate::error::{BindError, BindFailure, ResolveError};
use crate::schema::SchemaModel;

/// Resolve one location-tagged parameter against the request context.
///
/// The marker's location picks the extraction strategy; the extracted raw
/// data is validated into the parameter's schema model.
pub fn resolve<B: Bind>(ctx: &RequestContext) -> Result<B, BindError> {
    let model = match B::LOCATION {
        Location::Query => {
            B::Model::from_fields(&ctx.query_fields()).map_err(BindError::ValidationFailed)?
        }
        Location::Json => {
            let mapping = ctx.json_object()?.clone();
            B::Model::from_mapping(mapping).map_err(BindError::ValidationFailed)?
        }
        Location::Form => {
            let fields = ctx.form_fields()?;
            B::Model::from_fields(fields).map_err(BindError::ValidationFailed)?
        }
    };
    Ok(B::from_model(model))
}

/// A handler's full bindable argument tuple.
///
/// Implemented for tuples of [`Bind`] types up to arity four. Parameters
/// resolve independently, in declaration order, and every failing parameter
/// is reported; no parameter's resolution depends on another's value.
pub trait BindArgs: Sized {
    fn bind(ctx: &RequestContext) -> Result<Self, ResolveError>;
}

impl BindArgs for () {
    fn bind(_ctx: &RequestContext) -> Result<Self, ResolveError> {
        Ok(())
    }
}

macro_rules! impl_bind_args {
    ($($name:ident : $ty:ident),+) => {
        impl<$($ty: Bind),+> BindArgs for ($($ty,)+) {
            fn bind(ctx: &RequestContext) -> Result<Self, ResolveError> {
                let mut failures = Vec::new();
                $(
                    let $name: Option<$ty> = match resolve::<$ty>(ctx) {
                        Ok(value) => Some(value),
                        Err(err) => {
                            failures.push(BindFailure::new($ty::parameter(), err));
                            None
                        }
                    };
                )+
                match ($($name,)+) {
                    ($(Some($name),)+) => Ok(($($name,)+)),
                    _ => Err(ResolveError { failures }),
                }
            }
        }
    };
}

impl_bind_args!(a: A);
impl_bind_args!(a: A, b: B);
impl_bind_args!(a: A, b: B, c: C);
impl_bind_args!(a: A, b: B, c: C, d: D);

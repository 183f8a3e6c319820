use crate::error::InertiaError;
use crate::req_type::InertiaRequestType;
use crate::utils::convert_struct_to_map;
use crate::Component;
use actix_web::HttpRequest;
use futures::future::{try_join_all, LocalBoxFuture};
use futures::FutureExt;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::future::{ready, Future};
use std::sync::Arc;

pub type PropFuture = LocalBoxFuture<'static, Result<Value, InertiaError>>;
pub type PropCallback = Arc<dyn Fn(&HttpRequest) -> PropFuture + Send + Sync>;

/// A prop that is only evaluated and sent when the client explicitly asks for it in a
/// partial reload of the component being rendered.
#[derive(Clone)]
pub struct LazyProp(Arc<dyn Fn() -> PropFuture + Send + Sync>);

impl LazyProp {
    pub fn new<F, Fut>(callback: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, InertiaError>> + 'static,
    {
        Self(Arc::new(move || callback().boxed_local()))
    }

    pub fn sync<F>(callback: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::new(move || ready(Ok(callback())))
    }

    #[inline]
    pub(crate) fn lazy_value(&self) -> PropFuture {
        (self.0)()
    }
}

#[derive(Clone)]
pub enum InertiaProp {
    /// - ALWAYS included on standard visits
    /// - OPTIONALLY included on partial reloads
    /// - ALWAYS evaluated
    Data(Value),
    /// - ALWAYS included on standard visits
    /// - OPTIONALLY included on partial reloads
    /// - ONLY evaluated when included, with the current request
    Callback(PropCallback),
    /// - NEVER included on standard visits
    /// - OPTIONALLY included on partial reloads
    /// - ONLY evaluated when included
    Lazy(LazyProp),
}

pub type InertiaProps = HashMap<String, InertiaProp>;

impl InertiaProp {
    /// Serializes `value` into a [`InertiaProp::Data`].
    pub fn data<T: Serialize>(value: T) -> Result<Self, InertiaError> {
        serde_json::to_value(value).map(Self::Data).map_err(|err| {
            InertiaError::SerializationError(format!("Prop is not JSON serializable: {}", err))
        })
    }

    pub fn callback<F, Fut>(callback: F) -> Self
    where
        F: Fn(&HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, InertiaError>> + 'static,
    {
        Self::Callback(Arc::new(move |req: &HttpRequest| callback(req).boxed_local()))
    }

    pub fn lazy<F, Fut>(callback: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, InertiaError>> + 'static,
    {
        Self::Lazy(LazyProp::new(callback))
    }

    pub fn lazy_sync<F>(callback: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::Lazy(LazyProp::sync(callback))
    }

    #[inline]
    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }

    /// Filters the given props according to the request type and resolves every remaining
    /// one concurrently.
    ///
    /// # Errors
    /// Fails as soon as any prop producer fails.
    pub(crate) async fn resolve_props(
        raw_props: InertiaProps,
        req_type: &InertiaRequestType,
        component: &Component,
        req: &HttpRequest,
    ) -> Result<Map<String, Value>, InertiaError> {
        let partials = req_type.partials_for(component);

        if partials.is_some() {
            log::debug!("Resolving a partial reload of {}", component.0);
        }

        // every producer is invoked before any of them is awaited
        let pending = raw_props
            .into_iter()
            .filter(|(key, prop)| match partials {
                Some(partials) => partials.only.contains(key),
                None => !prop.is_lazy(),
            })
            .map(|(key, prop)| {
                let value = prop.into_value_future(req);
                async move { value.await.map(|value| (key, value)) }
            });

        let resolved = try_join_all(pending).await?;

        Ok(resolved.into_iter().collect())
    }

    #[inline]
    fn into_value_future(self, req: &HttpRequest) -> PropFuture {
        match self {
            InertiaProp::Data(value) => ready(Ok(value)).boxed_local(),
            InertiaProp::Callback(callback) => callback(req),
            InertiaProp::Lazy(lazy) => lazy.lazy_value(),
        }
    }
}

impl From<Value> for InertiaProp {
    fn from(value: Value) -> Self {
        Self::Data(value)
    }
}

impl From<LazyProp> for InertiaProp {
    fn from(value: LazyProp) -> Self {
        Self::Lazy(value)
    }
}

impl fmt::Debug for InertiaProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data(value) => f.debug_tuple("Data").field(value).finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

/// Converts a serializable struct into [`InertiaProps`], one [`InertiaProp::Data`] per field.
///
/// # Errors
/// Returns [`InertiaError::SerializationError`] if `props` doesn't serialize into an object.
pub fn props_from_struct<T: Serialize>(props: T) -> Result<InertiaProps, InertiaError> {
    Ok(convert_struct_to_map(props)?
        .into_iter()
        .map(|(key, value)| (key, InertiaProp::Data(value)))
        .collect())
}

use crate::inertia;
use actix_web::http::header::{HeaderName, HeaderValue, TryIntoHeaderPair};

pub const X_INERTIA: HeaderName = HeaderName::from_static(inertia::X_INERTIA);
pub const X_INERTIA_LOCATION: HeaderName = HeaderName::from_static(inertia::X_INERTIA_LOCATION);
pub const X_INERTIA_VERSION: HeaderName = HeaderName::from_static(inertia::X_INERTIA_VERSION);
pub const X_INERTIA_PARTIAL_COMPONENT: HeaderName =
    HeaderName::from_static(inertia::X_INERTIA_PARTIAL_COMPONENT);
pub const X_INERTIA_PARTIAL_DATA: HeaderName =
    HeaderName::from_static(inertia::X_INERTIA_PARTIAL_DATA);

/// Inertia protocol headers, ready to be inserted into requests or responses builders.
pub enum InertiaHeader<'a> {
    Inertia,
    InertiaLocation(&'a str),
    InertiaPartialData(Vec<&'a str>),
    InertiaPartialComponent(&'a str),
    Version(&'a str),
}

impl InertiaHeader<'_> {
    fn name_and_value(&self) -> (HeaderName, String) {
        match self {
            Self::Inertia => (X_INERTIA, "true".into()),
            Self::Version(version) => (X_INERTIA_VERSION, version.to_string()),
            Self::InertiaLocation(path) => (X_INERTIA_LOCATION, path.to_string()),
            Self::InertiaPartialComponent(component) => {
                (X_INERTIA_PARTIAL_COMPONENT, component.to_string())
            }
            Self::InertiaPartialData(partials) => (X_INERTIA_PARTIAL_DATA, partials.join(",")),
        }
    }
}

impl TryIntoHeaderPair for InertiaHeader<'_> {
    type Error = <(HeaderName, String) as TryIntoHeaderPair>::Error;

    fn try_into_pair(self) -> Result<(HeaderName, HeaderValue), Self::Error> {
        self.name_and_value().try_into_pair()
    }
}

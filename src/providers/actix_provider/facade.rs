use crate::inertia::InertiaResponder;
use crate::utils::inertia_err_msg;
use crate::{Component, Inertia, InertiaError, InertiaProps};
use actix_web::web::Data;
use actix_web::{HttpRequest, HttpResponse};
use serde_json::{Map, Value};

/// Short for calling `render` from the `Inertia` instance configured and added to the request
/// AppData.
///
/// # Arguments
/// * `req`         -   A reference to the HttpRequest.
/// * `component`   -   The name of the page javascript component.
///
/// # Errors
/// Returns an [`InertiaError::ConfigError`] if Inertia instance hasn't been configured (set to
/// AppData).
pub async fn render<T>(req: &HttpRequest, component: Component) -> Result<HttpResponse, InertiaError>
where
    T: 'static,
{
    let inertia = extract_inertia::<T>(req)?;
    inertia.render(req, component).await
}

/// Short for calling `render_with_props` from the `Inertia` instance configured and added to the request
/// AppData.
///
/// # Arguments
/// * `req`         -   A reference to the HttpRequest.
/// * `component`   -   The name of the page javascript component.
/// * `props`       -   The page props.
///
/// # Errors
/// Returns an [`InertiaError::ConfigError`] if Inertia instance hasn't been configured (set to
/// AppData).
pub async fn render_with_props<T>(
    req: &HttpRequest,
    component: Component,
    props: InertiaProps,
) -> Result<HttpResponse, InertiaError>
where
    T: 'static,
{
    let inertia: &Inertia<T> = extract_inertia(req)?;
    inertia.render_with_props(req, component, props).await
}

/// Short for calling `render_with_view_data` from the `Inertia` instance added to the request
/// AppData.
pub async fn render_with_view_data<T>(
    req: &HttpRequest,
    component: Component,
    props: InertiaProps,
    view_data: Map<String, Value>,
) -> Result<HttpResponse, InertiaError>
where
    T: 'static,
{
    let inertia: &Inertia<T> = extract_inertia(req)?;
    inertia
        .render_with_view_data(req, component, props, view_data)
        .await
}

/// Forces the client to visit `url` with a full page visit, e.g. for redirecting to an
/// external website.
pub fn location(url: &str) -> HttpResponse {
    Inertia::<()>::location(url)
}

/// Redirects to the referring page, or to `/` if the request has no referer.
pub fn redirect_back(req: &HttpRequest) -> HttpResponse {
    Inertia::<()>::redirect_back(req)
}

fn extract_inertia<T>(req: &HttpRequest) -> Result<&Inertia<T>, InertiaError>
where
    T: 'static,
{
    match req.app_data::<Data<Inertia<T>>>() {
        Some(inertia) => Ok(inertia.get_ref()),
        None => Err(InertiaError::ConfigError(inertia_err_msg(
            "There is no Inertia struct in AppData. Please, assure you have correctly configured Inertia.".into(),
        ))),
    }
}

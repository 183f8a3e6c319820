use super::headers::{self, InertiaHeader};

use crate::inertia::{
    Inertia, InertiaHttpRequest, InertiaPartialsRequest, InertiaResponder, InertiaService,
    ViewData,
};
use crate::props::InertiaProp;
use crate::props::InertiaProps;
use crate::req_type::{InertiaRequestType, PartialComponent};
use crate::utils::{convert_struct_to_stringified_json, inertia_err_msg, reencode_query};
use crate::version::AssetVersion;
use crate::{Component, InertiaError, InertiaPage};

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest};
use actix_web::http::header::{self as http_header, ContentType, HeaderName};
use actix_web::http::{Method, StatusCode};
use actix_web::{web, App, HttpRequest, HttpResponse, HttpResponseBuilder, Responder, ResponseError};
use async_trait::async_trait;
use serde_json::{json, Map, Value};

impl Responder for InertiaPage {
    type Body = BoxBody;

    #[inline]
    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        match convert_struct_to_stringified_json(&self) {
            Err(err) => err.error_response(),
            Ok(page) => HttpResponseBuilder::new(StatusCode::OK)
                .insert_header(InertiaHeader::Inertia)
                .insert_header((http_header::VARY, "Accept"))
                .insert_header(ContentType::json())
                .body(page),
        }
    }
}

#[async_trait(?Send)]
impl<T> InertiaResponder<HttpResponse, HttpRequest> for Inertia<T>
where
    T: 'static,
{
    #[inline]
    async fn render(
        &self,
        req: &HttpRequest,
        component: Component,
    ) -> Result<HttpResponse, InertiaError> {
        self.render_with_view_data(req, component, InertiaProps::new(), Map::new())
            .await
    }

    #[inline]
    async fn render_with_props(
        &self,
        req: &HttpRequest,
        component: Component,
        props: InertiaProps,
    ) -> Result<HttpResponse, InertiaError> {
        self.render_with_view_data(req, component, props, Map::new())
            .await
    }

    async fn render_with_view_data(
        &self,
        req: &HttpRequest,
        component: Component,
        props: InertiaProps,
        view_data: Map<String, Value>,
    ) -> Result<HttpResponse, InertiaError> {
        let req_type: InertiaRequestType = req.get_request_type()?;
        let props = InertiaProp::resolve_props(
            self.shared_data.merged_with(props),
            &req_type,
            &component,
            req,
        )
        .await?;

        let version = self.resolve_version().await?;
        let url = req.get_canonical_url()?;
        let is_inertia_request = req.is_inertia_request();

        // outdated assets: force the client to do a full visit
        if is_inertia_request
            && req.method() == Method::GET
            && !req.check_inertia_version(version.as_ref())
        {
            log::debug!("Assets version mismatch, forcing a full visit to {}", url);
            self.reflash_session(req).await?;
            return Ok(Self::location(&url));
        }

        let page = InertiaPage::new(component, url, version, props);

        // if it's an inertia request, returns an InertiaPage object
        if is_inertia_request {
            return Ok(page.respond_to(req));
        }

        let ssr_page = if self.ssr.should_render(&page.component.0) {
            Some(self.ssr.render(&page).await?)
        } else {
            None
        };

        let mut custom_props = self.custom_view_data.clone();
        custom_props.extend(view_data);

        let view_data = ViewData {
            page,
            ssr_page,
            custom_props,
        };

        let html = (self.template_resolver)(
            self.template_path,
            view_data,
            self.template_resolver_data,
        )
        .await?;

        Ok(HttpResponseBuilder::new(StatusCode::OK)
            .insert_header(ContentType::html())
            .body(html))
    }

    #[inline]
    fn location(url: &str) -> HttpResponse {
        HttpResponseBuilder::new(StatusCode::CONFLICT)
            .insert_header(InertiaHeader::InertiaLocation(url))
            .finish()
    }

    #[inline]
    fn redirect_back(req: &HttpRequest) -> HttpResponse {
        let location = req
            .headers()
            .get(http_header::REFERER)
            .and_then(|referer| referer.to_str().ok())
            .unwrap_or("/");

        HttpResponse::SeeOther()
            .insert_header((http_header::LOCATION, location))
            .finish()
    }
}

impl<T> Inertia<T>
where
    T: 'static,
{
    /// Keeps the session flash messages for the next request.
    async fn reflash_session(&self, req: &HttpRequest) -> Result<(), InertiaError> {
        let Some(session) = &self.session else {
            return Ok(());
        };

        session.reflash(req).await
    }
}

impl ResponseError for InertiaError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponseBuilder::new(self.status_code())
            .insert_header(ContentType::json())
            .body(json!({ "error": self.get_cause() }).to_string())
    }
}

/// Maps the result of a render into an actual response, logging the failure if any.
pub trait InertiaErrMapper {
    fn map_inertia_err(self) -> HttpResponse;
}

impl InertiaErrMapper for Result<HttpResponse, InertiaError> {
    fn map_inertia_err(self) -> HttpResponse {
        match self {
            Ok(response) => response,
            Err(err) => {
                log::error!("{}", inertia_err_msg(err.get_cause()));
                err.error_response()
            }
        }
    }
}

impl<TApp> InertiaService for App<TApp>
where
    TApp: ServiceFactory<
        ServiceRequest,
        Config = (),
        Error = actix_web::error::Error,
        InitError = (),
    >,
{
    fn inertia_route<T>(self, path: &str, component: &'static str) -> Self
    where
        T: 'static,
    {
        self.route(
            path,
            web::get().to(move |req: HttpRequest| async move {
                super::facade::render::<T>(&req, component.into()).await
            }),
        )
    }
}

impl InertiaHttpRequest for HttpRequest {
    fn is_inertia_request(&self) -> bool {
        match self.headers().get(headers::X_INERTIA) {
            None => false,
            Some(v) => !v.is_empty(),
        }
    }

    fn check_inertia_version(&self, current_version: Option<&AssetVersion>) -> bool {
        let Some(current_version) = current_version else {
            return true;
        };

        self.headers()
            .get(headers::X_INERTIA_VERSION)
            .map_or(true, |version| {
                version.to_str().map_or(false, |version| {
                    version.is_empty() || version == current_version.to_string()
                })
            })
    }

    fn get_canonical_url(&self) -> Result<String, InertiaError> {
        let path = self.path();

        if self.method() != Method::GET || self.query_string().is_empty() {
            return Ok(path.to_string());
        }

        let query = reencode_query(self.query_string())?;
        if query.is_empty() {
            return Ok(path.to_string());
        }

        Ok(format!("{}?{}", path, query))
    }
}

impl InertiaPartialsRequest for HttpRequest {
    fn get_request_type(&self) -> Result<InertiaRequestType, InertiaError> {
        let Some(partial_comp) = self.headers().get(headers::X_INERTIA_PARTIAL_COMPONENT) else {
            return Ok(InertiaRequestType::Standard);
        };

        let component = match partial_comp.to_str() {
            Ok(component) => Component(component.into()),
            Err(_err) => {
                return Err(InertiaError::HeaderError(format!(
                    "Header {}'s value must contain only printable ASCII characters.",
                    headers::X_INERTIA_PARTIAL_COMPONENT
                )))
            }
        };

        let only = extract_partials_headers_content(self, &headers::X_INERTIA_PARTIAL_DATA)?;

        Ok(InertiaRequestType::Partial(PartialComponent { component, only }))
    }
}

fn extract_partials_headers_content(
    req: &HttpRequest,
    header_name: &HeaderName,
) -> Result<Vec<String>, InertiaError> {
    let partials = match req.headers().get(header_name) {
        None => Vec::new(),
        Some(value) => match value.to_str() {
            Ok(value) => value
                .split(',')
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string())
                .collect(),
            Err(_err) => {
                return Err(InertiaError::HeaderError(format!(
                    "Header {}'s value must contain only printable ASCII characters.",
                    header_name,
                )))
            }
        },
    };

    Ok(partials)
}

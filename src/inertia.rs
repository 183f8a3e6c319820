use crate::config::InertiaConfig;
use crate::node_process::{NodeJsError, NodeJsProc};
use crate::props::{InertiaProp, InertiaProps};
use crate::req_type::InertiaRequestType;
use crate::session::InertiaSession;
use crate::shared_data::SharedData;
use crate::ssr::SsrConfig;
use crate::version::{AssetVersion, InertiaVersion};
use crate::{InertiaError, InertiaPage, InertiaSSRPage};
use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use std::sync::Arc;

pub const X_INERTIA: &str = "x-inertia";
pub const X_INERTIA_LOCATION: &str = "x-inertia-location";
pub const X_INERTIA_VERSION: &str = "x-inertia-version";
pub const X_INERTIA_PARTIAL_COMPONENT: &str = "x-inertia-partial-component";
pub const X_INERTIA_PARTIAL_DATA: &str = "x-inertia-partial-data";

/// The javascript component name.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Component(pub String);

impl From<&str> for Component {
    fn from(value: &str) -> Self {
        Component(value.to_string())
    }
}

impl From<String> for Component {
    fn from(value: String) -> Self {
        Component(value)
    }
}

/// InertiaResponder trait defines the methods of the Inertia protocol an http library
/// adapter implements. For instance, T may be an actix-web HttpResponse and THttpReq its
/// HttpRequest.
#[async_trait(?Send)] // it's `?Send` because some frameworks like Actix won't require requests to be thread-safe
pub trait InertiaResponder<T, THttpReq> {
    /// Renders an Inertia Page as an HTTP response.
    ///
    /// # Arguments
    /// * `req`         -   The HTTP request.
    /// * `component`   -   The page javascript component name to be rendered by the
    ///                     client-side adapter.
    async fn render(&self, req: &THttpReq, component: Component) -> Result<T, InertiaError>;

    /// Renders an Inertia Page with props as an HTTP response.
    ///
    /// # Arguments
    /// * `req`         -   The HTTP request.
    /// * `component`   -   The page component to be rendered by the client-side adapter.
    /// * `props`       -   The page props. They are merged over the shared props.
    ///
    /// # Errors
    /// Fails if any prop fails to resolve, if the version resolver fails or if the page
    /// cannot be rendered.
    async fn render_with_props(
        &self,
        req: &THttpReq,
        component: Component,
        props: InertiaProps,
    ) -> Result<T, InertiaError>;

    /// Same as [`InertiaResponder::render_with_props`], but also passes `view_data` to the
    /// root template of full visits. View data is never sent to the client-side.
    async fn render_with_view_data(
        &self,
        req: &THttpReq,
        component: Component,
        props: InertiaProps,
        view_data: Map<String, Value>,
    ) -> Result<T, InertiaError>;

    /// Forces the client to visit `url` outside of Inertia, i.e. with a full page visit.
    fn location(url: &str) -> T;

    /// Redirects back to the referring page with a `303 See Other` status.
    fn redirect_back(req: &THttpReq) -> T;
}

/// Defines some helper methods to be implemented to HttpRequests of the adapted
/// http library.
pub trait InertiaHttpRequest {
    fn is_inertia_request(&self) -> bool;

    /// Checks if application assets version matches.
    /// A request without the version header is up-to-date.
    fn check_inertia_version(&self, current_version: Option<&AssetVersion>) -> bool;

    /// The request path followed by its query string, the latter only being present on
    /// GET requests.
    fn get_canonical_url(&self) -> Result<String, InertiaError>;
}

/// Registers routes that do nothing but render a page component, without any props.
pub trait InertiaService {
    fn inertia_route<T>(self, path: &str, component: &'static str) -> Self
    where
        T: 'static;
}

pub(crate) trait InertiaPartialsRequest {
    fn get_request_type(&self) -> Result<InertiaRequestType, InertiaError>;
}

/// View Data is a struct containing props to be used by the root template.
#[derive(Debug, Clone)]
pub struct ViewData {
    pub page: InertiaPage,
    pub ssr_page: Option<InertiaSSRPage>,
    pub custom_props: Map<String, Value>,
}

impl ViewData {
    /// The content of the root template head: the server-side rendered head, if any.
    pub fn inertia_head(&self) -> String {
        self.ssr_page
            .as_ref()
            .map(InertiaSSRPage::get_head)
            .unwrap_or_default()
    }

    /// The content of the root template body: either the server-side rendered page or the
    /// root container with the page embedded, to be rendered on the client-side.
    pub fn inertia_body(&self) -> Result<String, InertiaError> {
        match &self.ssr_page {
            Some(ssr) => Ok(ssr.get_body().clone()),
            None => self.page.render_container(),
        }
    }
}

pub type TemplateResolverOutput = LocalBoxFuture<'static, Result<String, InertiaError>>;

/// Renders the root template at the given path with the given [`ViewData`] and
/// template resolver data.
pub type TemplateResolver<T> =
    &'static (dyn Fn(&'static str, ViewData, &'static T) -> TemplateResolverOutput + Send + Sync);

/// Inertia struct must be a singleton and initialized at the application bootstrap.
/// It is supposed to last during the whole application runtime.
///
/// Shared props and the version can only be changed through a mutable borrow, that is,
/// before the instance is handed to the http server and shared between its workers.
pub struct Inertia<T>
where
    T: 'static,
{
    /// The path to find the root html template to render everything in.
    pub(crate) template_path: &'static str,
    /// A function responsible for rendering the root template
    /// with the given **view data** and/or **page data**.
    ///
    /// This should be relative by the template engine you are using, and it is mandatory for
    /// rendering the HTML to be served on full requests. Since Rust does not offer a standard
    /// template engine, there are various options, and it is not our goal to tie you to a specific
    /// one which we opted to use.
    ///
    /// # Arguments
    /// Inertia will call this function passing the following parameters to it:
    /// * `path`        -   The path to the application template (`Inertia::template_path`).
    /// * `view_data`   -   A [`ViewData`] struct,
    /// * `data`        -   The `template_resolver_data`.
    ///
    /// # Returns
    /// The return must be the template rendered to HTML. It will be sent as response to full
    /// requests.
    pub(crate) template_resolver: TemplateResolver<T>,
    pub(crate) template_resolver_data: &'static T,
    /// The current assets version. Unversioned applications never force reloads.
    pub(crate) version: Option<InertiaVersion>,
    pub(crate) shared_data: SharedData,
    pub(crate) ssr: SsrConfig,
    pub(crate) session: Option<Arc<dyn InertiaSession>>,
    /// Extra data to be passed to the root template.
    pub(crate) custom_view_data: Map<String, Value>,
}

impl<T> Inertia<T>
where
    T: 'static,
{
    /// Initializes an instance of [`Inertia`] struct from an [`InertiaConfig`].
    pub fn new(config: InertiaConfig<T>) -> Self {
        Self {
            template_path: config.template_path,
            template_resolver: config.template_resolver,
            template_resolver_data: config.template_resolver_data,
            version: config.version,
            shared_data: config.shared_data,
            ssr: config.ssr,
            session: config.session,
            custom_view_data: config.view_data.unwrap_or_default(),
        }
    }

    /// Merges `props` into the props shared by every page. Later calls win on conflicting
    /// keys, while the remaining keys are kept.
    pub fn share(&mut self, props: InertiaProps) -> &mut Self {
        self.shared_data.share(props);
        self
    }

    pub fn share_prop(&mut self, key: impl Into<String>, prop: impl Into<InertiaProp>) -> &mut Self {
        self.shared_data.share_prop(key, prop);
        self
    }

    pub fn set_version(&mut self, version: InertiaVersion) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn get_shared_data(&self) -> &SharedData {
        &self.shared_data
    }

    pub fn get_view_data_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.custom_view_data
    }

    /// Resolves the current assets version, invoking the version resolver if there's one.
    pub async fn resolve_version(&self) -> Result<Option<AssetVersion>, InertiaError> {
        match &self.version {
            None => Ok(None),
            Some(version) => version.resolve().await.map(Some),
        }
    }

    /// Starts a Node.js child process running the ssr bundle, listening at the ssr client
    /// port. The server reloads on bundle changes if ssr auto reload is enabled.
    ///
    /// # Errors
    /// Returns a [`NodeJsError`] if no bundle is configured or if node fails to start.
    pub fn start_node_server(&self) -> Result<NodeJsProc, NodeJsError> {
        let bundle = match &self.ssr.bundle {
            Some(bundle) => bundle,
            None => {
                return Err(NodeJsError::new(
                    "Invalid path".into(),
                    "No ssr bundle has been configured.".into(),
                ))
            }
        };

        let url = reqwest::Url::from_str(&self.ssr.client.get_url()).map_err(|err| {
            NodeJsError::new(
                "Invalid url".into(),
                format!("Failed to parse the ssr server url: {}", err),
            )
        })?;

        NodeJsProc::start(bundle, &url, self.ssr.auto_reload)
    }
}

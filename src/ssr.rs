use crate::node_process::DEFAULT_SSR_PORT;
use crate::utils::inertia_err_msg;
use crate::{InertiaError, InertiaPage, InertiaSSRPage};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Renders a page on the server side, e.g. by delegating it to an Inertia ssr server.
#[async_trait(?Send)]
pub trait SsrRenderer: Send + Sync {
    async fn render(&self, page: &InertiaPage) -> Result<InertiaSSRPage, InertiaError>;
}

/// Http client of an Inertia ssr server, such as the one started by
/// [`NodeJsProc`](crate::node_process::NodeJsProc).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsrClient {
    pub(crate) host: String,
    pub(crate) port: u16,
}

impl SsrClient {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
        }
    }

    pub fn get_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for SsrClient {
    fn default() -> Self {
        Self::new("127.0.0.1", DEFAULT_SSR_PORT)
    }
}

#[async_trait(?Send)]
impl SsrRenderer for SsrClient {
    async fn render(&self, page: &InertiaPage) -> Result<InertiaSSRPage, InertiaError> {
        let response = reqwest::Client::new()
            .post(format!("{}/render", self.get_url()))
            .json(page)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| {
                InertiaError::SsrError(inertia_err_msg(format!(
                    "Failed to request the ssr server at {}: {}",
                    self.get_url(),
                    err
                )))
            })?;

        response.json::<InertiaSSRPage>().await.map_err(|err| {
            InertiaError::SsrError(inertia_err_msg(format!(
                "The ssr server returned an invalid page: {}",
                err
            )))
        })
    }
}

/// Server-side rendering settings.
#[derive(Clone, Default)]
pub struct SsrConfig {
    pub(crate) enabled: bool,
    /// If set, only these components are server-side rendered.
    pub(crate) allow_list: Option<Vec<String>>,
    /// The ssr build output, i.e. the bundle run by node.
    pub(crate) bundle: Option<String>,
    /// Whether the ssr server should reload whenever the bundle changes.
    pub(crate) auto_reload: bool,
    pub(crate) client: SsrClient,
    /// Takes the place of `client` for rendering pages.
    pub(crate) renderer: Option<Arc<dyn SsrRenderer>>,
}

impl SsrConfig {
    pub(crate) fn should_render(&self, component: &str) -> bool {
        self.enabled
            && self
                .allow_list
                .as_ref()
                .map_or(true, |allowed| allowed.iter().any(|c| c == component))
    }

    pub(crate) async fn render(&self, page: &InertiaPage) -> Result<InertiaSSRPage, InertiaError> {
        match &self.renderer {
            Some(renderer) => renderer.render(page).await,
            None => self.client.render(page).await,
        }
    }
}

impl fmt::Debug for SsrConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SsrConfig")
            .field("enabled", &self.enabled)
            .field("allow_list", &self.allow_list)
            .field("bundle", &self.bundle)
            .field("auto_reload", &self.auto_reload)
            .field("client", &self.client)
            .field("renderer", &self.renderer.as_ref().map(|_| ".."))
            .finish()
    }
}

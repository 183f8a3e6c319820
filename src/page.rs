use crate::error::InertiaError;
use crate::inertia::Component;
use crate::utils::convert_struct_to_stringified_json;
use crate::version::AssetVersion;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Server-side rendered page, returned by the Inertia ssr server and rendered inside the
/// root template on full visits.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InertiaSSRPage {
    /// All html-string elements to be injected in inertia_head, at the root template.
    pub(crate) head: Vec<String>,
    /// All html-string elements to be injected in inertia_body div container, at the root template.
    pub(crate) body: String,
}

impl InertiaSSRPage {
    /// Instantiates a new InertiaSSRPage object. See [`InertiaSSRPage`] struct docs for more
    /// details of its usage.
    ///
    /// # Arguments
    /// * `head` -  Stringified html elements to be injected in the root template's head.
    /// * `body` -  Stringified html of the body, already containing the Inertia's root
    ///             container.
    pub fn new(head: Vec<String>, body: String) -> Self {
        InertiaSSRPage { head, body }
    }

    pub fn get_head(&self) -> String {
        self.head.join("\n")
    }

    pub fn get_body(&self) -> &String {
        &self.body
    }
}

/// Response containing a valid Inertia Payload that will be used
/// by the Inertia client to render the components.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct InertiaPage {
    /// The name of the JavaScript page component.
    pub(crate) component: Component,
    /// The page props (data). A merge of page props and shared props.
    pub(crate) props: Map<String, Value>,
    /// Page's URL: the request path and its re-encoded query string.
    pub(crate) url: String,
    /// Current assets version. Omitted from the payload if the application isn't versioned.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub(crate) version: Option<AssetVersion>,
}

impl InertiaPage {
    /// Instantiates an Inertia Page object to sent as http response,
    /// according to [Inertia Protocol].
    ///
    /// [Inertia Protocol]: https://inertiajs.com/the-protocol
    ///
    /// # Arguments
    /// * `component`   -   The name of the javascript page component (e.g. "Users/Index").
    /// * `url`         -   The page url, i.e. an absolute hostless path ("/users?page=2").
    /// * `version`     -   Current assets version, if any. See [Inertia's assets versioning].
    /// * `props`       -   A map of the page's resolved props.
    ///
    /// [Inertia's assets versioning]: https://inertiajs.com/the-protocol#asset-versioning
    pub fn new(
        component: Component,
        url: String,
        version: Option<AssetVersion>,
        props: Map<String, Value>,
    ) -> Self {
        InertiaPage {
            component,
            url,
            props,
            version,
        }
    }

    pub fn get_component(&self) -> &Component {
        &self.component
    }

    pub fn get_props(&self) -> &Map<String, Value> {
        &self.props
    }

    pub fn get_url(&self) -> &str {
        &self.url
    }

    pub fn get_version(&self) -> Option<&AssetVersion> {
        self.version.as_ref()
    }

    /// Renders the root element the Inertia client mounts on, with this page embedded as its
    /// html-escaped `data-page` attribute.
    ///
    /// # Errors
    /// Returns [`InertiaError::SerializationError`] if the page fails to serialize.
    pub fn render_container(&self) -> Result<String, InertiaError> {
        let page = convert_struct_to_stringified_json(self)?;

        Ok(format!(
            "<div id=\"app\" data-page=\"{}\"></div>",
            html_escape::encode_double_quoted_attribute(&page)
        ))
    }
}

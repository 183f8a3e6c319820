use crate::inertia::TemplateResolver;
use crate::props::InertiaProps;
use crate::session::InertiaSession;
use crate::shared_data::SharedData;
use crate::ssr::{SsrClient, SsrConfig, SsrRenderer};
use crate::InertiaVersion;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Everything [`Inertia::new`] needs. Fill it directly, or through the fluent
/// [`InertiaConfigBuilder`] returned by `InertiaConfig::builder()`.
///
/// The root template (`template_path`), the function rendering it (`template_resolver`) and
/// the data handed to that function (`template_resolver_data`, `&()` if unused) are
/// mandatory. Every other field has a neutral default: no asset versioning (see
/// [Asset versioning](https://inertiajs.com/asset-versioning)), nothing shared, no session
/// hook, client-side rendering only and no extra view data.
///
/// [`Inertia::new`]: crate::Inertia::new
pub struct InertiaConfig<T>
where
    T: 'static,
{
    pub template_path: &'static str,
    pub template_resolver: TemplateResolver<T>,
    pub template_resolver_data: &'static T,
    pub version: Option<InertiaVersion>,
    pub shared_data: SharedData,
    pub session: Option<Arc<dyn InertiaSession>>,
    pub ssr: SsrConfig,
    pub view_data: Option<Map<String, Value>>,
}

impl<T> InertiaConfig<T>
where
    T: 'static,
{
    /// Starts an [`InertiaConfigBuilder`].
    ///
    /// # Examples
    /// ```rust
    /// use inertia_actix::{InertiaVersion, InertiaConfig};
    /// # use inertia_actix::{TemplateResolverOutput, ViewData, InertiaError};
    /// # async fn _your_template_resolver(_template_path: &str, _view_data: ViewData) -> Result<String, InertiaError> {
    /// #     return Ok("".to_string());
    /// # }
    /// #
    /// # pub fn your_template_resolver(template_path: &'static str, view_data: ViewData, _data: &()) -> TemplateResolverOutput {
    /// #     Box::pin(_your_template_resolver(template_path, view_data))
    /// # }
    /// #
    /// let inertia_config = InertiaConfig::builder()
    ///     .set_version(InertiaVersion::literal("v1"))
    ///     .set_template_path("path/to/template.html")
    ///     .set_template_resolver(&your_template_resolver)
    ///     .set_template_resolver_data(&())
    ///     .build();
    /// ```
    pub fn builder() -> InertiaConfigBuilder<T> {
        InertiaConfigBuilder::new()
    }
}

/// Fluent builder of [`InertiaConfig`].
pub struct InertiaConfigBuilder<T>
where
    T: 'static,
{
    template_path: Option<&'static str>,
    template_resolver: Option<TemplateResolver<T>>,
    template_resolver_data: Option<&'static T>,
    version: Option<InertiaVersion>,
    shared_data: SharedData,
    session: Option<Arc<dyn InertiaSession>>,
    ssr: SsrConfig,
    view_data: Option<Map<String, Value>>,
}

impl<T> Default for InertiaConfigBuilder<T>
where
    T: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InertiaConfigBuilder<T>
where
    T: 'static,
{
    pub fn new() -> Self {
        Self {
            template_path: None,
            template_resolver: None,
            template_resolver_data: None,
            version: None,
            shared_data: SharedData::new(),
            session: None,
            ssr: SsrConfig::default(),
            view_data: None,
        }
    }

    pub fn set_version(mut self, version: InertiaVersion) -> Self {
        self.version = Some(version);
        self
    }

    pub fn set_template_path(mut self, template_path: &'static str) -> Self {
        self.template_path = Some(template_path);
        self
    }

    pub fn set_template_resolver(mut self, template_resolver: TemplateResolver<T>) -> Self {
        self.template_resolver = Some(template_resolver);
        self
    }

    pub fn set_template_resolver_data(mut self, data: &'static T) -> Self {
        self.template_resolver_data = Some(data);
        self
    }

    pub fn set_view_data(mut self, view_data: Map<String, Value>) -> Self {
        self.view_data = Some(view_data);
        self
    }

    /// Merges `props` into the shared props. Can be called several times.
    pub fn share(mut self, props: InertiaProps) -> Self {
        self.shared_data.share(props);
        self
    }

    pub fn set_session(mut self, session: Arc<dyn InertiaSession>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn enable_ssr(mut self) -> Self {
        self.ssr.enabled = true;
        self
    }

    pub fn set_ssr_client(mut self, ssr_client: SsrClient) -> Self {
        self.ssr.client = ssr_client;
        self
    }

    /// Renders pages with `renderer` instead of requesting the ssr server.
    pub fn set_ssr_renderer(mut self, renderer: Arc<dyn SsrRenderer>) -> Self {
        self.ssr.renderer = Some(renderer);
        self
    }

    /// Restricts server-side rendering to the given components.
    pub fn set_ssr_allow_list(mut self, components: Vec<String>) -> Self {
        self.ssr.allow_list = Some(components);
        self
    }

    /// Sets the ssr build output, e.g. "dist/ssr/ssr.js".
    pub fn set_ssr_bundle(mut self, bundle: &str) -> Self {
        self.ssr.bundle = Some(bundle.to_string());
        self
    }

    pub fn enable_ssr_auto_reload(mut self) -> Self {
        self.ssr.auto_reload = true;
        self
    }

    /// Builds the [`InertiaConfig`].
    ///
    /// # Panics
    /// Panics if `template_path`, `template_resolver` or `template_resolver_data` hasn't been
    /// set.
    pub fn build(self) -> InertiaConfig<T> {
        InertiaConfig {
            template_path: mandatory(self.template_path, "template_path"),
            template_resolver: mandatory(self.template_resolver, "template_resolver"),
            template_resolver_data: mandatory(
                self.template_resolver_data,
                "template_resolver_data",
            ),
            version: self.version,
            shared_data: self.shared_data,
            session: self.session,
            ssr: self.ssr,
            view_data: self.view_data,
        }
    }
}

fn mandatory<V>(value: Option<V>, field: &str) -> V {
    match value {
        Some(value) => value,
        None => panic!(
            "[InertiaConfigBuilder] '{}' is a mandatory field and InertiaConfigBuilder cannot build without it.",
            field
        ),
    }
}

#[cfg(test)]
mod test {
    use crate::{InertiaError, InertiaProp, InertiaProps, InertiaVersion, SsrClient, TemplateResolverOutput, ViewData};
    use serde_json::json;
    use std::panic;

    use super::{InertiaConfig, InertiaConfigBuilder};

    // region: --- Mocks

    async fn _mocked_resolver(
        _template_path: &str,
        _view_data: ViewData,
    ) -> Result<String, InertiaError> {
        Ok("".to_string())
    }

    pub fn mocked_resolver(
        template_path: &'static str,
        view_data: ViewData,
        _data: &(),
    ) -> TemplateResolverOutput {
        Box::pin(_mocked_resolver(template_path, view_data))
    }

    // endregion: --- Mocks

    // region: --- Tests

    #[test]
    fn builder_panics_if_critical_fields_are_unset() {
        // region: --- builders
        let build_totally_empty = panic::catch_unwind(move || {
            InertiaConfigBuilder::<()>::new().build();
        });

        let build_without_template_resolver = panic::catch_unwind(move || {
            InertiaConfigBuilder::<()>::new()
                .set_template_path("path")
                .set_template_resolver_data(&())
                .set_version(InertiaVersion::literal("v1"))
                .build();
        });

        let build_without_template_path = panic::catch_unwind(move || {
            InertiaConfigBuilder::<()>::new()
                .set_template_resolver(&mocked_resolver)
                .set_template_resolver_data(&())
                .set_version(InertiaVersion::literal("v1"))
                .build();
        });

        let build_without_template_data = panic::catch_unwind(move || {
            InertiaConfigBuilder::<()>::new()
                .set_template_resolver(&mocked_resolver)
                .set_template_path("path")
                .set_version(InertiaVersion::literal("v1"))
                .build();
        });

        let build_without_version = panic::catch_unwind(move || {
            InertiaConfigBuilder::<()>::new()
                .set_template_resolver(&mocked_resolver)
                .set_template_path("path")
                .set_template_resolver_data(&())
                .build();
        });
        // endregion: --- builders

        assert!(build_totally_empty.is_err());
        assert!(build_without_template_resolver.is_err());
        assert!(build_without_template_path.is_err());
        assert!(build_without_template_data.is_err());
        assert!(build_without_version.is_ok());
    }

    #[actix_web::test]
    async fn builder_builds_correctly() {
        let mut first_share = InertiaProps::new();
        first_share.insert("app".into(), InertiaProp::Data(json!("inertia")));
        let mut second_share = InertiaProps::new();
        second_share.insert("locale".into(), InertiaProp::Data(json!("en")));

        let with_builder = InertiaConfigBuilder::<()>::new()
            .set_template_resolver(&mocked_resolver)
            .set_template_path("path")
            .set_template_resolver_data(&())
            .set_version(InertiaVersion::literal("v1"))
            .share(first_share)
            .share(second_share)
            .enable_ssr()
            .set_ssr_client(SsrClient::new("127.0.0.1", 1000))
            .set_ssr_allow_list(vec!["Index".into()])
            .set_ssr_bundle("dist/ssr/ssr.js")
            .build();

        let directly_initialized = InertiaConfig {
            template_resolver: &mocked_resolver,
            template_path: "path",
            template_resolver_data: &(),
            version: Some(InertiaVersion::literal("v1")),
            shared_data: Default::default(),
            session: None,
            ssr: Default::default(),
            view_data: None,
        };

        assert_eq!(
            &with_builder.template_path,
            &directly_initialized.template_path
        );
        assert_eq!(
            &with_builder.template_resolver_data,
            &directly_initialized.template_resolver_data
        );
        assert_eq!(
            with_builder.version.unwrap().resolve().await.unwrap(),
            directly_initialized.version.unwrap().resolve().await.unwrap()
        );
        assert_eq!(&with_builder.view_data, &directly_initialized.view_data);
        assert!(with_builder.shared_data.get("app").is_some());
        assert!(with_builder.shared_data.get("locale").is_some());
        assert!(with_builder.ssr.enabled);
        assert!(!directly_initialized.ssr.enabled);
        assert_eq!(with_builder.ssr.client, SsrClient::new("127.0.0.1", 1000));
        assert_eq!(with_builder.ssr.allow_list, Some(vec!["Index".to_string()]));
        assert_eq!(with_builder.ssr.bundle.as_deref(), Some("dist/ssr/ssr.js"));
        assert!(!with_builder.ssr.auto_reload);
    }

    // endregion: --- Tests
}

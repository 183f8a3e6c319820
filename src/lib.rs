mod config;
mod error;
mod inertia;
pub mod node_process;
mod page;
mod props;
mod providers;
mod req_type;
mod session;
mod shared_data;
mod ssr;
mod utils;
mod version;

#[cfg(feature = "basic-vite-resolver")]
mod features;

pub use config::{InertiaConfig, InertiaConfigBuilder};
pub use error::InertiaError;
pub use inertia::{
    Component, Inertia, InertiaHttpRequest, InertiaResponder, InertiaService, TemplateResolver,
    TemplateResolverOutput, ViewData,
};
pub use page::{InertiaPage, InertiaSSRPage};
pub use props::{props_from_struct, InertiaProp, InertiaProps, LazyProp};
pub use session::InertiaSession;
pub use shared_data::SharedData;
pub use ssr::{SsrClient, SsrConfig, SsrRenderer};
pub use version::{manifest_version, AssetVersion, InertiaVersion};

pub use providers::actix;
pub use providers::actix::facade::{
    location, redirect_back, render, render_with_props, render_with_view_data,
};
pub use providers::actix::middleware::InertiaMiddleware;
pub use providers::actix::InertiaErrMapper;

#[cfg(feature = "basic-vite-resolver")]
pub mod resolvers {
    pub use super::features::template_resolvers::basic_vite_resolver::template_resolver as basic_vite_resolver;
}

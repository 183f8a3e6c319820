use crate::{InertiaError, TemplateResolverOutput, ViewData};
use std::path::Path;
use vite_rust::{features::html_directives::ViteDefaultDirectives, Vite};

const INERTIA_HEAD_DIRECTIVE: &str = "@inertia::head";
const INERTIA_BODY_DIRECTIVE: &str = "@inertia::body";

async fn resolve(path: &str, view_data: ViewData, vite: &Vite) -> Result<String, InertiaError> {
    let mut html = tokio::fs::read_to_string(Path::new(path))
        .await
        .map_err(|err| {
            InertiaError::ConfigError(format!("Failed to read the root layout at {}: {}", path, err))
        })?;

    vite.vite_directive(&mut html);
    vite.assets_url_directive(&mut html);
    vite.hmr_directive(&mut html);
    vite.react_directive(&mut html);

    inertia_directives(&html, &view_data)
}

fn inertia_directives(html: &str, view_data: &ViewData) -> Result<String, InertiaError> {
    Ok(html
        .replace(INERTIA_HEAD_DIRECTIVE, &view_data.inertia_head())
        .replace(INERTIA_BODY_DIRECTIVE, &view_data.inertia_body()?))
}

/// Renders the root layout at `template_path`, expanding vite directives and replacing
/// `@inertia::head` and `@inertia::body` with the page.
pub fn template_resolver(
    template_path: &'static str,
    view_data: ViewData,
    vite: &'static Vite,
) -> TemplateResolverOutput {
    Box::pin(resolve(template_path, view_data, vite))
}

use crate::error::InertiaError;
use crate::utils::inertia_err_msg;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;

/// An opaque identifier of the client assets bundle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum AssetVersion {
    Text(String),
    Number(i64),
}

impl fmt::Display for AssetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(version) => f.write_str(version),
            Self::Number(version) => write!(f, "{}", version),
        }
    }
}

impl From<&str> for AssetVersion {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AssetVersion {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for AssetVersion {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for AssetVersion {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

pub type VersionResolver =
    Arc<dyn Fn() -> LocalBoxFuture<'static, Result<AssetVersion, InertiaError>> + Send + Sync>;

/// The current assets version, used to detect clients running outdated assets.
/// See [Asset versioning](https://inertiajs.com/asset-versioning).
#[derive(Clone)]
pub enum InertiaVersion {
    Literal(AssetVersion),
    /// Invoked on every render that needs the version. It is never cached, so it may
    /// reflect a live manifest.
    Resolver(VersionResolver),
}

impl InertiaVersion {
    pub fn literal(version: impl Into<AssetVersion>) -> Self {
        Self::Literal(version.into())
    }

    /// Creates a version from an asynchronous resolver.
    pub fn resolver<F, Fut>(resolver: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<AssetVersion, InertiaError>> + 'static,
    {
        Self::Resolver(Arc::new(move || resolver().boxed_local()))
    }

    /// Creates a version from a synchronous resolver.
    pub fn resolver_sync<F, V>(resolver: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<AssetVersion>,
    {
        Self::resolver(move || std::future::ready(Ok(resolver().into())))
    }

    /// Derives the version from a build manifest file. Check [`manifest_version`].
    pub fn from_manifest(path: impl Into<String>) -> Self {
        let path: String = path.into();
        Self::resolver(move || {
            let path = path.clone();
            async move { Ok::<_, InertiaError>(AssetVersion::Text(manifest_version(&path).await)) }
        })
    }

    pub async fn resolve(&self) -> Result<AssetVersion, InertiaError> {
        match self {
            Self::Literal(version) => Ok(version.clone()),
            Self::Resolver(resolver) => resolver().await,
        }
    }
}

impl fmt::Debug for InertiaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(version) => f.debug_tuple("Literal").field(version).finish(),
            Self::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

/// Hashes the build manifest at `path`, returning the crc32 digest as hex.
///
/// A manifest that cannot be read results in an empty version. The client version
/// won't match it and the client will reload, so it is only logged.
pub async fn manifest_version(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();

    match tokio::fs::read(path).await {
        Ok(content) => format!("{:08x}", crc32fast::hash(&content)),
        Err(err) => {
            log::warn!(
                "{}",
                inertia_err_msg(format!(
                    "Failed to read assets manifest at {}: {}",
                    path.display(),
                    err
                ))
            );
            String::new()
        }
    }
}

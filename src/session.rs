use crate::InertiaError;
use actix_web::HttpRequest;
use async_trait::async_trait;

/// Hook into your framework sessions manager.
///
/// When a client with outdated assets is forced to reload, the current request is dropped
/// without rendering anything. Inertia calls [`InertiaSession::reflash`] beforehand, so the
/// flash messages the current request was supposed to display are kept for the next one.
#[async_trait(?Send)]
pub trait InertiaSession: Send + Sync {
    /// Moves the flash messages of the current request back into the staging area of the
    /// next one and commits the session.
    async fn reflash(&self, req: &HttpRequest) -> Result<(), InertiaError>;
}

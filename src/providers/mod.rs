mod actix_provider;

pub mod actix {
    pub use super::actix_provider::{facade, headers, impls::InertiaErrMapper, middleware};
}

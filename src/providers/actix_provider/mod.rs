pub mod facade;
pub mod headers;
pub mod impls;
pub mod middleware;

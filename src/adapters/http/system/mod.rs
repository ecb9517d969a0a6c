//! HTTP adapter for service-level endpoints (root banner, health).

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::SystemHandlers;
pub use routes::system_routes;

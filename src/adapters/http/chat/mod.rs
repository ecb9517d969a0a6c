//! HTTP adapter for the chat workflow endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ChatHandlers;
pub use routes::chat_routes;

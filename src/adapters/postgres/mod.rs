//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresChatMessageRepository` - Chat message storage
//! - `connect_lazy` - Pool construction from `DatabaseConfig`

mod chat_message_repository;
mod pool;

pub use chat_message_repository::PostgresChatMessageRepository;
pub use pool::connect_lazy;

//! Process-local storage adapters.

mod in_memory_chat_message_repository;

pub use in_memory_chat_message_repository::InMemoryChatMessageRepository;

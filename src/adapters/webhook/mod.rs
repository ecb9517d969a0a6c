//! Automation webhook adapters.

mod n8n_dispatcher;

pub use n8n_dispatcher::{N8nWebhookDispatcher, WebhookPayload, WEBHOOK_NOT_CONFIGURED};

//! Service-level handlers.

mod check_health;

pub use check_health::{CheckHealthHandler, HealthReport, Presence};

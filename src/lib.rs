//! Elva - Conversational Assistant Backend
//!
//! This crate classifies each chat message into an intent. Small talk is
//! answered directly; anything actionable becomes a draft that waits for
//! explicit approval before it is forwarded to an n8n automation webhook.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! Webhook delivery of match results.

mod client;

pub use client::WebhookForwarder;

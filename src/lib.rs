pub mod api;
pub mod client;
pub mod config;
pub mod crypto;
pub mod error;
pub mod executor;
pub mod model;
pub mod webhook;

pub use client::PaystackClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::PaystackError;
pub use executor::{HttpExecutor, RequestExecutor};
pub use model::charge::{
    ChargeContinuation, ChargeRequest, ChargeResult, ChargeStatus, Factor, NextStep,
    PENDING_POLL_INTERVAL,
};
pub use model::webhook::{WebhookEnvelope, WebhookEvent};

pub mod api;
pub mod broker;
pub mod error;
pub mod event;
pub mod parser;
pub mod subscriber;
pub mod utils;

use std::env;
use std::sync::Arc;

use crate::broker::Broker;

/// Channel every accepted push event is republished on. The debug
/// subscriber reads the same constant; there is no discovery step.
pub const PUSH_EVENT_CHANNEL: &str = "pushEvents";

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379/";

#[derive(Debug, Clone)]
pub struct SensorConfig {
    pub bind_address: String,
    pub redis_url: String,
    pub webhook_secret: Option<String>,
}

impl SensorConfig {
    /// Loads configuration from environment variables, with local
    /// defaults for everything except the webhook secret.
    pub fn from_env() -> Self {
        Self {
            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
            webhook_secret: env::var("WEBHOOK_SECRET").ok().filter(|s| !s.is_empty()),
        }
    }

    /// Returns true if inbound deliveries must carry a valid signature.
    pub fn verifies_signatures(&self) -> bool {
        self.webhook_secret.is_some()
    }
}

pub struct AppState {
    pub config: SensorConfig,
    pub broker: Broker,
}

pub type SharedState = Arc<AppState>;

use std::env;
use std::time::Duration;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_PUSH_TIMEOUT_MS: u64 = 2_000;

/// Runtime settings read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Address this node registers for itself and announces to peers.
    pub node_address: String,
    /// Existing node to sync from at startup; `None` mines a genesis block.
    pub seed_node: Option<String>,
    pub push_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let node_address = env::var("NODE_ADDRESS").unwrap_or_else(|_| format!("{host}:{port}"));
        let seed_node = env::var("SEED_NODE")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let push_timeout_ms = env::var("PUSH_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PUSH_TIMEOUT_MS);

        Self {
            host,
            port,
            node_address,
            seed_node,
            push_timeout: Duration::from_millis(push_timeout_ms),
        }
    }
}

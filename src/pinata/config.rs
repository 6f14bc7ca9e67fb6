pub const DEFAULT_API_URL: &str = "https://api.pinata.cloud";
pub const DEFAULT_GATEWAY_URL: &str = "https://gateway.pinata.cloud/ipfs/";

/// Pinata credentials and endpoints
#[derive(Debug, Clone)]
pub struct PinataConfig {
    /// Base URL of the pinning API
    pub api_url: String,

    pub api_key: String,
    pub secret_api_key: String,

    /// HTTP gateway prefix that `ipfs://` URIs are rewritten to
    pub gateway_url: String,
}

impl Default for PinataConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            secret_api_key: String::new(),
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
        }
    }
}

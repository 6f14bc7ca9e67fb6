use serde::{Deserialize, Serialize};

// JSON document pinned to IPFS and referenced by the on-chain metadata uri
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffChainMetadata {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image: Option<String>,
}

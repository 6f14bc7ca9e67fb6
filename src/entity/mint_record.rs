use serde::{Deserialize, Serialize};

/// Result of a completed issuance. Lives only in the HTTP response and the
/// in-memory request registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRecord {
    pub mint_address: String,
    pub token_account: String,
    pub metadata_uri: String,
    pub transaction_signature: String,
}

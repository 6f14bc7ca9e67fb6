use serde::Serialize;

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct MessageView {
    pub message: String,
}

/// Body of every failed request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorView {
    pub error: String,
    /// Set when a mint was already created before the failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mint_address: Option<String>,
}

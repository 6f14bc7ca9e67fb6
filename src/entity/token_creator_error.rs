#[derive(Debug, thiserror::Error)]
pub enum TokenCreatorError {
    #[error("Solana client error: {0}")]
    SolanaClient(String),

    #[error("Pinata API error: {0}")]
    PinataApi(String),

    #[error("Invalid public key. Must be in Base58 format.")]
    InvalidAddress,

    #[error("Invalid signedTransaction: {0}")]
    InvalidTransaction(String),

    #[error("Invalid token parameters: {0}")]
    InvalidTokenParams(String),

    #[error("No image file uploaded.")]
    MissingImage,

    #[error("Request {0} is already being processed")]
    DuplicateRequest(String),

    #[error("Failed after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    #[error("Token issuance failed at step '{step}': {message}")]
    IssuanceFailed {
        step: String,
        mint: Option<String>,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TokenCreatorError {
    /// Errors raised before any network call was attempted.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TokenCreatorError::InvalidAddress
                | TokenCreatorError::InvalidTransaction(_)
                | TokenCreatorError::InvalidTokenParams(_)
                | TokenCreatorError::MissingImage
        )
    }
}

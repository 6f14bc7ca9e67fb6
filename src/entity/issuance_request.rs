use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;

/// Everything needed to run one token issuance. Built from a validated
/// confirm-transaction call and consumed by the issuance interactor.
#[derive(Debug, Clone)]
pub struct IssuanceRequest {
    /// Fee payer of the signed transaction; becomes the token owner and creator.
    pub owner: Pubkey,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub supply: u64,
    pub description: String,
    pub image_url: Option<String>,
    pub revoke_mint: bool,
    pub revoke_freeze: bool,
    pub fee_transaction: Transaction,
    /// Key used to detect duplicate submissions.
    pub idempotency_key: String,
}

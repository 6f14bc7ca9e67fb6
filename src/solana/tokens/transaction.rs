use anyhow::{anyhow, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use solana_sdk::{pubkey::Pubkey, signature::Signature, transaction::Transaction};

use crate::entity::TokenCreatorError;

/// Serialize a transaction to the base64 wire format wallets accept.
pub fn encode_transaction(transaction: &Transaction) -> Result<String> {
    let bytes = bincode::serialize(transaction)
        .map_err(|e| anyhow!("Failed to serialize transaction: {}", e))?;
    Ok(STANDARD.encode(bytes))
}

/// Decode a base64 wire-format transaction coming from a wallet.
pub fn decode_transaction(encoded: &str) -> Result<Transaction, TokenCreatorError> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|_| TokenCreatorError::InvalidTransaction("Must be Base64 encoded.".to_string()))?;

    bincode::deserialize::<Transaction>(&bytes).map_err(|e| {
        TokenCreatorError::InvalidTransaction(format!("Failed to deserialize transaction: {}", e))
    })
}

/// The declared fee payer: the first account key of the message.
pub fn fee_payer(transaction: &Transaction) -> Option<Pubkey> {
    if transaction.message.header.num_required_signatures == 0 {
        return None;
    }
    transaction.message.account_keys.first().copied()
}

/// The fee payer's signature, which doubles as the transaction id.
pub fn first_signature(transaction: &Transaction) -> Option<Signature> {
    transaction
        .signatures
        .first()
        .copied()
        .filter(|signature| *signature != Signature::default())
}

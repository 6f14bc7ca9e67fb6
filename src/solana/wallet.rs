use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use regex::Regex;
use solana_sdk::{pubkey::Pubkey, signature::Keypair};
use std::str::FromStr;

lazy_static! {
    static ref BASE58_RE: Regex = Regex::new(r"^[1-9A-HJ-NP-Za-km-z]+$").unwrap();
}

/// Restore Keypair from base58 string (64 bytes).
pub fn keypair_from_base58(keypair_base58: &str) -> Result<Keypair> {
    let keypair_bytes = bs58::decode(keypair_base58)
        .into_vec()
        .map_err(|e| anyhow!("Failed to decode base58 keypair: {}", e))?;

    keypair_from_bytes(&keypair_bytes)
}

/// Restore Keypair from a JSON byte array, the format written by `solana-keygen`.
pub fn keypair_from_json(keypair_json: &str) -> Result<Keypair> {
    let keypair_bytes: Vec<u8> = serde_json::from_str(keypair_json)
        .map_err(|e| anyhow!("Failed to parse keypair byte array: {}", e))?;

    keypair_from_bytes(&keypair_bytes)
}

/// Load the server keypair from either supported encoding.
pub fn load_keypair(secret: &str) -> Result<Keypair> {
    let secret = secret.trim();
    if secret.starts_with('[') {
        keypair_from_json(secret)
    } else {
        keypair_from_base58(secret)
    }
}

fn keypair_from_bytes(keypair_bytes: &[u8]) -> Result<Keypair> {
    if keypair_bytes.len() != 64 {
        return Err(anyhow!("Invalid keypair length: {}", keypair_bytes.len()));
    }

    Keypair::from_bytes(keypair_bytes)
        .map_err(|e| anyhow!("Failed to create keypair from bytes: {}", e))
}

/// Convert base58 string to Solana `Pubkey`.
pub fn parse_pubkey(address: &str) -> Result<Pubkey> {
    Pubkey::from_str(address).map_err(|e| anyhow!("Invalid Solana address: {}", e))
}

/// Cheap alphabet check used on addresses echoed back from decoded transactions.
pub fn is_base58(value: &str) -> bool {
    BASE58_RE.is_match(value)
}

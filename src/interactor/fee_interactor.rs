use anyhow::Result;
use async_trait::async_trait;
use log::info;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;
use std::sync::Arc;

use crate::entity::TokenCreatorError;
use crate::solana::ledger::TokenLedger;
use crate::solana::tokens::{build_fee_transaction, encode_transaction, lamports_paid_to};
use crate::solana::utils::lamports_to_sol;
use crate::solana::wallet::parse_pubkey;

#[async_trait]
pub trait FeeInteractor: Send + Sync {
    /// Unsigned, base64 encoded fee transfer with `public_key` as payer.
    async fn create_fee_transaction(&self, public_key: &str) -> Result<String>;

    /// Check that a signed transaction actually pays the issuance fee.
    fn verify_fee_payment(&self, transaction: &Transaction) -> Result<(), TokenCreatorError>;
}

pub struct FeeInteractorImpl {
    ledger: Arc<dyn TokenLedger>,
    destination: Pubkey,
    lamports: u64,
}

impl FeeInteractorImpl {
    pub fn new(ledger: Arc<dyn TokenLedger>, destination: Pubkey, lamports: u64) -> Self {
        Self {
            ledger,
            destination,
            lamports,
        }
    }
}

#[async_trait]
impl FeeInteractor for FeeInteractorImpl {
    async fn create_fee_transaction(&self, public_key: &str) -> Result<String> {
        let payer = parse_pubkey(public_key).map_err(|_| TokenCreatorError::InvalidAddress)?;

        info!(
            "Building fee transaction of {} SOL for {}",
            lamports_to_sol(self.lamports),
            payer
        );

        let recent_blockhash = self.ledger.latest_blockhash().await?;
        let transaction =
            build_fee_transaction(&payer, &self.destination, self.lamports, recent_blockhash);

        encode_transaction(&transaction)
    }

    fn verify_fee_payment(&self, transaction: &Transaction) -> Result<(), TokenCreatorError> {
        let paid = lamports_paid_to(transaction, &self.destination);
        if paid < self.lamports {
            return Err(TokenCreatorError::InvalidTransaction(format!(
                "Transaction pays {} lamports to {}, expected {}",
                paid, self.destination, self.lamports
            )));
        }
        Ok(())
    }
}

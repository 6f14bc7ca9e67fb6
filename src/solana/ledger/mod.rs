use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, error};
use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_request::{RpcError, RpcResponseErrorData};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use std::sync::Arc;

use crate::entity::TokenCreatorError;

#[cfg(test)]
pub mod mock;

/// The chain operations the token creator depends on. Everything above this
/// trait builds plain instructions; implementations only sign, send and read.
#[async_trait]
pub trait TokenLedger: Send + Sync {
    /// Latest blockhash for transactions built by this service.
    async fn latest_blockhash(&self) -> Result<Hash>;

    /// Broadcast a transaction already signed by the client and wait for
    /// confirmation.
    async fn submit_signed_transaction(&self, transaction: &Transaction) -> Result<Signature>;

    /// Sign `instructions` with `payer` plus `signers`, send them as one
    /// transaction and wait for confirmation.
    async fn send_instructions(
        &self,
        payer: &Keypair,
        signers: &[&Keypair],
        instructions: &[Instruction],
    ) -> Result<Signature>;

    /// Whether an account is visible at confirmed commitment.
    async fn account_exists(&self, address: &Pubkey) -> Result<bool>;

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64>;
}

/// Create a Solana client with confirmed commitment
pub fn create_solana_client(rpc_url: &str) -> Arc<RpcClient> {
    let client = RpcClient::new_with_commitment(rpc_url.to_string(), CommitmentConfig::confirmed());

    Arc::new(client)
}

/// [`TokenLedger`] backed by a JSON-RPC node.
pub struct RpcTokenLedger {
    client: Arc<RpcClient>,
}

impl RpcTokenLedger {
    pub fn new(client: Arc<RpcClient>) -> Self {
        Self { client }
    }
}

/// Program logs attached to a failed preflight simulation, if any.
fn transaction_logs(err: &ClientError) -> Option<&Vec<String>> {
    match err.kind() {
        ClientErrorKind::RpcError(RpcError::RpcResponseError {
            data: RpcResponseErrorData::SendTransactionPreflightFailure(simulation),
            ..
        }) => simulation.logs.as_ref(),
        _ => None,
    }
}

fn send_error(context: &str, err: ClientError) -> anyhow::Error {
    error!("{}: {}", context, err);
    match transaction_logs(&err) {
        Some(logs) => {
            error!("Transaction logs: {:?}", logs);
            TokenCreatorError::SolanaClient(format!(
                "{}: {} (logs: {})",
                context,
                err,
                logs.join(" | ")
            ))
            .into()
        }
        None => TokenCreatorError::SolanaClient(format!("{}: {}", context, err)).into(),
    }
}

#[async_trait]
impl TokenLedger for RpcTokenLedger {
    async fn latest_blockhash(&self) -> Result<Hash> {
        self.client
            .get_latest_blockhash()
            .await
            .map_err(|e| anyhow!("Failed to get recent blockhash: {}", e))
    }

    async fn submit_signed_transaction(&self, transaction: &Transaction) -> Result<Signature> {
        self.client
            .send_and_confirm_transaction(transaction)
            .await
            .map_err(|e| send_error("Failed to send signed transaction", e))
    }

    async fn send_instructions(
        &self,
        payer: &Keypair,
        signers: &[&Keypair],
        instructions: &[Instruction],
    ) -> Result<Signature> {
        let recent_blockhash = self.latest_blockhash().await?;

        let mut all_signers: Vec<&Keypair> = vec![payer];
        all_signers.extend(
            signers
                .iter()
                .copied()
                .filter(|signer| signer.pubkey() != payer.pubkey()),
        );

        let transaction = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            all_signers.as_slice(),
            recent_blockhash,
        );

        let signature = self
            .client
            .send_and_confirm_transaction(&transaction)
            .await
            .map_err(|e| send_error("Failed to send transaction", e))?;

        debug!("Transaction confirmed: {}", signature);
        Ok(signature)
    }

    async fn account_exists(&self, address: &Pubkey) -> Result<bool> {
        let response = self
            .client
            .get_account_with_commitment(address, CommitmentConfig::confirmed())
            .await
            .map_err(|e| anyhow!("Failed to get account {}: {}", address, e))?;

        Ok(response.value.is_some())
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        self.client
            .get_minimum_balance_for_rent_exemption(data_len)
            .await
            .map_err(|e| anyhow!("Failed to get rent exemption minimum: {}", e))
    }
}

use anyhow::Result;
use async_trait::async_trait;
use log::{error, info, warn};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signer;
use spl_token::instruction::AuthorityType;
use std::sync::Arc;
use uuid::Uuid;

use crate::entity::{IssuanceRequest, IssuanceStep, MintRecord, OffChainMetadata, TokenCreatorError};
use crate::interactor::request_registry::{Admission, RequestRegistry};
use crate::pinata::{normalize_ipfs_uri, MetadataPublisher};
use crate::solana::ledger::TokenLedger;
use crate::solana::retry::RetryPolicy;
use crate::solana::tokens::constants::{MAX_NAME_LENGTH, MAX_SYMBOL_LENGTH, MAX_URI_LENGTH};
use crate::solana::tokens::{
    create_metadata_instruction, create_mint, get_or_create_associated_account, mint_to,
    revoke_authority, TokenMetadataArgs,
};
use crate::solana::utils::scale_supply;
use crate::solana::ServerIdentity;

/// Check token fields against Metaplex limits and return the supply in base units.
pub fn validate_token_params(
    name: &str,
    symbol: &str,
    decimals: u8,
    supply: u64,
) -> Result<u64, TokenCreatorError> {
    if name.trim().is_empty() || name.len() > MAX_NAME_LENGTH {
        return Err(TokenCreatorError::InvalidTokenParams(format!(
            "name must be 1 to {} bytes",
            MAX_NAME_LENGTH
        )));
    }
    if symbol.trim().is_empty() || symbol.len() > MAX_SYMBOL_LENGTH {
        return Err(TokenCreatorError::InvalidTokenParams(format!(
            "symbol must be 1 to {} bytes",
            MAX_SYMBOL_LENGTH
        )));
    }
    scale_supply(supply, decimals).ok_or_else(|| {
        TokenCreatorError::InvalidTokenParams(format!(
            "supply {} with {} decimals does not fit in a u64",
            supply, decimals
        ))
    })
}

#[async_trait]
pub trait IssuanceInteractor: Send + Sync {
    /// Run the full issuance: confirm the fee, create and fund the token,
    /// attach metadata and revoke the requested authorities.
    async fn create_token(&self, request: IssuanceRequest) -> Result<MintRecord>;
}

#[derive(Clone)]
pub struct IssuanceInteractorImpl {
    ledger: Arc<dyn TokenLedger>,
    publisher: Arc<dyn MetadataPublisher>,
    identity: Arc<ServerIdentity>,
    registry: Arc<RequestRegistry>,
    retry_policy: RetryPolicy,
    gateway_url: String,
}

impl IssuanceInteractorImpl {
    pub fn new(
        ledger: Arc<dyn TokenLedger>,
        publisher: Arc<dyn MetadataPublisher>,
        identity: Arc<ServerIdentity>,
        registry: Arc<RequestRegistry>,
        retry_policy: RetryPolicy,
        gateway_url: String,
    ) -> Self {
        Self {
            ledger,
            publisher,
            identity,
            registry,
            retry_policy,
            gateway_url,
        }
    }

    async fn issue(&self, request: &IssuanceRequest, issuance_id: &Uuid) -> Result<MintRecord> {
        let amount = validate_token_params(
            &request.name,
            &request.symbol,
            request.decimals,
            request.supply,
        )?;
        let server = self.identity.current();
        let ledger = self.ledger.as_ref();

        // 1. The client already signed the fee; nothing has been created yet.
        let fee_signature = ledger
            .submit_signed_transaction(&request.fee_transaction)
            .await
            .map_err(|e| step_failed(issuance_id, IssuanceStep::ConfirmFee, None, e))?;
        info!("[{}] Confirmed fee transaction: {}", issuance_id, fee_signature);

        // 2. From here on every write is permanent.
        let mint = create_mint(ledger, &server, request.decimals)
            .await
            .map_err(|e| step_failed(issuance_id, IssuanceStep::CreateMint, None, e))?;
        info!("[{}] Mint created: {}", issuance_id, mint);

        // 3.
        let token_account = get_or_create_associated_account(
            ledger,
            &server,
            &mint,
            &request.owner,
            &self.retry_policy,
        )
        .await
        .map_err(|e| step_failed(issuance_id, IssuanceStep::CreateTokenAccount, Some(&mint), e))?;
        info!("[{}] Token account created: {}", issuance_id, token_account);

        // 4.
        mint_to(ledger, &server, &mint, &token_account, amount)
            .await
            .map_err(|e| step_failed(issuance_id, IssuanceStep::MintSupply, Some(&mint), e))?;
        info!(
            "[{}] Minted {} tokens to account: {}",
            issuance_id, request.supply, token_account
        );

        // 5.
        let document = OffChainMetadata {
            name: request.name.clone(),
            symbol: request.symbol.clone(),
            description: request.description.clone(),
            image: request.image_url.clone(),
        };
        let published = match serde_json::to_value(&document) {
            Ok(document) => self.publisher.publish_json(&document).await,
            Err(e) => Err(e.into()),
        }
        .map_err(|e| step_failed(issuance_id, IssuanceStep::UploadMetadata, Some(&mint), e))?;
        let metadata_uri = normalize_ipfs_uri(&published, &self.gateway_url);
        info!("[{}] Metadata uploaded: {}", issuance_id, metadata_uri);

        // 6.
        if metadata_uri.len() > MAX_URI_LENGTH {
            return Err(step_failed(
                issuance_id,
                IssuanceStep::CreateMetadataAccount,
                Some(&mint),
                anyhow::anyhow!("metadata uri exceeds {} bytes", MAX_URI_LENGTH),
            ));
        }
        let instruction = create_metadata_instruction(
            &mint,
            &server.pubkey(),
            TokenMetadataArgs {
                name: request.name.clone(),
                symbol: request.symbol.clone(),
                uri: metadata_uri.clone(),
                creator: request.owner,
            },
        );
        let metadata_signature = ledger
            .send_instructions(&server, &[], &[instruction])
            .await
            .map_err(|e| {
                step_failed(issuance_id, IssuanceStep::CreateMetadataAccount, Some(&mint), e)
            })?;
        info!(
            "[{}] Metadata transaction confirmed: {}",
            issuance_id, metadata_signature
        );

        // 7. Each revocation stands alone; a failure between them is not undone.
        if request.revoke_freeze {
            revoke_authority(ledger, &server, &mint, AuthorityType::FreezeAccount)
                .await
                .map_err(|e| {
                    step_failed(issuance_id, IssuanceStep::RevokeFreezeAuthority, Some(&mint), e)
                })?;
            info!("[{}] Freeze authority revoked for mint: {}", issuance_id, mint);
        }
        if request.revoke_mint {
            revoke_authority(ledger, &server, &mint, AuthorityType::MintTokens)
                .await
                .map_err(|e| {
                    step_failed(issuance_id, IssuanceStep::RevokeMintAuthority, Some(&mint), e)
                })?;
            info!("[{}] Mint authority revoked for mint: {}", issuance_id, mint);
        }

        Ok(MintRecord {
            mint_address: mint.to_string(),
            token_account: token_account.to_string(),
            metadata_uri,
            transaction_signature: fee_signature.to_string(),
        })
    }
}

fn step_failed(
    issuance_id: &Uuid,
    step: IssuanceStep,
    mint: Option<&Pubkey>,
    err: anyhow::Error,
) -> anyhow::Error {
    error!("[{}] Error during {}: {:#}", issuance_id, step, err);
    if let Some(mint) = mint {
        warn!(
            "[{}] Mint {} already exists on chain and is left as is",
            issuance_id, mint
        );
    }

    TokenCreatorError::IssuanceFailed {
        step: step.to_string(),
        mint: mint.map(|m| m.to_string()),
        message: format!("{:#}", err),
    }
    .into()
}

#[async_trait]
impl IssuanceInteractor for IssuanceInteractorImpl {
    async fn create_token(&self, request: IssuanceRequest) -> Result<MintRecord> {
        let key = request.idempotency_key.clone();
        if let Admission::Replay(record) = self.registry.begin(&key)? {
            return Ok(record);
        }

        let issuance_id = Uuid::new_v4();
        info!(
            "[{}] Starting issuance of {} ({}) for {}",
            issuance_id, request.name, request.symbol, request.owner
        );

        // Runs detached: a dropped caller must not stop a paid issuance halfway.
        let interactor = self.clone();
        let task = tokio::spawn(async move {
            let result = interactor.issue(&request, &issuance_id).await;
            match &result {
                Ok(record) => {
                    info!("[{}] Issuance complete: {}", issuance_id, record.mint_address);
                    interactor.registry.complete(&key, record.clone());
                }
                Err(_) => interactor.registry.release(&key),
            }
            result
        });

        task.await
            .map_err(|e| anyhow::anyhow!("Issuance task {} did not finish: {}", issuance_id, e))?
    }
}

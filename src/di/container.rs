use anyhow::Result;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::entity::TokenCreatorError;
use crate::interactor::{
    FeeInteractor, FeeInteractorImpl, IssuanceInteractor, IssuanceInteractorImpl,
    RequestRegistry, UploadInteractor, UploadInteractorImpl,
};
use crate::pinata::{MetadataPublisher, PinataPublisher};
use crate::solana::wallet::parse_pubkey;
use crate::solana::{create_solana_client, RpcTokenLedger, ServerIdentity, TokenLedger};

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    config: AppConfig,

    // Core services
    identity: Arc<ServerIdentity>,
    registry: Arc<RequestRegistry>,

    // Interactors
    fee_interactor: Arc<dyn FeeInteractor + Send + Sync>,
    upload_interactor: Arc<dyn UploadInteractor + Send + Sync>,
    issuance_interactor: Arc<dyn IssuanceInteractor + Send + Sync>,
}

impl ServiceContainer {
    /// Wire the production services: RPC ledger and Pinata publisher.
    pub fn new(config: AppConfig, identity: Arc<ServerIdentity>) -> Result<Self> {
        let solana_client = create_solana_client(&config.solana_rpc_url);
        let ledger = Arc::new(RpcTokenLedger::new(solana_client))
            as Arc<dyn TokenLedger + Send + Sync>;
        let publisher = Arc::new(PinataPublisher::new(config.pinata()))
            as Arc<dyn MetadataPublisher + Send + Sync>;

        Self::with_services(config, identity, ledger, publisher)
    }

    /// Build the container around an existing ledger and publisher.
    pub fn with_services(
        config: AppConfig,
        identity: Arc<ServerIdentity>,
        ledger: Arc<dyn TokenLedger + Send + Sync>,
        publisher: Arc<dyn MetadataPublisher + Send + Sync>,
    ) -> Result<Self> {
        let fee_destination = match config.fee_destination.as_deref() {
            Some(address) if !address.trim().is_empty() => parse_pubkey(address.trim())
                .map_err(|_| {
                    TokenCreatorError::Config(format!("FEE_DESTINATION is invalid: {}", address))
                })?,
            _ => identity.pubkey(),
        };
        let fee_lamports = config.fee_lamports()?;
        let registry = Arc::new(RequestRegistry::default());
        let gateway_url = config.pinata_gateway_url.clone();

        let fee_interactor = Arc::new(FeeInteractorImpl::new(
            ledger.clone(),
            fee_destination,
            fee_lamports,
        )) as Arc<dyn FeeInteractor + Send + Sync>;

        let upload_interactor = Arc::new(UploadInteractorImpl::new(
            publisher.clone(),
            gateway_url.clone(),
        )) as Arc<dyn UploadInteractor + Send + Sync>;

        let issuance_interactor = Arc::new(IssuanceInteractorImpl::new(
            ledger.clone(),
            publisher.clone(),
            identity.clone(),
            registry.clone(),
            config.retry_policy(),
            gateway_url,
        )) as Arc<dyn IssuanceInteractor + Send + Sync>;

        Ok(Self {
            config,
            identity,
            registry,
            fee_interactor,
            upload_interactor,
            issuance_interactor,
        })
    }

    // Accessor methods

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn identity(&self) -> Arc<ServerIdentity> {
        self.identity.clone()
    }

    pub fn registry(&self) -> Arc<RequestRegistry> {
        self.registry.clone()
    }

    pub fn fee_interactor(&self) -> Arc<dyn FeeInteractor + Send + Sync> {
        self.fee_interactor.clone()
    }

    pub fn upload_interactor(&self) -> Arc<dyn UploadInteractor + Send + Sync> {
        self.upload_interactor.clone()
    }

    pub fn issuance_interactor(&self) -> Arc<dyn IssuanceInteractor + Send + Sync> {
        self.issuance_interactor.clone()
    }
}

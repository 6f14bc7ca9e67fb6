use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use log::info;
use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::di::ServiceContainer;
use crate::entity::{IssuanceRequest, TokenCreatorError};
use crate::interactor::{validate_token_params, FeeInteractor};
use crate::presenter::ApiError;
use crate::solana::tokens::{decode_transaction, fee_payer, first_signature};
use crate::solana::wallet::is_base58;
use crate::view::MintRecordView;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    Text(String),
}

/// Accept `6` as well as `"6"`; form inputs usually arrive as strings.
fn lenient_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + TryFrom<u64>,
    <T as FromStr>::Err: Display,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => T::try_from(n)
            .map_err(|_| de::Error::custom(format!("number {} is out of range", n))),
        NumberOrString::Text(s) => s.trim().parse::<T>().map_err(de::Error::custom),
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmTransactionRequest {
    pub signed_transaction: String,
    pub name: String,
    pub symbol: String,
    #[serde(deserialize_with = "lenient_number")]
    pub decimals: u8,
    #[serde(deserialize_with = "lenient_number")]
    pub supply: u64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub revoke_freeze: bool,
    #[serde(default)]
    pub revoke_mint: bool,
    /// Client generated key for safe resubmission
    #[serde(default)]
    pub request_id: Option<String>,
}

impl ConfirmTransactionRequest {
    /// Validate everything that can be checked without touching the network.
    pub fn into_issuance_request(
        self,
        fee_interactor: &dyn FeeInteractor,
    ) -> Result<IssuanceRequest, TokenCreatorError> {
        let fee_transaction = decode_transaction(&self.signed_transaction)?;

        let owner = fee_payer(&fee_transaction).ok_or_else(|| {
            TokenCreatorError::InvalidTransaction("Missing or invalid feePayer.".to_string())
        })?;
        if !is_base58(&owner.to_string()) {
            return Err(TokenCreatorError::InvalidTransaction(
                "feePayer is not a valid Base58 PublicKey.".to_string(),
            ));
        }

        validate_token_params(&self.name, &self.symbol, self.decimals, self.supply)?;
        fee_interactor.verify_fee_payment(&fee_transaction)?;

        let idempotency_key = match self.request_id.filter(|id| !id.trim().is_empty()) {
            Some(id) => id,
            None => first_signature(&fee_transaction)
                .map(|signature| signature.to_string())
                .ok_or_else(|| {
                    TokenCreatorError::InvalidTransaction("Transaction is not signed.".to_string())
                })?,
        };

        Ok(IssuanceRequest {
            owner,
            name: self.name,
            symbol: self.symbol,
            decimals: self.decimals,
            supply: self.supply,
            description: self.description,
            image_url: self.image_url.filter(|url| !url.trim().is_empty()),
            revoke_mint: self.revoke_mint,
            revoke_freeze: self.revoke_freeze,
            fee_transaction,
            idempotency_key,
        })
    }
}

/// POST /api/confirm-transaction
pub async fn handle_confirm_transaction(
    State(services): State<Arc<ServiceContainer>>,
    payload: Result<Json<ConfirmTransactionRequest>, JsonRejection>,
) -> Result<Json<MintRecordView>, ApiError> {
    let Json(body) = payload?;

    let request = body.into_issuance_request(services.fee_interactor().as_ref())?;
    info!(
        "Confirming issuance of {} ({}) for {}",
        request.name, request.symbol, request.owner
    );

    let record = services.issuance_interactor().create_token(request).await?;

    Ok(Json(record.into()))
}

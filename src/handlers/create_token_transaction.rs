use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use log::info;
use serde::Deserialize;

use crate::di::ServiceContainer;
use crate::presenter::ApiError;
use crate::view::TransactionView;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenTransactionRequest {
    #[serde(default)]
    pub public_key: Option<String>,
}

/// POST /api/create-token-transaction
///
/// Returns the unsigned fee transfer the wallet has to sign before
/// `confirm-transaction`. Nothing is built for a malformed key.
pub async fn handle_create_token_transaction(
    State(services): State<Arc<ServiceContainer>>,
    payload: Result<Json<CreateTokenTransactionRequest>, JsonRejection>,
) -> Result<Json<TransactionView>, ApiError> {
    let Json(body) = payload?;

    let public_key = body
        .public_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| ApiError::bad_request("Public key is required"))?;
    info!("Received publicKey: {}", public_key);

    let transaction = services
        .fee_interactor()
        .create_fee_transaction(public_key)
        .await?;

    Ok(Json(TransactionView { transaction }))
}

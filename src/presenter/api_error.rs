use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;

use crate::entity::TokenCreatorError;
use crate::view::ErrorView;

/// Error returned by every handler, rendered as `{ "error": ... }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub mint_address: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            mint_address: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            mint_address: None,
        }
    }
}

impl From<TokenCreatorError> for ApiError {
    fn from(err: TokenCreatorError) -> Self {
        let status = match &err {
            e if e.is_validation() => StatusCode::BAD_REQUEST,
            TokenCreatorError::DuplicateRequest(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let mint_address = match &err {
            TokenCreatorError::IssuanceFailed { mint, .. } => mint.clone(),
            _ => None,
        };

        Self {
            status,
            message: err.to_string(),
            mint_address,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<TokenCreatorError>() {
            Ok(token_error) => token_error.into(),
            Err(other) => Self::internal(format!("{:#}", other)),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self {
            status: err.status(),
            message: err.body_text(),
            mint_address: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!("Request failed ({}): {}", self.status, self.message);
        }

        let body = ErrorView {
            error: self.message,
            mint_address: self.mint_address,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_bad_requests() {
        let err: ApiError = anyhow::Error::from(TokenCreatorError::InvalidAddress).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid public key. Must be in Base58 format.");
    }

    #[test]
    fn test_duplicate_is_conflict() {
        let err: ApiError = TokenCreatorError::DuplicateRequest("abc".to_string()).into();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_issuance_failure_carries_mint() {
        let err: ApiError = anyhow::Error::from(TokenCreatorError::IssuanceFailed {
            step: "upload metadata".to_string(),
            mint: Some("Mint111".to_string()),
            message: "503".to_string(),
        })
        .into();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.mint_address.as_deref(), Some("Mint111"));
    }

    #[test]
    fn test_untyped_errors_are_internal() {
        let err: ApiError = anyhow::anyhow!("connection reset").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "connection reset");
    }
}

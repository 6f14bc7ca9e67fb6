//! HTTP endpoints. Each handler only parses the request, calls one
//! interactor and renders the result; errors go through [`ApiError`].
//!
//! [`ApiError`]: crate::presenter::ApiError

pub mod confirm_transaction;
pub mod create_token_transaction;
pub mod health;
pub mod upload_image;

pub use confirm_transaction::{handle_confirm_transaction, ConfirmTransactionRequest};
pub use create_token_transaction::{handle_create_token_transaction, CreateTokenTransactionRequest};
pub use health::handle_health;
pub use upload_image::handle_upload_image;

//! JSON bodies returned by the HTTP API.

pub mod issuance_view;
pub mod status_view;

pub use issuance_view::{ImageUploadView, MintRecordView, TransactionView};
pub use status_view::{ErrorView, MessageView};

mod issuance_request;
mod issuance_step;
mod mint_record;
mod token_creator_error;
mod token_metadata;

pub use issuance_request::IssuanceRequest;
pub use issuance_step::IssuanceStep;
pub use mint_record::MintRecord;
pub use token_creator_error::TokenCreatorError;
pub use token_metadata::OffChainMetadata;

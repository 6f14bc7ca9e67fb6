pub mod constants;
pub mod metadata;
pub mod native;
pub mod spl;
pub mod transaction;

pub use metadata::{create_metadata_instruction, derive_metadata_address, TokenMetadataArgs};
pub use native::{build_fee_transaction, lamports_paid_to};
pub use spl::{create_mint, get_or_create_associated_account, mint_to, revoke_authority};
pub use transaction::{decode_transaction, encode_transaction, fee_payer, first_signature};

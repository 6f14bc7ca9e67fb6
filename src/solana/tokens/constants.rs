use solana_sdk::{pubkey, pubkey::Pubkey};

// Metaplex Token Metadata program
pub const TOKEN_METADATA_PROGRAM_ID: Pubkey = pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");
pub const METADATA_SEED: &[u8] = b"metadata";

// Metaplex field limits (bytes)
pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_URI_LENGTH: usize = 200;

// Creator royalty split
pub const CREATOR_SHARE: u8 = 100;
pub const SELLER_FEE_BASIS_POINTS: u16 = 0;

// Fee constants
pub const DEFAULT_FEE_SOL: &str = "0.1";

use mpl_token_metadata::instructions::CreateMetadataAccountV3Builder;
use mpl_token_metadata::types::{Creator, DataV2};
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

use crate::solana::tokens::constants::{
    CREATOR_SHARE, METADATA_SEED, SELLER_FEE_BASIS_POINTS, TOKEN_METADATA_PROGRAM_ID,
};

/// Metadata account address for `mint`. Pure PDA derivation, no RPC.
pub fn derive_metadata_address(mint: &Pubkey) -> Pubkey {
    let (address, _bump) = Pubkey::find_program_address(
        &[
            METADATA_SEED,
            TOKEN_METADATA_PROGRAM_ID.as_ref(),
            mint.as_ref(),
        ],
        &TOKEN_METADATA_PROGRAM_ID,
    );
    address
}

/// Fields written into the on-chain metadata account.
#[derive(Debug, Clone)]
pub struct TokenMetadataArgs {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    /// Listed as the sole, unverified creator.
    pub creator: Pubkey,
}

/// `CreateMetadataAccountV3` with `authority` as payer, mint authority and
/// update authority. The record stays mutable.
pub fn create_metadata_instruction(
    mint: &Pubkey,
    authority: &Pubkey,
    args: TokenMetadataArgs,
) -> Instruction {
    let data = DataV2 {
        name: args.name,
        symbol: args.symbol,
        uri: args.uri,
        seller_fee_basis_points: SELLER_FEE_BASIS_POINTS,
        creators: Some(vec![Creator {
            address: args.creator,
            verified: false,
            share: CREATOR_SHARE,
        }]),
        collection: None,
        uses: None,
    };

    CreateMetadataAccountV3Builder::new()
        .metadata(derive_metadata_address(mint))
        .mint(*mint)
        .mint_authority(*authority)
        .payer(*authority)
        .update_authority(*authority, true)
        .data(data)
        .is_mutable(true)
        .instruction()
}
